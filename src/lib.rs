//! # Patchwarden
//!
//! Compiles JSON schema documents into validators that check whole JSON
//! documents and JSON patch lists, accumulating ALL violations rather than
//! stopping at the first one.
//!
//! ## Overview
//!
//! A schema is a JSON document whose `type` is one of `any`, `string`,
//! `float`, `array` or `object`, or the name of a custom type declared in the
//! root-level `customTypes` map. Custom types may refer to themselves, which
//! is how recursive shapes like trees are described.
//!
//! Validation outcomes use stillwater's `Validation` type so errors from
//! sibling fields, array elements and independent patches are combined into
//! one [`SchemaErrors`] value.
//!
//! ## Core Types
//!
//! - [`SchemaCompiler`]: compile options and entry point
//! - [`RootValidator`]: a compiled schema; validates documents and patch lists
//! - [`ValidatorNode`]: one compiled unit of a schema
//! - [`Position`]: where an error happened (`$/decks/0/name`, `Patch 1 /name`)
//! - [`SchemaError`] / [`SchemaErrors`]: collected violations
//!
//! ## Example
//!
//! ```rust
//! use patchwarden::RootValidator;
//!
//! let validator = RootValidator::compile(br#"{
//!     "type": "object",
//!     "fields": {
//!         "name": {"type": "string", "maxChars": 20}
//!     }
//! }"#).unwrap();
//!
//! assert!(validator.validate(br#"{"name": "Giorgio"}"#).is_ok());
//!
//! let err = validator
//!     .validate_patches(br#"[
//!         {"op": "add", "path": "/name", "value": "Giorgio asdf asdf asdf asdf"}
//!     ]"#)
//!     .unwrap_err();
//!
//! assert_eq!(
//!     err.to_string(),
//!     "[Patch 0 /name] this string is longer than maxChars (20)"
//! );
//! ```

pub mod compiler;
pub mod custom_types;
pub mod error;
pub mod patch;
pub mod path;
pub mod pointer;
pub mod schema;
pub mod validation;
pub mod validator;
pub mod value;

pub use compiler::{SchemaCompiler, DEFAULT_MAX_DEPTH};
pub use error::{CompileError, DecodeError, SchemaError, SchemaErrors, ValidateError};
pub use patch::{decode_patches, Patch, PatchOp};
pub use path::{Origin, PathSegment, Position};
pub use pointer::{PointerCursor, PointerError};
pub use schema::{AnyNode, ArrayNode, CustomRef, FloatNode, ObjectNode, StringNode, ValidatorNode};
pub use validator::RootValidator;
pub use value::Value;

/// Type alias for validation results using SchemaErrors
pub type ValidationResult<T> = stillwater::Validation<T, SchemaErrors>;
