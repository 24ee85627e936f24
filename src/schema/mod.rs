//! Compiled validator nodes.
//!
//! A compiled schema is a tree of [`ValidatorNode`]s. Each variant checks one
//! shape of value; `Array` and `Object` own their children, and `CustomRef`
//! names a custom type that is looked up at validation time.
//!
//! Composite nodes (arrays and objects) accumulate every error from their
//! children. Leaf nodes (strings and floats) report the first constraint that
//! fails.
//!
//! # Example
//!
//! ```rust
//! use patchwarden::{Position, ValidatorNode, StringNode, ObjectNode};
//! use patchwarden::custom_types::CustomTypes;
//! use patchwarden::validation::ValidationContext;
//! use serde_json::json;
//!
//! let node = ValidatorNode::Object(
//!     ObjectNode::new().field("name", ValidatorNode::String(StringNode::new().max_chars(20))),
//! );
//!
//! let types = CustomTypes::default();
//! let context = ValidationContext::new(&types, 16);
//!
//! let result = node.validate(&json!({"name": "Giorgio"}), &Position::document(), &context);
//! assert!(result.is_success());
//! ```

mod any;
mod array;
mod custom_ref;
mod float;
mod object;
mod string;

pub use any::AnyNode;
pub use array::ArrayNode;
pub use custom_ref::CustomRef;
pub use float::FloatNode;
pub use object::ObjectNode;
pub use string::StringNode;

pub(crate) use array::ArrayAttributes;
pub(crate) use custom_ref::CustomRefAttributes;
pub(crate) use object::ObjectAttributes;
pub(crate) use string::StringAttributes;

use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::patch::Patch;
use crate::path::Position;
use crate::pointer::PointerCursor;
use crate::validation::ValidationContext;
use crate::ValidationResult;

/// One compiled unit of a schema.
///
/// Every operation matches exhaustively on the variant, so adding a variant
/// forces each operation to handle it.
#[derive(Debug, Clone)]
pub enum ValidatorNode {
    /// Accepts every value.
    Any(AnyNode),
    /// Accepts strings within length, pattern and value constraints.
    String(StringNode),
    /// Accepts numbers within inclusive and exclusive bounds.
    Float(FloatNode),
    /// Accepts arrays whose elements all satisfy one child node.
    Array(ArrayNode),
    /// Accepts objects with exactly the declared fields.
    Object(ObjectNode),
    /// Delegates to a named custom type.
    CustomRef(CustomRef),
}

impl ValidatorNode {
    /// Returns the declared type of this node without following references.
    ///
    /// For a reference this is the custom type's name.
    pub fn kind(&self) -> &str {
        match self {
            ValidatorNode::Any(_) => "any",
            ValidatorNode::String(_) => "string",
            ValidatorNode::Float(_) => "float",
            ValidatorNode::Array(_) => "array",
            ValidatorNode::Object(_) => "object",
            ValidatorNode::CustomRef(reference) => reference.name(),
        }
    }

    /// Returns the built-in type this node validates, following references.
    pub fn type_name<'a>(&'a self, context: &ValidationContext<'a>) -> &'a str {
        match self {
            ValidatorNode::CustomRef(reference) => match context.resolve(reference.name()) {
                Some(node) => node.type_name(context),
                None => reference.name(),
            },
            other => other.kind(),
        }
    }

    /// Returns true if the value this node describes may not be omitted or
    /// removed.
    ///
    /// Fails only when a reference names an undeclared custom type; the
    /// error is reported at `position`.
    pub fn is_required(
        &self,
        position: &Position,
        context: &ValidationContext<'_>,
    ) -> Result<bool, SchemaError> {
        match self {
            ValidatorNode::Any(node) => Ok(node.is_required()),
            ValidatorNode::String(node) => Ok(node.is_required()),
            ValidatorNode::Float(node) => Ok(node.is_required()),
            ValidatorNode::Array(node) => Ok(node.is_required()),
            ValidatorNode::Object(node) => Ok(node.is_required()),
            ValidatorNode::CustomRef(reference) => reference.is_required(position, context),
        }
    }

    /// Validates a full value at `position`.
    pub fn validate(
        &self,
        value: &serde_json::Value,
        position: &Position,
        context: &ValidationContext<'_>,
    ) -> ValidationResult<()> {
        match self {
            ValidatorNode::Any(node) => node.validate(value, position),
            ValidatorNode::String(node) => node.validate(value, position),
            ValidatorNode::Float(node) => node.validate(value, position),
            ValidatorNode::Array(node) => node.validate(value, position, context),
            ValidatorNode::Object(node) => node.validate(value, position, context),
            ValidatorNode::CustomRef(reference) => reference.validate(value, position, context),
        }
    }

    /// Validates one patch whose unconsumed path is `cursor`.
    ///
    /// At the end of the path the patch applies to this node: `remove` is
    /// rejected for required nodes and any other operation validates the
    /// patch value. Otherwise composite nodes consume one segment and route
    /// the patch to the matching child; leaves reject the path.
    pub fn validate_patch(
        &self,
        patch: &Patch,
        cursor: PointerCursor<'_>,
        position: &Position,
        context: &ValidationContext<'_>,
    ) -> ValidationResult<()> {
        match self {
            ValidatorNode::CustomRef(reference) => {
                reference.validate_patch(patch, cursor, position, context)
            }
            _ if cursor.is_root() => self.validate_patch_target(patch, position, context),
            ValidatorNode::Array(node) => node.route_patch(patch, cursor, position, context),
            ValidatorNode::Object(node) => node.route_patch(patch, cursor, position, context),
            ValidatorNode::Any(_) | ValidatorNode::String(_) | ValidatorNode::Float(_) => fail(
                position,
                format!("cannot access a field inside a {}", self.kind()),
                "leaf_access",
            ),
        }
    }

    /// Applies a patch whose path ends at this node.
    pub(crate) fn validate_patch_target(
        &self,
        patch: &Patch,
        position: &Position,
        context: &ValidationContext<'_>,
    ) -> ValidationResult<()> {
        if patch.op.is_remove() {
            return match self.is_required(position, context) {
                Ok(true) => fail(position, "cannot remove a required field", "required_removal"),
                Ok(false) => Validation::Success(()),
                Err(error) => Validation::Failure(SchemaErrors::single(error)),
            };
        }
        self.validate(patch.value_or_null(), position, context)
    }
}

/// Fails with a single error.
pub(crate) fn fail(
    position: &Position,
    message: impl Into<String>,
    code: &str,
) -> ValidationResult<()> {
    Validation::Failure(SchemaErrors::single(
        SchemaError::new(position.clone(), message).with_code(code),
    ))
}

/// Fails with the standard type mismatch error.
pub(crate) fn type_mismatch(position: &Position, expected: &str) -> ValidationResult<()> {
    let article = if expected.starts_with(['a', 'e', 'i', 'o', 'u']) {
        "an"
    } else {
        "a"
    };
    fail(
        position,
        format!("not {} {}", article, expected),
        "invalid_type",
    )
}

/// Succeeds if `errors` is empty, otherwise fails with all of them.
pub(crate) fn collect(errors: Vec<SchemaError>) -> ValidationResult<()> {
    match SchemaErrors::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(()),
    }
}

/// Appends the errors of a failed child result.
pub(crate) fn absorb(errors: &mut Vec<SchemaError>, result: ValidationResult<()>) {
    if let Validation::Failure(child) = result {
        errors.extend(child);
    }
}
