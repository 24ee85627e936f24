//! Error types.
//!
//! [`SchemaError`] and [`SchemaErrors`] describe validation failures and are
//! always collected, never thrown. [`CompileError`], [`DecodeError`] and
//! [`ValidateError`] are fatal: they abort the call that produced them.

mod schema_error;

pub use schema_error::{SchemaError, SchemaErrors};

/// Errors that abort schema compilation.
///
/// No partial schema is ever returned alongside one of these.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The schema bytes are not valid JSON.
    #[error("failed to parse schema json: {0}")]
    Json(#[source] serde_json::Error),

    /// A fragment has no `type`, or its `type` is neither built in nor a
    /// declared custom type.
    #[error("schema type {} is missing or not supported", describe_type(.found))]
    UnsupportedType {
        /// The `type` value found, if it was a string.
        found: Option<String>,
    },

    /// A fragment's attributes have the wrong shape for its type.
    #[error("invalid attributes for a {type_name} schema: {source}")]
    InvalidAttributes {
        /// The fragment's `type`.
        type_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A `regexMatch` or `noRegexMatch` pattern does not compile.
    #[error("invalid {attribute} pattern: {source}")]
    InvalidRegex {
        /// The attribute holding the pattern.
        attribute: &'static str,
        #[source]
        source: regex::Error,
    },

    /// The root-level `customTypes` is not an object.
    #[error("customTypes must be an object mapping names to schemas")]
    InvalidCustomTypes,

    /// A custom type was declared under a built-in type name.
    #[error("custom type '{0}' shadows a built-in type")]
    ReservedTypeName(String),

    /// A custom type is defined only as a chain of references back to itself.
    #[error("custom type '{0}' is an alias cycle and can never be resolved")]
    CyclicAlias(String),
}

fn describe_type(found: &Option<String>) -> String {
    match found {
        Some(name) => format!("'{}'", name),
        None => "(none)".to_string(),
    }
}

/// Errors raised while decoding documents or patch lists.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The bytes are not valid JSON.
    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),

    /// The patch list is not a JSON array.
    #[error("patch list must be a json array")]
    PatchListNotArray,

    /// A patch entry is not a JSON object.
    #[error("patch {index} is not an object")]
    PatchNotObject {
        /// Index of the offending patch.
        index: usize,
    },

    /// A patch entry lacks `op` or `path`.
    #[error("patch {index}: field \"{field}\" not specified")]
    MissingPatchField {
        /// Index of the offending patch.
        index: usize,
        /// The missing field.
        field: &'static str,
    },

    /// A patch entry's `op` or `path` is not a string.
    #[error("patch {index}: field \"{field}\" is not a string")]
    PatchFieldNotString {
        /// Index of the offending patch.
        index: usize,
        /// The offending field.
        field: &'static str,
    },
}

/// The outcome of validating raw bytes: either the bytes could not be
/// decoded, or they decoded and failed validation.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// The input could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The input decoded but violates the schema.
    #[error(transparent)]
    Invalid(#[from] SchemaErrors),
}

impl ValidateError {
    /// Returns the validation errors, if decoding succeeded.
    pub fn schema_errors(&self) -> Option<&SchemaErrors> {
        match self {
            ValidateError::Invalid(errors) => Some(errors),
            ValidateError::Decode(_) => None,
        }
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<CompileError>();
    assert_sync::<CompileError>();
    assert_send::<ValidateError>();
    assert_sync::<ValidateError>();
};
