//! References to named custom types.
//!
//! This module provides [`CustomRef`], the node compiled for a fragment whose
//! `type` names a custom type. References enable reuse and recursive
//! structures such as trees.

use serde::Deserialize;
use serde_json::Value;
use stillwater::Validation;
use tracing::trace;

use crate::error::{SchemaError, SchemaErrors};
use crate::patch::Patch;
use crate::path::Position;
use crate::pointer::PointerCursor;
use crate::validation::ValidationContext;
use crate::ValidationResult;

use super::{fail, ValidatorNode};

/// The decode-phase form of a reference; only `required` is read.
#[derive(Debug, Deserialize)]
pub(crate) struct CustomRefAttributes {
    required: Option<bool>,
}

impl CustomRefAttributes {
    pub(crate) fn initialize(self, name: &str) -> CustomRef {
        CustomRef {
            name: name.to_string(),
            required: self.required,
        }
    }
}

/// A node that delegates to a custom type by name.
///
/// The reference does not own the referenced node. It is looked up in the
/// [`ValidationContext`] every time it is used, so a type may refer to itself
/// or to types declared after it.
///
/// # Example
///
/// ```rust
/// use patchwarden::SchemaCompiler;
/// use serde_json::json;
///
/// let validator = SchemaCompiler::new()
///     .compile_value(&json!({
///         "type": "node",
///         "customTypes": {
///             "node": {
///                 "type": "object",
///                 "fields": {
///                     "value": {"type": "float"},
///                     "children": {"type": "array", "elements": {"type": "node"}}
///                 }
///             }
///         }
///     }))
///     .unwrap();
///
/// let tree = json!({"value": 1, "children": [{"value": 2, "children": []}]});
/// assert!(validator.validate_value(&tree).is_success());
/// ```
#[derive(Debug, Clone)]
pub struct CustomRef {
    name: String,
    required: Option<bool>,
}

impl CustomRef {
    /// Creates a reference to the custom type `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: None,
        }
    }

    /// Overrides the requiredness of the referenced type.
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Returns the referenced type's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the explicit requiredness override, if any.
    pub fn required_override(&self) -> Option<bool> {
        self.required
    }

    /// Returns true if the value is required.
    ///
    /// An explicit override wins; otherwise the referenced type decides.
    /// Only the alias chain is followed here, never a value, and alias chains
    /// are acyclic, so the depth limit does not apply. An unresolvable
    /// reference is an error.
    pub fn is_required(
        &self,
        position: &Position,
        context: &ValidationContext<'_>,
    ) -> Result<bool, SchemaError> {
        if let Some(required) = self.required {
            return Ok(required);
        }
        match context.resolve(&self.name) {
            Some(node) => node.is_required(position, context),
            None => Err(missing_type(position, &self.name)),
        }
    }

    /// Validates a value against the referenced type.
    pub fn validate(
        &self,
        value: &Value,
        position: &Position,
        context: &ValidationContext<'_>,
    ) -> ValidationResult<()> {
        match self.enter(position, context) {
            Ok(node) => node.validate(value, position, &context.increment_depth()),
            Err(error) => Validation::Failure(SchemaErrors::single(error)),
        }
    }

    /// Validates a patch against the referenced type.
    pub fn validate_patch(
        &self,
        patch: &Patch,
        cursor: PointerCursor<'_>,
        position: &Position,
        context: &ValidationContext<'_>,
    ) -> ValidationResult<()> {
        if cursor.is_root() && patch.op.is_remove() {
            return match self.is_required(position, context) {
                Ok(true) => fail(position, "cannot remove a required field", "required_removal"),
                Ok(false) => Validation::Success(()),
                Err(error) => Validation::Failure(SchemaErrors::single(error)),
            };
        }

        match self.enter(position, context) {
            Ok(node) => node.validate_patch(patch, cursor, position, &context.increment_depth()),
            Err(error) => Validation::Failure(SchemaErrors::single(error)),
        }
    }

    /// Resolves the referenced node, enforcing the depth limit.
    fn enter<'a>(
        &self,
        position: &Position,
        context: &ValidationContext<'a>,
    ) -> Result<&'a ValidatorNode, SchemaError> {
        if context.depth() >= context.max_depth() {
            return Err(SchemaError::new(
                position.clone(),
                format!("maximum custom type depth {} exceeded", context.max_depth()),
            )
            .with_code("max_depth_exceeded"));
        }

        match context.resolve(&self.name) {
            Some(node) => {
                trace!(name = %self.name, depth = context.depth(), "following custom type");
                Ok(node)
            }
            None => Err(missing_type(position, &self.name)),
        }
    }
}

fn missing_type(position: &Position, name: &str) -> SchemaError {
    SchemaError::new(
        position.clone(),
        format!("custom type '{}' is not declared", name),
    )
    .with_code("missing_type")
}
