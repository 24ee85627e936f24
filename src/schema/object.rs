//! Object validation.
//!
//! This module provides [`ObjectNode`] for validating closed-world objects:
//! every declared field is checked, required fields must be present, and
//! undeclared fields are rejected.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use stillwater::Validation;

use crate::compiler::CompileScope;
use crate::error::{CompileError, SchemaError, SchemaErrors};
use crate::patch::Patch;
use crate::path::Position;
use crate::pointer::PointerCursor;
use crate::validation::ValidationContext;
use crate::ValidationResult;

use super::{absorb, collect, fail, type_mismatch, ValidatorNode};

/// The decode-phase form of an object schema; field schemas are still raw.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ObjectAttributes {
    #[serde(default)]
    required: bool,
    #[serde(default)]
    fields: IndexMap<String, Value>,
}

impl ObjectAttributes {
    /// Compiles every field schema and produces the node.
    pub(crate) fn initialize(self, scope: &CompileScope<'_>) -> Result<ObjectNode, CompileError> {
        let fields = self
            .fields
            .iter()
            .map(|(name, fragment)| Ok((name.clone(), scope.compile(fragment)?)))
            .collect::<Result<IndexMap<_, _>, CompileError>>()?;

        Ok(ObjectNode {
            fields,
            required: self.required,
        })
    }
}

/// A node for validating objects.
///
/// A value is valid when every required field is present, every present field
/// is valid, and no field outside the declared set exists. All violations are
/// reported: field errors at `<object>/<field>`, missing and undeclared fields
/// at the object itself.
///
/// # Example
///
/// ```rust
/// use patchwarden::{ObjectNode, Position, StringNode, ValidatorNode};
/// use patchwarden::custom_types::CustomTypes;
/// use patchwarden::validation::ValidationContext;
/// use serde_json::json;
///
/// let node = ObjectNode::new()
///     .field("email", ValidatorNode::String(StringNode::new().required(true)))
///     .field("name", ValidatorNode::String(StringNode::new()));
///
/// let types = CustomTypes::default();
/// let context = ValidationContext::new(&types, 16);
///
/// let result = node.validate(&json!({"name": 3, "extra": true}), &Position::document(), &context);
/// let errors = result.into_result().unwrap_err();
///
/// // Missing email, invalid name, undeclared extra.
/// assert_eq!(errors.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectNode {
    fields: IndexMap<String, ValidatorNode>,
    required: bool,
}

impl ObjectNode {
    /// Creates an optional object node with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field. Its requiredness comes from `node`.
    pub fn field(mut self, name: impl Into<String>, node: ValidatorNode) -> Self {
        self.fields.insert(name.into(), node);
        self
    }

    /// Sets whether the value is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Returns true if the value is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the node declared for `name`.
    pub fn get(&self, name: &str) -> Option<&ValidatorNode> {
        self.fields.get(name)
    }

    /// Returns the declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &ValidatorNode)> {
        self.fields.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Validates a value against this node.
    pub fn validate(
        &self,
        value: &Value,
        position: &Position,
        context: &ValidationContext<'_>,
    ) -> ValidationResult<()> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => return type_mismatch(position, "object"),
        };

        let mut errors = Vec::new();

        for (name, node) in &self.fields {
            match obj.get(name) {
                Some(field_value) => {
                    let field_position = position.push_field(name);
                    absorb(
                        &mut errors,
                        node.validate(field_value, &field_position, context),
                    );
                }
                None => match node.is_required(&position.push_field(name), context) {
                    Ok(true) => errors.push(
                        SchemaError::new(
                            position.clone(),
                            format!("required field '{}' is missing", name),
                        )
                        .with_code("required"),
                    ),
                    Ok(false) => {}
                    Err(error) => errors.push(error),
                },
            }
        }

        for key in obj.keys() {
            if !self.fields.contains_key(key) {
                errors.push(unknown_field(position, key));
            }
        }

        collect(errors)
    }

    /// Routes a patch to the field named by the next segment.
    pub(crate) fn route_patch(
        &self,
        patch: &Patch,
        cursor: PointerCursor<'_>,
        position: &Position,
        context: &ValidationContext<'_>,
    ) -> ValidationResult<()> {
        let (segment, rest) = match cursor.next_segment() {
            Ok(next) => next,
            Err(error) => return fail(position, error.to_string(), "invalid_path"),
        };

        match self.fields.get(segment.as_ref()) {
            Some(node) => {
                let field_position = position.push_field(segment.into_owned());
                node.validate_patch(patch, rest, &field_position, context)
            }
            None => Validation::Failure(SchemaErrors::single(unknown_field(position, &segment))),
        }
    }
}

fn unknown_field(position: &Position, name: &str) -> SchemaError {
    SchemaError::new(
        position.clone(),
        format!("field '{}' is not specified in the schema", name),
    )
    .with_code("unknown_field")
}
