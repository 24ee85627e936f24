//! Array validation.
//!
//! This module provides [`ArrayNode`] for validating arrays with an element
//! node and element-count bounds, and for routing patches to array elements.

use serde::Deserialize;
use serde_json::Value;

use crate::compiler::CompileScope;
use crate::error::{CompileError, SchemaError};
use crate::patch::Patch;
use crate::path::Position;
use crate::pointer::PointerCursor;
use crate::validation::ValidationContext;
use crate::ValidationResult;

use super::{absorb, collect, fail, type_mismatch, ValidatorNode};

/// The decode-phase form of an array schema; `elements` is still raw.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArrayAttributes {
    #[serde(default)]
    required: bool,
    elements: Value,
    max_elements: Option<usize>,
    min_elements: Option<usize>,
}

impl ArrayAttributes {
    /// Compiles the element schema and produces the node.
    pub(crate) fn initialize(self, scope: &CompileScope<'_>) -> Result<ArrayNode, CompileError> {
        let elements = scope.compile(&self.elements)?;
        Ok(ArrayNode {
            elements: Box::new(elements),
            required: self.required,
            max_elements: self.max_elements,
            min_elements: self.min_elements,
        })
    }
}

/// A node for validating arrays.
///
/// Every element is validated against the element node and every failure is
/// reported, together with any element-count violation.
///
/// # Example
///
/// ```rust
/// use patchwarden::{ArrayNode, FloatNode, Position, ValidatorNode};
/// use patchwarden::custom_types::CustomTypes;
/// use patchwarden::validation::ValidationContext;
/// use serde_json::json;
///
/// let node = ArrayNode::new(ValidatorNode::Float(FloatNode::new().min(0.0))).max_elements(2);
/// let types = CustomTypes::default();
/// let context = ValidationContext::new(&types, 16);
///
/// let result = node.validate(&json!([-1, 2, -3]), &Position::document(), &context);
/// let errors = result.into_result().unwrap_err();
///
/// // Two element errors plus the count violation.
/// assert_eq!(errors.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ArrayNode {
    elements: Box<ValidatorNode>,
    required: bool,
    max_elements: Option<usize>,
    min_elements: Option<usize>,
}

impl ArrayNode {
    /// Creates an optional array node whose elements satisfy `elements`.
    pub fn new(elements: ValidatorNode) -> Self {
        Self {
            elements: Box::new(elements),
            required: false,
            max_elements: None,
            min_elements: None,
        }
    }

    /// Sets whether the value is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the maximum number of elements.
    pub fn max_elements(mut self, max: usize) -> Self {
        self.max_elements = Some(max);
        self
    }

    /// Sets the minimum number of elements.
    pub fn min_elements(mut self, min: usize) -> Self {
        self.min_elements = Some(min);
        self
    }

    /// Returns true if the value is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the element node.
    pub fn elements(&self) -> &ValidatorNode {
        &self.elements
    }

    /// Validates a value against this node.
    pub fn validate(
        &self,
        value: &Value,
        position: &Position,
        context: &ValidationContext<'_>,
    ) -> ValidationResult<()> {
        let arr = match value.as_array() {
            Some(a) => a,
            None => return type_mismatch(position, "array"),
        };

        let mut errors = Vec::new();

        for (index, item) in arr.iter().enumerate() {
            let item_position = position.push_index(index);
            absorb(
                &mut errors,
                self.elements.validate(item, &item_position, context),
            );
        }

        if let Some(max) = self.max_elements {
            if arr.len() > max {
                errors.push(
                    SchemaError::new(position.clone(), max_elements_message(max))
                        .with_code("max_elements"),
                );
            }
        }
        if let Some(min) = self.min_elements {
            if arr.len() < min {
                errors.push(
                    SchemaError::new(
                        position.clone(),
                        format!("this array must contain at least {} elements", min),
                    )
                    .with_code("min_elements"),
                );
            }
        }

        collect(errors)
    }

    /// Routes a patch to an element.
    ///
    /// The next segment must be `-` (append) or a decimal index. Indices at or
    /// beyond `maxElements` are rejected; `-` is not checked against
    /// `maxElements`, so appends can still grow the array past the bound.
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

        let element_position = if segment == "-" {
            position.push_append()
        } else {
            let index = match parse_index(&segment) {
                Some(index) => index,
                None => {
                    return fail(
                        position,
                        "array position is invalid, it should be either - or a number",
                        "invalid_index",
                    )
                }
            };
            let element_position = position.push_index(index);
            if let Some(max) = self.max_elements {
                if index >= max {
                    return fail(&element_position, max_elements_message(max), "max_elements");
                }
            }
            element_position
        };

        self.elements
            .validate_patch(patch, rest, &element_position, context)
    }
}

fn max_elements_message(max: usize) -> String {
    format!("this array can contain at most {} elements", max)
}

/// Parses a non-negative decimal array index.
fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
