//! Wildcard validation.

use serde::Deserialize;
use serde_json::Value;
use stillwater::Validation;

use crate::path::Position;
use crate::ValidationResult;

/// A node that accepts every value.
///
/// Only its requiredness matters: a required `any` field must be present in
/// its object and cannot be removed by a patch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnyNode {
    #[serde(default)]
    required: bool,
}

impl AnyNode {
    /// Creates an optional wildcard node.
    pub fn new() -> Self {
        Self::default()
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

    /// Accepts any value.
    pub fn validate(&self, _value: &Value, _position: &Position) -> ValidationResult<()> {
        Validation::Success(())
    }
}
