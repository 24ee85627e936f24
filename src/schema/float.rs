//! Numeric validation.
//!
//! This module provides [`FloatNode`] for validating numbers against inclusive
//! and exclusive bounds.

use serde::Deserialize;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::Position;
use crate::ValidationResult;

use super::type_mismatch;

/// A node for validating numeric values.
///
/// Any JSON number is accepted as a float; strings are never coerced. Bounds
/// are checked in the order `min`, `max`, `strictMin`, `strictMax` and only the
/// first failure is reported.
///
/// # Example
///
/// ```rust
/// use patchwarden::{FloatNode, Position};
/// use serde_json::json;
///
/// let node = FloatNode::new().min(0.0).max(10.0);
///
/// assert!(node.validate(&json!(5), &Position::document()).is_success());
/// assert!(node.validate(&json!(-1), &Position::document()).is_failure());
/// assert!(node.validate(&json!(12), &Position::document()).is_failure());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatNode {
    #[serde(default)]
    required: bool,
    min: Option<f64>,
    strict_min: Option<f64>,
    max: Option<f64>,
    strict_max: Option<f64>,
}

impl FloatNode {
    /// Creates an optional float node with no bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the value is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Adds an inclusive lower bound (`value >= min`).
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Adds an exclusive lower bound (`value > min`).
    pub fn strict_min(mut self, min: f64) -> Self {
        self.strict_min = Some(min);
        self
    }

    /// Adds an inclusive upper bound (`value <= max`).
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Adds an exclusive upper bound (`value < max`).
    pub fn strict_max(mut self, max: f64) -> Self {
        self.strict_max = Some(max);
        self
    }

    /// Returns true if the value is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Validates a value against this node.
    pub fn validate(&self, value: &Value, position: &Position) -> ValidationResult<()> {
        let n = match value.as_f64() {
            Some(n) => n,
            None => return type_mismatch(position, "float"),
        };

        match self.first_violation(n, position) {
            Some(error) => Validation::Failure(SchemaErrors::single(error)),
            None => Validation::Success(()),
        }
    }

    fn first_violation(&self, value: f64, position: &Position) -> Option<SchemaError> {
        let violation = |message: String, code: &str| {
            Some(SchemaError::new(position.clone(), message).with_code(code))
        };

        if let Some(min) = self.min {
            if value < min {
                return violation(format!("the value is below the min ({})", min), "min");
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return violation(format!("the value is above the max ({})", max), "max");
            }
        }
        if let Some(min) = self.strict_min {
            if value <= min {
                return violation(
                    format!("the value is below or equal to the strictMin ({})", min),
                    "strict_min",
                );
            }
        }
        if let Some(max) = self.strict_max {
            if value >= max {
                return violation(
                    format!("the value is above or equal to the strictMax ({})", max),
                    "strict_max",
                );
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_accepts_integers_and_fractions() {
        let node = FloatNode::new();
        assert!(node.validate(&json!(5), &Position::document()).is_success());
        assert!(node.validate(&json!(-2.75), &Position::document()).is_success());
    }

    #[test]
    fn test_no_string_coercion() {
        let errors = unwrap_failure(FloatNode::new().validate(&json!("5"), &Position::document()));
        assert_eq!(errors.first().message, "not a float");
    }

    #[test]
    fn test_inclusive_bounds() {
        let node = FloatNode::new().min(0.0).max(10.0);

        assert!(node.validate(&json!(0), &Position::document()).is_success());
        assert!(node.validate(&json!(10), &Position::document()).is_success());

        let errors = unwrap_failure(node.validate(&json!(-1), &Position::document()));
        assert_eq!(errors.first().code, "min");

        let errors = unwrap_failure(node.validate(&json!(12), &Position::document()));
        assert_eq!(errors.first().code, "max");
    }

    #[test]
    fn test_exclusive_bounds() {
        let node = FloatNode::new().strict_min(0.0).strict_max(1.0);

        assert!(node.validate(&json!(0.5), &Position::document()).is_success());

        let errors = unwrap_failure(node.validate(&json!(0), &Position::document()));
        assert_eq!(errors.first().code, "strict_min");

        let errors = unwrap_failure(node.validate(&json!(1), &Position::document()));
        assert_eq!(errors.first().code, "strict_max");
    }

    #[test]
    fn test_first_failure_wins() {
        let node = FloatNode::new().min(5.0).strict_min(6.0);
        let errors = unwrap_failure(node.validate(&json!(1), &Position::document()));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().code, "min");
    }

    #[test]
    fn test_decode_attributes() {
        let node: FloatNode =
            serde_json::from_value(json!({"type": "float", "min": 0, "strictMax": 2.5})).unwrap();
        assert!(node.validate(&json!(2.4), &Position::document()).is_success());
        assert!(node.validate(&json!(2.5), &Position::document()).is_failure());
        assert!(!node.is_required());
    }
}
