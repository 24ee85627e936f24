//! String validation.
//!
//! This module provides [`StringNode`] for validating string values with
//! length bounds, regex inclusion and exclusion, and an allowed-value set.

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{CompileError, SchemaError, SchemaErrors};
use crate::path::Position;
use crate::ValidationResult;

use super::type_mismatch;

/// The decode-phase form of a string schema.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StringAttributes {
    #[serde(default)]
    required: bool,
    max_chars: Option<usize>,
    min_chars: Option<usize>,
    regex_match: Option<String>,
    no_regex_match: Option<String>,
    allowed_values: Option<Vec<String>>,
}

impl StringAttributes {
    /// Compiles the patterns and produces the node.
    pub(crate) fn initialize(self) -> Result<StringNode, CompileError> {
        let regex_match = self
            .regex_match
            .map(|pattern| compile_pattern("regexMatch", &pattern))
            .transpose()?;
        let no_regex_match = self
            .no_regex_match
            .map(|pattern| compile_pattern("noRegexMatch", &pattern))
            .transpose()?;

        Ok(StringNode {
            required: self.required,
            max_chars: self.max_chars,
            min_chars: self.min_chars,
            regex_match,
            no_regex_match,
            allowed_values: self.allowed_values,
        })
    }
}

fn compile_pattern(attribute: &'static str, pattern: &str) -> Result<Regex, CompileError> {
    Regex::new(pattern).map_err(|source| CompileError::InvalidRegex { attribute, source })
}

/// A node for validating string values.
///
/// All constraints are optional and must hold together. They are checked in
/// a fixed order (`maxChars`, `minChars`, `regexMatch`, `noRegexMatch`,
/// `allowedValues`) and only the first failure is reported. Lengths count
/// Unicode scalar values, not bytes.
///
/// # Example
///
/// ```rust
/// use patchwarden::{Position, StringNode};
/// use serde_json::json;
///
/// let node = StringNode::new().min_chars(3).max_chars(10);
///
/// assert!(node.validate(&json!("abc"), &Position::document()).is_success());
/// assert!(node.validate(&json!("a"), &Position::document()).is_failure());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringNode {
    required: bool,
    max_chars: Option<usize>,
    min_chars: Option<usize>,
    regex_match: Option<Regex>,
    no_regex_match: Option<Regex>,
    allowed_values: Option<Vec<String>>,
}

impl StringNode {
    /// Creates an optional string node with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the value is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the maximum length in characters.
    pub fn max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        self
    }

    /// Sets the minimum length in characters.
    pub fn min_chars(mut self, min: usize) -> Self {
        self.min_chars = Some(min);
        self
    }

    /// Requires the string to match `pattern`.
    pub fn regex_match(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.regex_match = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Requires the string not to match `pattern`.
    pub fn no_regex_match(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.no_regex_match = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Restricts the string to the given values.
    pub fn allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Returns true if the value is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Validates a value against this node.
    pub fn validate(&self, value: &Value, position: &Position) -> ValidationResult<()> {
        let s = match value.as_str() {
            Some(s) => s,
            None => return type_mismatch(position, "string"),
        };

        match self.first_violation(s, position) {
            Some(error) => Validation::Failure(SchemaErrors::single(error)),
            None => Validation::Success(()),
        }
    }

    fn first_violation(&self, value: &str, position: &Position) -> Option<SchemaError> {
        let len = value.chars().count();

        if let Some(max) = self.max_chars {
            if len > max {
                return Some(
                    SchemaError::new(
                        position.clone(),
                        format!("this string is longer than maxChars ({})", max),
                    )
                    .with_code("max_chars"),
                );
            }
        }
        if let Some(min) = self.min_chars {
            if len < min {
                return Some(
                    SchemaError::new(
                        position.clone(),
                        format!("this string is shorter than minChars ({})", min),
                    )
                    .with_code("min_chars"),
                );
            }
        }
        if let Some(regex) = &self.regex_match {
            if !regex.is_match(value) {
                return Some(
                    SchemaError::new(
                        position.clone(),
                        format!("this string does not match regexMatch '{}'", regex.as_str()),
                    )
                    .with_code("regex_match"),
                );
            }
        }
        if let Some(regex) = &self.no_regex_match {
            if regex.is_match(value) {
                return Some(
                    SchemaError::new(
                        position.clone(),
                        format!("this string matches noRegexMatch '{}'", regex.as_str()),
                    )
                    .with_code("no_regex_match"),
                );
            }
        }
        if let Some(allowed) = &self.allowed_values {
            if !allowed.iter().any(|candidate| candidate == value) {
                return Some(
                    SchemaError::new(position.clone(), "this string is not one of the allowed values")
                        .with_code("allowed_values"),
                );
            }
        }

        None
    }
}
