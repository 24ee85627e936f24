//! Validation error types.
//!
//! This module provides [`SchemaError`] for single constraint violations and
//! [`SchemaErrors`] for accumulating them.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::Position;

/// A single constraint violation.
///
/// `SchemaError` records where the violation happened, a human-readable
/// message, and a machine-readable code. It renders as `[<position>] <message>`.
///
/// # Example
///
/// ```rust
/// use patchwarden::{Position, SchemaError};
///
/// let error = SchemaError::new(
///     Position::document().push_field("name"),
///     "this string is longer than maxChars (20)",
/// )
/// .with_code("max_chars");
///
/// assert_eq!(error.code, "max_chars");
/// assert_eq!(
///     error.to_string(),
///     "[$/name] this string is longer than maxChars (20)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// Where the violation happened.
    pub position: Position,
    /// Human-readable error message.
    pub message: String,
    /// Machine-readable error code (e.g., `max_chars`).
    pub code: String,
}

impl SchemaError {
    /// Creates a new error at `position`.
    ///
    /// The code defaults to "validation_error".
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
            code: "validation_error".to_string(),
        }
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.position, self.message)
    }
}

impl std::error::Error for SchemaError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaError>();
    assert_sync::<SchemaError>();
};

/// A non-empty, ordered collection of validation errors.
///
/// `SchemaErrors` wraps a `NonEmptyVec<SchemaError>`, so a failure always
/// carries at least one error. Collections are combined additively with
/// [`Semigroup::combine`]; nothing is deduplicated. The rendered message is the
/// newline-joined list of the contained errors.
///
/// ```rust
/// use patchwarden::{Position, SchemaError, SchemaErrors};
/// use stillwater::prelude::*;
///
/// let errors = SchemaErrors::single(SchemaError::new(
///     Position::document(),
///     "required field 'email' is missing",
/// ))
/// .combine(SchemaErrors::single(SchemaError::new(
///     Position::document().push_field("name"),
///     "not a string",
/// )));
///
/// assert_eq!(errors.len(), 2);
/// assert_eq!(
///     errors.to_string(),
///     "[$] required field 'email' is missing\n[$/name] not a string"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors(NonEmptyVec<SchemaError>);

impl SchemaErrors {
    /// Creates a `SchemaErrors` containing a single error.
    pub fn single(error: SchemaError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `SchemaErrors` from a vec, or `None` if it is empty.
    pub fn from_vec(errors: Vec<SchemaError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.0.iter()
    }

    /// Returns all errors at the given position.
    pub fn at_position(&self, position: &Position) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| &e.position == position).collect()
    }

    /// Returns all errors with the given code.
    pub fn with_code(&self, code: &str) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the first error.
    pub fn first(&self) -> &SchemaError {
        self.0.head()
    }

    /// Returns the rendered positions of all errors, in order.
    pub fn positions(&self) -> Vec<String> {
        self.0.iter().map(|e| e.position.to_string()).collect()
    }

    /// Converts this collection into a `Vec<SchemaError>`.
    pub fn into_vec(self) -> Vec<SchemaError> {
        self.0.into_vec()
    }
}

impl Semigroup for SchemaErrors {
    fn combine(self, other: Self) -> Self {
        SchemaErrors(self.0.combine(other.0))
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a SchemaErrors {
    type Item = &'a SchemaError;
    type IntoIter = Box<dyn Iterator<Item = &'a SchemaError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaErrors>();
    assert_sync::<SchemaErrors>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_creation() {
        let error = SchemaError::new(Position::document().push_field("name"), "not a string");

        assert_eq!(error.position, Position::document().push_field("name"));
        assert_eq!(error.message, "not a string");
        assert_eq!(error.code, "validation_error");
    }

    #[test]
    fn test_schema_error_display() {
        let error = SchemaError::new(Position::patch(1).push_field("decks"), "not an array");
        assert_eq!(error.to_string(), "[Patch 1 /decks] not an array");
    }

    #[test]
    fn test_schema_errors_from_empty_vec() {
        assert!(SchemaErrors::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn test_schema_errors_combine_keeps_duplicates() {
        let error = SchemaError::new(Position::document(), "not an object");
        let combined =
            SchemaErrors::single(error.clone()).combine(SchemaErrors::single(error.clone()));

        assert_eq!(combined.len(), 2);
        assert_eq!(combined.first(), &error);
    }

    #[test]
    fn test_schema_errors_filters() {
        let name = Position::document().push_field("name");
        let errors = SchemaErrors::from_vec(vec![
            SchemaError::new(name.clone(), "not a string").with_code("invalid_type"),
            SchemaError::new(Position::document(), "field 'x' is not specified in the schema")
                .with_code("unknown_field"),
            SchemaError::new(Position::document(), "field 'y' is not specified in the schema")
                .with_code("unknown_field"),
        ])
        .unwrap();

        assert_eq!(errors.at_position(&name).len(), 1);
        assert_eq!(errors.at_position(&Position::document()).len(), 2);
        assert_eq!(errors.with_code("unknown_field").len(), 2);
        assert_eq!(errors.positions(), vec!["$/name", "$", "$"]);
    }

    #[test]
    fn test_schema_errors_display_joins_with_newlines() {
        let errors = SchemaErrors::from_vec(vec![
            SchemaError::new(Position::patch(0).push_field("name"), "too long"),
            SchemaError::new(Position::patch(2), "cannot remove a required field"),
        ])
        .unwrap();

        assert_eq!(
            errors.to_string(),
            "[Patch 0 /name] too long\n[Patch 2 ] cannot remove a required field"
        );
    }

    #[test]
    fn test_semigroup_associativity() {
        let e1 = SchemaErrors::single(SchemaError::new(Position::document(), "1"));
        let e2 = SchemaErrors::single(SchemaError::new(Position::document(), "2"));
        let e3 = SchemaErrors::single(SchemaError::new(Position::document(), "3"));

        let left = e1.clone().combine(e2.clone()).combine(e3.clone());
        let right = e1.combine(e2.combine(e3));

        let left_msgs: Vec<_> = left.iter().map(|e| &e.message).collect();
        let right_msgs: Vec<_> = right.iter().map(|e| &e.message).collect();
        assert_eq!(left_msgs, right_msgs);
    }
}
