//! Validation context for custom type resolution.
//!
//! This module provides the [`ValidationContext`] type that carries the custom
//! type table and depth tracking during validation.

use crate::custom_types::CustomTypes;
use crate::schema::ValidatorNode;

/// Validation context carries custom type lookup and depth tracking.
///
/// ValidationContext is passed down the validation call chain to enable:
/// - Custom type resolution by name
/// - Depth tracking so a pathological schema cannot recurse without bound
///
/// The context only borrows the custom type table, so validation never
/// mutates or clones any part of the compiled schema.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    types: &'a CustomTypes,
    depth: usize,
    max_depth: usize,
}

impl<'a> ValidationContext<'a> {
    /// Creates a new validation context with a max depth limit.
    pub fn new(types: &'a CustomTypes, max_depth: usize) -> Self {
        Self {
            types,
            depth: 0,
            max_depth,
        }
    }

    /// Creates a new context with incremented depth.
    ///
    /// Called each time a custom type reference is followed.
    pub fn increment_depth(&self) -> Self {
        Self {
            types: self.types,
            depth: self.depth + 1,
            max_depth: self.max_depth,
        }
    }

    /// Returns the current depth of reference traversal.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the maximum allowed depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Looks up a custom type by name.
    pub fn resolve(&self, name: &str) -> Option<&'a ValidatorNode> {
        self.types.get(name)
    }
}
