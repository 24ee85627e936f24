//! Positions for locating errors in documents and patch lists.
//!
//! This module provides [`Position`], [`PathSegment`] and [`Origin`]. A position
//! renders in pointer style: `$/decks/0/name` for a document, or
//! `Patch 1 /decks/0/name` for the second entry of a patch list.

use std::fmt::{self, Display};

/// Where a position starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Origin {
    /// The root of a full document, rendered as `$`.
    #[default]
    Document,
    /// The target of the patch at this index, rendered as `Patch <index> `.
    Patch(usize),
}

/// A segment of a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object field (e.g. `name`)
    Field(String),
    /// An array index (e.g. `0`)
    Index(usize),
    /// The array append marker `-`
    Append,
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(&escape_component(name)),
            PathSegment::Index(idx) => write!(f, "{}", idx),
            PathSegment::Append => f.write_str("-"),
        }
    }
}

/// A location inside a document or inside the target of a patch.
///
/// `Position` is immutable: the `push_*` methods return a new position and
/// leave the original untouched, so sibling checks can share a parent.
///
/// # Example
///
/// ```rust
/// use patchwarden::Position;
///
/// let path = Position::document()
///     .push_field("decks")
///     .push_index(0)
///     .push_field("name");
///
/// assert_eq!(path.to_string(), "$/decks/0/name");
///
/// let patch = Position::patch(1).push_field("name");
/// assert_eq!(patch.to_string(), "Patch 1 /name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Position {
    origin: Origin,
    segments: Vec<PathSegment>,
}

impl Position {
    /// Creates the position of a document root.
    pub fn document() -> Self {
        Self::default()
    }

    /// Creates the root position of the patch at `index`.
    pub fn patch(index: usize) -> Self {
        Self {
            origin: Origin::Patch(index),
            segments: Vec::new(),
        }
    }

    /// Returns a new position with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new position with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    /// Returns a new position with the append marker appended.
    pub fn push_append(&self) -> Self {
        self.push(PathSegment::Append)
    }

    /// Returns a new position with `segment` appended.
    pub fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self {
            origin: self.origin,
            segments,
        }
    }

    /// Returns where this position starts.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Returns true if this is the root of a document or patch target.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this position.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this position has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the parent position, or None at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                origin: self.origin,
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.origin {
            Origin::Document => f.write_str("$")?,
            Origin::Patch(index) => write!(f, "Patch {} ", index)?,
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Escapes a field name as a pointer component (`~` → `~0`, `/` → `~1`).
pub(crate) fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}
