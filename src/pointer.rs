//! Slash-delimited pointer traversal for routing patches.
//!
//! [`PointerCursor`] walks a patch path one `/segment` at a time. It borrows the
//! path and never allocates unless a segment contains an RFC 6901 escape.

use std::borrow::Cow;

/// Errors raised while consuming a pointer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PointerError {
    /// The remaining pointer is non-empty but does not start with `/`.
    #[error("invalid patch path '{0}'")]
    Malformed(String),

    /// `next_segment` was called on a cursor already at the root.
    #[error("patch path has no segments left")]
    Exhausted,
}

/// A read-only cursor over the unconsumed part of a patch path.
///
/// # Example
///
/// ```rust
/// use patchwarden::PointerCursor;
///
/// let cursor = PointerCursor::new("/decks/0/name");
/// let (segment, rest) = cursor.next_segment().unwrap();
/// assert_eq!(segment, "decks");
/// assert_eq!(rest.as_str(), "/0/name");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerCursor<'a> {
    rest: &'a str,
}

impl<'a> PointerCursor<'a> {
    /// Creates a cursor positioned at the start of `pointer`.
    pub fn new(pointer: &'a str) -> Self {
        Self { rest: pointer }
    }

    /// Returns true if nothing is left to consume.
    pub fn is_root(&self) -> bool {
        self.rest.is_empty()
    }

    /// Returns the unconsumed pointer.
    pub fn as_str(&self) -> &'a str {
        self.rest
    }

    /// Consumes the leading `/segment`.
    ///
    /// Returns the unescaped segment and a cursor over the remainder, which
    /// keeps its own leading `/` or is empty. `"/"` yields the empty segment.
    pub fn next_segment(&self) -> Result<(Cow<'a, str>, PointerCursor<'a>), PointerError> {
        if self.rest.is_empty() {
            return Err(PointerError::Exhausted);
        }

        let body = self
            .rest
            .strip_prefix('/')
            .ok_or_else(|| PointerError::Malformed(self.rest.to_string()))?;

        let (segment, rest) = match body.find('/') {
            Some(idx) => (&body[..idx], &body[idx..]),
            None => (body, ""),
        };

        Ok((unescape_component(segment), PointerCursor { rest }))
    }
}

/// Unescapes a pointer component (`~1` → `/`, then `~0` → `~`).
fn unescape_component(component: &str) -> Cow<'_, str> {
    if !component.contains('~') {
        return Cow::Borrowed(component);
    }
    Cow::Owned(component.replace("~1", "/").replace("~0", "~"))
}
