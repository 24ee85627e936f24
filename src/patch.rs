//! Patch operations.
//!
//! A patch list is a JSON array of `{ "op", "path", "value"? }` objects. Only
//! the shape is checked here; routing and validation happen in the schema.

use std::fmt::{self, Display};

use serde_json::Value;

use crate::error::DecodeError;

static NULL: Value = Value::Null;

/// The operation a patch performs.
///
/// `remove` is the only operation with special meaning to the validator; every
/// other operation validates its value at the target position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatchOp {
    /// `add`
    Add,
    /// `replace`
    Replace,
    /// `remove`
    Remove,
    /// Any other operation name, passed through unchanged.
    Other(String),
}

impl PatchOp {
    /// Returns true for `remove`.
    pub fn is_remove(&self) -> bool {
        matches!(self, PatchOp::Remove)
    }

    /// Returns the operation name.
    pub fn as_str(&self) -> &str {
        match self {
            PatchOp::Add => "add",
            PatchOp::Replace => "replace",
            PatchOp::Remove => "remove",
            PatchOp::Other(name) => name,
        }
    }
}

impl From<&str> for PatchOp {
    fn from(name: &str) -> Self {
        match name {
            "add" => PatchOp::Add,
            "replace" => PatchOp::Replace,
            "remove" => PatchOp::Remove,
            other => PatchOp::Other(other.to_string()),
        }
    }
}

impl Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a patch list.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// The operation.
    pub op: PatchOp,
    /// The target pointer; `""` is the document root.
    pub path: String,
    /// The operation's value, if one was given.
    pub value: Option<Value>,
}

impl Patch {
    /// Creates a patch.
    pub fn new(op: impl Into<PatchOp>, path: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            op: op.into(),
            path: path.into(),
            value,
        }
    }

    /// Returns true if the patch targets the document root.
    pub fn is_root_position(&self) -> bool {
        self.path.is_empty()
    }

    /// Returns the value to validate; an absent value is `null`.
    pub fn value_or_null(&self) -> &Value {
        self.value.as_ref().unwrap_or(&NULL)
    }

    /// Decodes the patch at `index` of a patch list.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, DecodeError> {
        let entry = value
            .as_object()
            .ok_or(DecodeError::PatchNotObject { index })?;

        let op = string_field(entry, index, "op")?;
        let path = string_field(entry, index, "path")?;

        Ok(Self {
            op: PatchOp::from(op),
            path: path.to_string(),
            value: entry.get("value").cloned(),
        })
    }
}

fn string_field<'a>(
    entry: &'a serde_json::Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<&'a str, DecodeError> {
    entry
        .get(field)
        .ok_or(DecodeError::MissingPatchField { index, field })?
        .as_str()
        .ok_or(DecodeError::PatchFieldNotString { index, field })
}

/// Decodes a patch list from raw bytes.
///
/// # Example
///
/// ```rust
/// use patchwarden::{decode_patches, PatchOp};
///
/// let patches = decode_patches(br#"[
///     { "op": "add", "path": "/name", "value": "Giorgio" },
///     { "op": "remove", "path": "/name" }
/// ]"#).unwrap();
///
/// assert_eq!(patches.len(), 2);
/// assert_eq!(patches[1].op, PatchOp::Remove);
/// assert!(patches[1].value.is_none());
/// ```
pub fn decode_patches(bytes: &[u8]) -> Result<Vec<Patch>, DecodeError> {
    let value = crate::value::decode(bytes)?;
    patches_from_value(&value)
}

/// Decodes a patch list from an already-decoded value.
pub fn patches_from_value(value: &Value) -> Result<Vec<Patch>, DecodeError> {
    value
        .as_array()
        .ok_or(DecodeError::PatchListNotArray)?
        .iter()
        .enumerate()
        .map(|(index, entry)| Patch::from_value(index, entry))
        .collect()
}
