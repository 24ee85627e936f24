//! Schema compilation.
//!
//! [`SchemaCompiler`] turns a schema document into a [`RootValidator`] in two
//! phases. The decode phase reads a fragment's `type` and its attributes into
//! a raw form whose nested fragments are still JSON. The initialize phase
//! compiles those nested fragments and regular expressions. Custom types are
//! compiled into a name table first; references to them keep only the name,
//! so recursive and forward references never recurse at compile time.

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::custom_types::{is_builtin, CustomTypes};
use crate::error::CompileError;
use crate::schema::{
    AnyNode, ArrayAttributes, CustomRefAttributes, FloatNode, ObjectAttributes, StringAttributes,
    ValidatorNode,
};
use crate::validator::RootValidator;

/// Default limit on nested custom type references during one validation.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Compiles schema documents into validators.
///
/// # Example
///
/// ```rust
/// use patchwarden::SchemaCompiler;
///
/// let validator = SchemaCompiler::new()
///     .with_max_depth(32)
///     .compile(br#"{"type": "string", "maxChars": 20}"#)
///     .unwrap();
///
/// assert_eq!(validator.max_depth(), 32);
/// ```
#[derive(Debug, Clone)]
pub struct SchemaCompiler {
    max_depth: usize,
    parallel_patches: bool,
}

impl Default for SchemaCompiler {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            parallel_patches: false,
        }
    }
}

impl SchemaCompiler {
    /// Creates a compiler with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum custom type reference depth.
    ///
    /// When validating recursive schemas, a value nested deeper than this
    /// many references fails with a `max_depth_exceeded` error.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets whether patch lists are validated on the rayon thread pool.
    ///
    /// Off by default. Error order follows patch order either way.
    pub fn with_parallel_patches(mut self, parallel: bool) -> Self {
        self.parallel_patches = parallel;
        self
    }

    /// Compiles a schema from raw JSON bytes.
    pub fn compile(&self, bytes: &[u8]) -> Result<RootValidator, CompileError> {
        let schema: Value = serde_json::from_slice(bytes).map_err(CompileError::Json)?;
        self.compile_value(&schema)
    }

    /// Compiles an already-decoded schema document.
    #[instrument(skip_all, level = "debug")]
    pub fn compile_value(&self, schema: &Value) -> Result<RootValidator, CompileError> {
        let definitions = match schema.get("customTypes") {
            None => None,
            Some(Value::Object(definitions)) => Some(definitions),
            Some(_) => return Err(CompileError::InvalidCustomTypes),
        };

        let mut declared = IndexSet::new();
        for name in definitions.into_iter().flat_map(|d| d.keys()) {
            if is_builtin(name) {
                return Err(CompileError::ReservedTypeName(name.clone()));
            }
            declared.insert(name.clone());
        }

        let scope = CompileScope {
            custom_types: &declared,
        };

        let mut types = IndexMap::with_capacity(declared.len());
        for (name, fragment) in definitions.into_iter().flatten() {
            types.insert(name.clone(), scope.compile(fragment)?);
        }
        let custom_types = CustomTypes::new(types);

        if let Some(name) = custom_types.find_alias_cycle() {
            return Err(CompileError::CyclicAlias(name.to_string()));
        }

        let root = scope.compile(schema)?;
        debug!(
            root = root.kind(),
            custom_types = custom_types.len(),
            "compiled schema"
        );

        Ok(RootValidator::new(
            root,
            custom_types,
            self.max_depth,
            self.parallel_patches,
        ))
    }
}

/// The set of custom type names visible while compiling one schema.
pub(crate) struct CompileScope<'a> {
    custom_types: &'a IndexSet<String>,
}

impl CompileScope<'_> {
    /// Compiles one schema fragment.
    pub(crate) fn compile(&self, fragment: &Value) -> Result<ValidatorNode, CompileError> {
        self.decode(fragment)?.initialize(self)
    }

    fn decode<'f>(&self, fragment: &'f Value) -> Result<RawNode<'f>, CompileError> {
        let type_name = match fragment.get("type").and_then(Value::as_str) {
            Some(name) => name,
            None => {
                return Err(CompileError::UnsupportedType {
                    found: fragment.get("type").map(Value::to_string),
                })
            }
        };

        let raw = match type_name {
            "any" => RawNode::Any(decode_attributes(type_name, fragment)?),
            "string" => RawNode::String(decode_attributes(type_name, fragment)?),
            "float" => RawNode::Float(decode_attributes(type_name, fragment)?),
            "array" => RawNode::Array(decode_attributes(type_name, fragment)?),
            "object" => RawNode::Object(decode_attributes(type_name, fragment)?),
            name if self.custom_types.contains(name) => {
                RawNode::CustomRef(name, decode_attributes(type_name, fragment)?)
            }
            other => {
                return Err(CompileError::UnsupportedType {
                    found: Some(other.to_string()),
                })
            }
        };

        Ok(raw)
    }
}

/// A decoded fragment whose children are not yet compiled.
enum RawNode<'f> {
    Any(AnyNode),
    String(StringAttributes),
    Float(FloatNode),
    Array(ArrayAttributes),
    Object(ObjectAttributes),
    CustomRef(&'f str, CustomRefAttributes),
}

impl RawNode<'_> {
    fn initialize(self, scope: &CompileScope<'_>) -> Result<ValidatorNode, CompileError> {
        let node = match self {
            RawNode::Any(node) => ValidatorNode::Any(node),
            RawNode::String(attributes) => ValidatorNode::String(attributes.initialize()?),
            RawNode::Float(node) => ValidatorNode::Float(node),
            RawNode::Array(attributes) => ValidatorNode::Array(attributes.initialize(scope)?),
            RawNode::Object(attributes) => ValidatorNode::Object(attributes.initialize(scope)?),
            RawNode::CustomRef(name, attributes) => {
                ValidatorNode::CustomRef(attributes.initialize(name))
            }
        };
        Ok(node)
    }
}

fn decode_attributes<'f, T: Deserialize<'f>>(
    type_name: &str,
    fragment: &'f Value,
) -> Result<T, CompileError> {
    T::deserialize(fragment).map_err(|source| CompileError::InvalidAttributes {
        type_name: type_name.to_string(),
        source,
    })
}
