//! The compiled root validator.
//!
//! [`RootValidator`] owns the compiled schema tree and the custom type table.
//! It validates whole documents at position `$` and patch lists at
//! `Patch <index> `.

use rayon::prelude::*;
use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;
use stillwater::prelude::*;
use stillwater::Validation;
use tracing::debug;

use crate::compiler::SchemaCompiler;
use crate::custom_types::CustomTypes;
use crate::error::{CompileError, SchemaErrors, ValidateError};
use crate::patch::{decode_patches, Patch};
use crate::path::Position;
use crate::pointer::PointerCursor;
use crate::schema::ValidatorNode;
use crate::validation::ValidationContext;
use crate::ValidationResult;

/// A compiled schema, ready to validate documents and patch lists.
///
/// A `RootValidator` is immutable after compilation and can be shared across
/// threads.
///
/// # Example
///
/// ```rust
/// use patchwarden::RootValidator;
///
/// let validator = RootValidator::compile(br#"{
///     "type": "object",
///     "fields": {
///         "name": {"type": "string", "maxChars": 20},
///         "email": {"type": "string", "required": true}
///     }
/// }"#).unwrap();
///
/// assert!(validator.validate(br#"{"email": "a@b.c"}"#).is_ok());
///
/// let err = validator
///     .validate_patches(br#"[{"op": "remove", "path": "/email"}]"#)
///     .unwrap_err();
/// assert_eq!(err.to_string(), "[Patch 0 /email] cannot remove a required field");
/// ```
#[derive(Debug)]
pub struct RootValidator {
    root: ValidatorNode,
    custom_types: CustomTypes,
    max_depth: usize,
    parallel_patches: bool,
}

impl RootValidator {
    pub(crate) fn new(
        root: ValidatorNode,
        custom_types: CustomTypes,
        max_depth: usize,
        parallel_patches: bool,
    ) -> Self {
        Self {
            root,
            custom_types,
            max_depth,
            parallel_patches,
        }
    }

    /// Compiles a schema from raw bytes with default options.
    pub fn compile(bytes: &[u8]) -> Result<Self, CompileError> {
        SchemaCompiler::new().compile(bytes)
    }

    /// Compiles an already-decoded schema with default options.
    pub fn from_value(schema: &Value) -> Result<Self, CompileError> {
        SchemaCompiler::new().compile_value(schema)
    }

    /// Returns the primary schema node.
    pub fn root(&self) -> &ValidatorNode {
        &self.root
    }

    /// Returns the custom type table.
    pub fn custom_types(&self) -> &CustomTypes {
        &self.custom_types
    }

    /// Returns the maximum custom type reference depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns true if patch lists are validated in parallel.
    pub fn parallel_patches(&self) -> bool {
        self.parallel_patches
    }

    fn context(&self) -> ValidationContext<'_> {
        ValidationContext::new(&self.custom_types, self.max_depth)
    }

    /// Decodes and validates a whole document.
    pub fn validate(&self, bytes: &[u8]) -> Result<(), ValidateError> {
        let value = crate::value::decode(bytes)?;
        self.validate_value(&value).into_result()?;
        Ok(())
    }

    /// Validates an already-decoded document at position `$`.
    pub fn validate_value(&self, value: &Value) -> ValidationResult<()> {
        let result = self
            .root
            .validate(value, &Position::document(), &self.context());
        debug!(errors = error_count(&result), "validated document");
        result
    }

    /// Decodes and validates a patch list.
    pub fn validate_patches(&self, bytes: &[u8]) -> Result<(), ValidateError> {
        let patches = decode_patches(bytes)?;
        self.validate_patch_list(&patches).into_result()?;
        Ok(())
    }

    /// Validates every patch independently and gathers all failures in patch
    /// order.
    pub fn validate_patch_list(&self, patches: &[Patch]) -> ValidationResult<()> {
        let results: Vec<ValidationResult<()>> = if self.parallel_patches {
            patches
                .par_iter()
                .enumerate()
                .map(|(index, patch)| self.validate_patch(index, patch))
                .collect()
        } else {
            patches
                .iter()
                .enumerate()
                .map(|(index, patch)| self.validate_patch(index, patch))
                .collect()
        };

        let result = results
            .into_iter()
            .filter_map(|result| result.into_result().err())
            .reduce(SchemaErrors::combine)
            .map_or(Validation::Success(()), Validation::Failure);

        debug!(
            patches = patches.len(),
            errors = error_count(&result),
            "validated patch list"
        );
        result
    }

    /// Validates the patch at `index` of a patch list.
    pub fn validate_patch(&self, index: usize, patch: &Patch) -> ValidationResult<()> {
        self.root.validate_patch(
            patch,
            PointerCursor::new(&patch.path),
            &Position::patch(index),
            &self.context(),
        )
    }
}

fn error_count(result: &ValidationResult<()>) -> usize {
    match result {
        Validation::Success(()) => 0,
        Validation::Failure(errors) => errors.len(),
    }
}

impl<'de> Deserialize<'de> for RootValidator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let schema = Value::deserialize(deserializer)?;
        Self::from_value(&schema).map_err(de::Error::custom)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<RootValidator>();
    assert_sync::<RootValidator>();
};
