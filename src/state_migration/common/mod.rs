// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Common code that's shared across all migration code.
//! Each module's migration lives in its own module.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use super::errors::MigrationError;

/// Migrates one module document. The input is the old-schema document, the
/// output is the new-schema document plus, for modules whose state is split,
/// a document destined for another module.
pub type ModuleMigrator = fn(Value) -> Result<MigratedModule, MigrationError>;

/// Output of a [`ModuleMigrator`].
#[derive(Debug, Clone, PartialEq)]
pub struct MigratedModule {
    /// New document for the module that was migrated.
    pub document: Value,
    /// Document to be merged into another module, e.g. `evidence` carved out of `slashing`.
    pub split: Option<SplitDocument>,
}

impl MigratedModule {
    pub fn reshaped(document: Value) -> Self {
        Self {
            document,
            split: None,
        }
    }

    pub fn with_split(document: Value, module: &'static str, split: Value) -> Self {
        Self {
            document,
            split: Some(SplitDocument {
                module,
                document: split,
            }),
        }
    }
}

/// A document produced for a module other than the one being migrated.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitDocument {
    pub module: &'static str,
    pub document: Value,
}

/// Trait that migrates from one data structure to another, similar to
/// [`std::convert::TryInto`] but with the migration's own error type.
pub(crate) trait TypeMigration<From, To> {
    fn migrate_type(from: From) -> Result<To, MigrationError>;
}

/// Type that implements [`TypeMigration`] for different type pairs. Prefer
/// using a single `struct` so that the compiler could catch duplicate
/// implementations
pub(crate) struct TypeMigrator;

/// Reads a well-formed JSON value as `T`. Shape mismatches are reported as
/// [`MigrationError::MalformedDocument`].
pub(crate) fn decode<T: DeserializeOwned>(module: &str, value: Value) -> Result<T, MigrationError> {
    serde_json::from_value(value).map_err(|e| MigrationError::malformed(module, e.to_string()))
}

pub(crate) fn encode<T: Serialize>(module: &str, value: &T) -> Result<Value, MigrationError> {
    serde_json::to_value(value).map_err(|e| MigrationError::encode(module, e))
}

/// Module documents are JSON objects; anything else is malformed.
pub(crate) fn into_object(module: &str, value: Value) -> Result<Map<String, Value>, MigrationError> {
    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(MigrationError::malformed(
            module,
            format!("expected an object, found {}", json_type(&other)),
        )),
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
