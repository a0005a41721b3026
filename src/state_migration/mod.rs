// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Application-state migration. Each module with a schema change has its own
//! migrator; every other module is copied through as raw bytes.

pub mod auth;
pub(crate) mod common;
pub mod distribution;
mod errors;
pub mod slashing;
pub mod staking;

use std::time::Instant;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, value::RawValue};
use serde_with::{MapPreventDuplicates, serde_as};
use tracing::{debug, info};

pub use self::common::{MigratedModule, ModuleMigrator, SplitDocument};
pub use self::errors::MigrationError;

/// Module name to serialized module document, in insertion order. A module
/// name appearing twice in the input is a decode error.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, derive_more::From, derive_more::Into)]
#[serde(transparent)]
pub struct Snapshot(#[serde_as(as = "MapPreventDuplicates<_, _>")] IndexMap<String, Box<RawValue>>);

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, MigrationError> {
        serde_json::from_str(json).map_err(|e| MigrationError::decode("app_state", e))
    }

    pub fn to_json(&self) -> Result<String, MigrationError> {
        serde_json::to_string(self).map_err(|e| MigrationError::encode("app_state", e))
    }

    /// Inserts a module document, serializing `document` to raw JSON.
    pub fn insert<T: Serialize>(&mut self, module: &str, document: &T) -> Result<(), MigrationError> {
        let raw = serde_json::value::to_raw_value(document)
            .map_err(|e| MigrationError::encode(module, e))?;
        self.0.insert(module.into(), raw);
        Ok(())
    }

    pub fn insert_raw(&mut self, module: impl Into<String>, document: Box<RawValue>) {
        self.0.insert(module.into(), document);
    }

    pub fn get(&self, module: &str) -> Option<&RawValue> {
        self.0.get(module).map(|raw| &**raw)
    }

    /// Parses one module document, if present.
    pub fn get_value(&self, module: &str) -> Result<Option<Value>, MigrationError> {
        self.get(module)
            .map(|raw| serde_json::from_str(raw.get()).map_err(|e| MigrationError::decode(module, e)))
            .transpose()
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), &**v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Explicit dispatch table from module name to its migrator.
#[derive(Debug, Clone, Default)]
pub struct MigrationRegistry {
    migrators: IndexMap<&'static str, ModuleMigrator>,
}

impl MigrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Migrators for the v0.36 to v0.38 application-state upgrade.
    pub fn v038() -> Self {
        let mut registry = Self::new();
        registry.add_migrator(auth::MODULE_NAME, auth::migrate);
        registry.add_migrator(distribution::MODULE_NAME, distribution::migrate);
        registry.add_migrator(slashing::MODULE_NAME, slashing::migrate);
        registry.add_migrator(staking::MODULE_NAME, staking::migrate);
        registry
    }

    /// Inserts a new migrator, replacing any previous one for `module`.
    pub fn add_migrator(&mut self, module: &'static str, migrator: ModuleMigrator) {
        self.migrators.insert(module, migrator);
    }

    pub fn get(&self, module: &str) -> Option<ModuleMigrator> {
        self.migrators.get(module).copied()
    }

    pub fn modules(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.migrators.keys().copied()
    }
}

/// Migrates every module of `snapshot` that has a migrator in `registry` and
/// copies the rest verbatim. Documents split off another module are merged in
/// once all modules have been visited, so the outcome does not depend on
/// input order.
#[tracing::instrument(skip_all)]
pub fn migrate_app_state(
    snapshot: &Snapshot,
    registry: &MigrationRegistry,
) -> Result<Snapshot, MigrationError> {
    let start_time = Instant::now();
    let mut out = Snapshot::new();
    let mut splits = Vec::new();

    for (module, raw) in snapshot.iter() {
        let Some(migrate) = registry.get(module) else {
            debug!("{module}: no migrator, passing through");
            out.insert_raw(module, raw.to_owned());
            continue;
        };

        let document: Value =
            serde_json::from_str(raw.get()).map_err(|e| MigrationError::decode(module, e))?;
        let MigratedModule { document, split } = migrate(document)?;
        out.insert(module, &document)?;
        info!("{module}: migrated");

        if let Some(split) = split {
            info!("{module}: split off a document for {}", split.module);
            splits.push(split);
        }
    }

    for split in splits {
        merge_split(&mut out, split)?;
    }

    info!(
        "Application state migration of {} modules took {}s",
        out.len(),
        start_time.elapsed().as_secs_f32()
    );
    Ok(out)
}

/// Creates the destination module, or adds new keys to an existing one. Never
/// overwrites a key.
fn merge_split(out: &mut Snapshot, split: SplitDocument) -> Result<(), MigrationError> {
    let SplitDocument { module, document } = split;
    let Some(existing) = out.get_value(module)? else {
        return out.insert(module, &document);
    };

    let (Value::Object(mut target), Value::Object(additions)) = (existing, document) else {
        return Err(MigrationError::MergeConflict {
            module: module.into(),
            key: "<document root>".into(),
        });
    };
    for (key, value) in additions {
        if target.contains_key(&key) {
            return Err(MigrationError::MergeConflict {
                module: module.into(),
                key,
            });
        }
        target.insert(key, value);
    }
    debug!("{module}: merged split document into existing entry");
    out.insert(module, &target)
}

#[cfg(test)]
mod tests;
