// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Genesis export migration for the kava v0.8 chain upgrade.
//!
//! - [`migrate_app_state`] rewrites the application state, module by module.
//! - [`genesis::migrate_genesis_doc`] rewrites the consensus genesis document
//!   that wraps it.

mod config;
pub mod genesis;
mod json;
pub mod shim;
pub mod state_migration;

pub use config::{DEFAULT_EVIDENCE_MAX_AGE_DURATION, MigrationConfig, read_toml};
pub use genesis::migrate_genesis_doc;
pub use state_migration::{
    MigratedModule, MigrationError, MigrationRegistry, ModuleMigrator, Snapshot, SplitDocument,
    migrate_app_state,
};
