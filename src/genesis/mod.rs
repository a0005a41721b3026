// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Migration of the consensus-layer genesis document. Validators and block
//! limits are carried over as they are; the evidence parameters are reshaped.
//! The embedded application state is passed through byte for byte, its
//! migration is [`crate::state_migration::migrate_app_state`]'s job.

pub mod v032;
pub mod v033;

use chrono::{DateTime, SecondsFormat};
use serde_json::error::Category;
use tracing::{info, warn};

use crate::config::MigrationConfig;
use crate::state_migration::MigrationError;

pub const DOCUMENT_NAME: &str = "genesis";

impl v032::GenesisDoc {
    /// Parses an old-schema genesis document. Syntax errors are
    /// [`MigrationError::Decode`], shape errors are [`MigrationError::MalformedDocument`].
    pub fn from_json(json: &str) -> Result<Self, MigrationError> {
        serde_json::from_str(json).map_err(|e| match e.classify() {
            Category::Data => MigrationError::malformed(DOCUMENT_NAME, e.to_string()),
            Category::Io | Category::Syntax | Category::Eof => {
                MigrationError::decode(DOCUMENT_NAME, e)
            }
        })
    }
}

impl v033::GenesisDoc {
    pub fn to_json(&self) -> Result<String, MigrationError> {
        serde_json::to_string(self).map_err(|e| MigrationError::encode(DOCUMENT_NAME, e))
    }

    pub fn to_json_pretty(&self) -> Result<String, MigrationError> {
        serde_json::to_string_pretty(self).map_err(|e| MigrationError::encode(DOCUMENT_NAME, e))
    }
}

/// Reads an old-schema genesis document and returns the new-schema one, both as JSON.
#[tracing::instrument(skip_all)]
pub fn migrate_genesis_doc(json: &str, config: &MigrationConfig) -> Result<String, MigrationError> {
    let old = v032::GenesisDoc::from_json(json)?;
    migrate(old, config)?.to_json()
}

pub fn migrate(
    from: v032::GenesisDoc,
    config: &MigrationConfig,
) -> Result<v033::GenesisDoc, MigrationError> {
    let v032::GenesisDoc {
        genesis_time,
        chain_id,
        consensus_params,
        validators,
        app_hash,
        app_state,
    } = from;

    if DateTime::parse_from_rfc3339(&genesis_time).is_err() {
        return Err(MigrationError::malformed(
            DOCUMENT_NAME,
            format!("`genesis_time` is not an RFC 3339 timestamp: {genesis_time:?}"),
        ));
    }
    if chain_id.is_empty() {
        return Err(MigrationError::malformed(DOCUMENT_NAME, "`chain_id` is empty"));
    }
    if let Some(validator) = validators.iter().find(|v| v.power <= 0) {
        return Err(MigrationError::MalformedDocument {
            module: DOCUMENT_NAME.into(),
            address: Some(validator.address.clone()),
            reason: format!("validator {:?} has no voting power", validator.name),
        });
    }

    let max_age_duration = i64::try_from(config.evidence_max_age_duration.as_nanos())
        .map_err(|_| {
            MigrationError::malformed(
                DOCUMENT_NAME,
                "configured evidence max age duration does not fit in 64 bits of nanoseconds",
            )
        })?;
    let v032::ConsensusParams {
        block,
        evidence,
        validator,
    } = consensus_params;
    let consensus_params = v033::ConsensusParams {
        block,
        evidence: v033::EvidenceParams {
            max_age_num_blocks: evidence.max_age,
            max_age_duration,
        },
        validator,
    };

    let chain_id = match &config.chain_id {
        Some(new_chain_id) => {
            warn!("Replacing chain ID {chain_id} with {new_chain_id}");
            new_chain_id.clone()
        }
        None => chain_id,
    };
    let genesis_time = match &config.genesis_time {
        Some(new_time) => {
            let new_time = new_time.to_rfc3339_opts(SecondsFormat::AutoSi, true);
            warn!("Replacing genesis time {genesis_time} with {new_time}");
            new_time
        }
        None => genesis_time,
    };

    info!(
        "Migrated genesis of {chain_id} with {} validators",
        validators.len()
    );
    Ok(v033::GenesisDoc {
        genesis_time,
        chain_id,
        consensus_params,
        validators,
        app_hash,
        app_state,
    })
}
