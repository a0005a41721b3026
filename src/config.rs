// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};

/// Evidence older than this is rejected by the new consensus layer. 48 hours,
/// the upstream consensus default.
pub const DEFAULT_EVIDENCE_MAX_AGE_DURATION: Duration = Duration::from_secs(48 * 60 * 60);

/// Knobs for the consensus genesis migration. Application-state migration
/// takes no configuration.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MigrationConfig {
    /// Replaces the chain ID of the migrated genesis document.
    pub chain_id: Option<String>,
    /// Replaces the genesis time of the migrated genesis document, e.g. `"2020-03-07T15:00:00Z"`.
    pub genesis_time: Option<DateTime<Utc>>,
    /// Value for the new `evidence.max_age_duration` consensus parameter, in seconds.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub evidence_max_age_duration: Duration,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            chain_id: None,
            genesis_time: None,
            evidence_max_age_duration: DEFAULT_EVIDENCE_MAX_AGE_DURATION,
        }
    }
}

impl MigrationConfig {
    pub fn from_toml(toml_string: &str) -> anyhow::Result<Self> {
        read_toml(toml_string)
    }
}

pub fn read_toml<S>(toml_string: &str) -> anyhow::Result<S>
where
    for<'de> S: serde::de::Deserialize<'de>,
{
    let new_struct: S = toml::from_str(toml_string)?;
    Ok(new_struct)
}
