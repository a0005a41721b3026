// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Consensus genesis document after the upgrade. Only the evidence
//! parameters change shape.

use crate::json::{keep_raw, nullable_vec, stringify};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

pub use super::v032::{BlockParams, GenesisValidator, ValidatorParams};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisDoc {
    pub genesis_time: String,
    pub chain_id: String,
    pub consensus_params: ConsensusParams,
    #[serde(with = "nullable_vec", default)]
    pub validators: Vec<GenesisValidator>,
    #[serde(default)]
    pub app_hash: String,
    #[serde(
        default,
        deserialize_with = "keep_raw",
        skip_serializing_if = "Option::is_none"
    )]
    pub app_state: Option<Box<RawValue>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusParams {
    pub block: BlockParams,
    pub evidence: EvidenceParams,
    pub validator: ValidatorParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceParams {
    #[serde(with = "stringify")]
    pub max_age_num_blocks: i64,
    /// In nanoseconds.
    #[serde(with = "stringify")]
    pub max_age_duration: i64,
}
