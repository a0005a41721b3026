// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Consensus genesis document before the upgrade.

use crate::json::{keep_raw, nullable_vec, stringify};
use crate::shim::crypto::PubKey;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenesisDoc {
    pub genesis_time: String,
    pub chain_id: String,
    pub consensus_params: ConsensusParams,
    #[serde(with = "nullable_vec", default)]
    pub validators: Vec<GenesisValidator>,
    #[serde(default)]
    pub app_hash: String,
    /// Application state, kept as the exact bytes it was read from.
    #[serde(
        default,
        deserialize_with = "keep_raw",
        skip_serializing_if = "Option::is_none"
    )]
    pub app_state: Option<Box<RawValue>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsensusParams {
    pub block: BlockParams,
    pub evidence: EvidenceParams,
    pub validator: ValidatorParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockParams {
    #[serde(with = "stringify")]
    pub max_bytes: i64,
    #[serde(with = "stringify")]
    pub max_gas: i64,
    #[serde(with = "stringify")]
    pub time_iota_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvidenceParams {
    /// In blocks.
    #[serde(with = "stringify")]
    pub max_age: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorParams {
    #[serde(with = "nullable_vec", default)]
    pub pub_key_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenesisValidator {
    #[serde(default)]
    pub address: String,
    pub pub_key: PubKey,
    #[serde(with = "stringify")]
    pub power: i64,
    #[serde(default)]
    pub name: String,
}
