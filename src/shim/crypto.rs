// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::json::{base64_standard, stringify};
use serde::{Deserialize, Serialize};

pub const SECP256K1_PUBKEY_TYPE: &str = "tendermint/PubKeySecp256k1";
pub const ED25519_PUBKEY_TYPE: &str = "tendermint/PubKeyEd25519";
pub const MULTISIG_PUBKEY_TYPE: &str = "tendermint/PubKeyMultisigThreshold";

/// A public key in its amino JSON envelope: `{"type": ..., "value": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PubKey {
    #[serde(rename = "tendermint/PubKeySecp256k1")]
    Secp256k1(#[serde(with = "base64_standard")] Vec<u8>),
    #[serde(rename = "tendermint/PubKeyEd25519")]
    Ed25519(#[serde(with = "base64_standard")] Vec<u8>),
    #[serde(rename = "tendermint/PubKeyMultisigThreshold")]
    MultisigThreshold(MultisigThresholdPubKey),
}

impl PubKey {
    pub fn is_multisig(&self) -> bool {
        matches!(self, PubKey::MultisigThreshold(_))
    }
}

/// A k-of-n threshold key. The order of `pubkeys` feeds address derivation
/// and must never change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultisigThresholdPubKey {
    #[serde(with = "stringify")]
    pub threshold: u64,
    pub pubkeys: Vec<PubKey>,
}

impl MultisigThresholdPubKey {
    /// Checks `1 <= threshold <= pubkeys.len()`, recursing into nested multisig keys.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.pubkeys.len() as u64;
        if self.threshold == 0 || self.threshold > n {
            return Err(format!(
                "multisig threshold {} out of range for {n} keys",
                self.threshold
            ));
        }
        for key in &self.pubkeys {
            if let PubKey::MultisigThreshold(inner) = key {
                inner.validate()?;
            }
        }
        Ok(())
    }
}
