// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

/// Every error aborts the whole migration. No partial snapshot is produced.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("{module}: account #{index} ({}) matches no known account kind", .address.as_deref().unwrap_or(UNKNOWN_ADDRESS))]
    UnrecognizedAccount {
        module: String,
        index: usize,
        address: Option<String>,
    },

    #[error("{module}: malformed document ({}): {reason}", .address.as_deref().unwrap_or(UNKNOWN_ADDRESS))]
    MalformedDocument {
        module: String,
        address: Option<String>,
        reason: String,
    },

    #[error("cannot merge into {module}: key `{key}` is already present")]
    MergeConflict { module: String, key: String },

    #[error("{module}: failed to decode document: {source}")]
    Decode {
        module: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{module}: failed to encode document: {source}")]
    Encode {
        module: String,
        #[source]
        source: serde_json::Error,
    },
}

impl MigrationError {
    pub(crate) fn malformed(module: &str, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            module: module.into(),
            address: None,
            reason: reason.into(),
        }
    }

    pub(crate) fn decode(module: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            module: module.into(),
            source,
        }
    }

    pub(crate) fn encode(module: &str, source: serde_json::Error) -> Self {
        Self::Encode {
            module: module.into(),
            source,
        }
    }

    /// Attaches an account address to a [`MigrationError::MalformedDocument`]
    /// that does not carry one yet.
    pub(crate) fn at_address(self, at: Option<&str>) -> Self {
        match self {
            Self::MalformedDocument {
                module,
                address: None,
                reason,
            } => Self::MalformedDocument {
                module,
                address: at.map(str::to_owned),
                reason,
            },
            other => other,
        }
    }
}

const UNKNOWN_ADDRESS: &str = "unknown address";
