// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::json::stringify;
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, de};

/// A single typed amount, e.g. `{"denom": "ukava", "amount": "100"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Coin {
    pub denom: String,
    #[serde(
        serialize_with = "stringify::serialize",
        deserialize_with = "canonical_amount"
    )]
    pub amount: BigUint,
}

/// Accepts only the form an amount is written back in: ASCII digits with no
/// leading zero, so that every amount survives migration unchanged.
fn canonical_amount<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = String::deserialize(deserializer)?;
    let canonical = !amount.is_empty()
        && amount.bytes().all(|b| b.is_ascii_digit())
        && (amount == "0" || !amount.starts_with('0'));
    if !canonical {
        return Err(de::Error::invalid_value(
            de::Unexpected::Str(&amount),
            &"a decimal integer without sign, separators or leading zeros",
        ));
    }
    amount.parse().map_err(de::Error::custom)
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<BigUint>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

/// A multiset of [`Coin`]s. Order is kept as found on the wire.
pub type Coins = Vec<Coin>;
