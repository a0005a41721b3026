// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Account layout before the upgrade. Records carry no type tag, embedded
//! structures are nested under their type name, and unknown fields are
//! rejected so that nothing is dropped silently.

use crate::json::{nullable_vec, required_nullable, stringify};
use crate::shim::{crypto::PubKey, econ::Coins};
use serde::{Deserialize, Serialize};

pub const BASE_ACCOUNT: &str = "BaseAccount";
pub const BASE_VESTING_ACCOUNT: &str = "BaseVestingAccount";
pub const PERIODIC_VESTING_ACCOUNT: &str = "PeriodicVestingAccount";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaseAccount {
    pub address: String,
    #[serde(with = "nullable_vec", default)]
    pub coins: Coins,
    /// Always written, as `null` for accounts that never signed.
    #[serde(deserialize_with = "required_nullable")]
    pub public_key: Option<PubKey>,
    #[serde(with = "stringify")]
    pub account_number: u64,
    #[serde(with = "stringify")]
    pub sequence_number: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleAccount {
    #[serde(rename = "BaseAccount")]
    pub base_account: BaseAccount,
    pub name: String,
    #[serde(with = "nullable_vec", default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaseVestingAccount {
    #[serde(rename = "BaseAccount")]
    pub base_account: BaseAccount,
    #[serde(with = "nullable_vec", default)]
    pub original_vesting: Coins,
    #[serde(with = "nullable_vec", default)]
    pub delegated_free: Coins,
    #[serde(with = "nullable_vec", default)]
    pub delegated_vesting: Coins,
    #[serde(with = "stringify")]
    pub end_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelayedVestingAccount {
    #[serde(rename = "BaseVestingAccount")]
    pub base_vesting_account: BaseVestingAccount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContinuousVestingAccount {
    #[serde(rename = "BaseVestingAccount")]
    pub base_vesting_account: BaseVestingAccount,
    #[serde(with = "stringify")]
    pub start_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodicVestingAccount {
    #[serde(rename = "BaseVestingAccount")]
    pub base_vesting_account: BaseVestingAccount,
    #[serde(with = "stringify")]
    pub start_time: i64,
    #[serde(with = "nullable_vec", default)]
    pub vesting_periods: Vec<Period>,
}

/// One step of a vesting schedule. `length` is in seconds, relative to the
/// end of the previous period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Period {
    #[serde(with = "stringify")]
    pub length: i64,
    #[serde(with = "nullable_vec", default)]
    pub amount: Coins,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorVestingAccount {
    #[serde(rename = "PeriodicVestingAccount")]
    pub periodic_vesting_account: PeriodicVestingAccount,
    pub validator_address: String,
    pub return_address: String,
    #[serde(with = "stringify")]
    pub signing_threshold: i64,
    pub current_period_progress: CurrentPeriodProgress,
    #[serde(with = "nullable_vec", default)]
    pub vesting_period_progress: Vec<VestingProgress>,
    #[serde(with = "nullable_vec", default)]
    pub debt_after_failed_vesting: Coins,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurrentPeriodProgress {
    #[serde(with = "stringify")]
    pub missing_sign_count: i64,
    #[serde(with = "stringify")]
    pub total_sign_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VestingProgress {
    pub period_complete: bool,
    pub vesting_successful: bool,
}

/// Closed set of account kinds known before the upgrade.
#[derive(Debug, Clone, PartialEq)]
pub enum GenesisAccount {
    Base(BaseAccount),
    /// A [`BaseAccount`] whose key is a multisig threshold key.
    Multisig(BaseAccount),
    Module(ModuleAccount),
    DelayedVesting(DelayedVestingAccount),
    ContinuousVesting(ContinuousVestingAccount),
    PeriodicVesting(PeriodicVestingAccount),
    ValidatorVesting(ValidatorVestingAccount),
}

impl GenesisAccount {
    pub fn address(&self) -> &str {
        match self {
            GenesisAccount::Base(a) | GenesisAccount::Multisig(a) => &a.address,
            GenesisAccount::Module(a) => &a.base_account.address,
            GenesisAccount::DelayedVesting(a) => &a.base_vesting_account.base_account.address,
            GenesisAccount::ContinuousVesting(a) => &a.base_vesting_account.base_account.address,
            GenesisAccount::PeriodicVesting(a) => &a.base_vesting_account.base_account.address,
            GenesisAccount::ValidatorVesting(a) => {
                &a.periodic_vesting_account
                    .base_vesting_account
                    .base_account
                    .address
            }
        }
    }
}
