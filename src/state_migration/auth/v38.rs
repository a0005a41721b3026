// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Account layout after the upgrade: amino-tagged, with embedded structures
//! flattened into a single object.

use crate::json::{nullable_vec, stringify};
use crate::shim::{crypto::PubKey, econ::Coins};
use serde::{Deserialize, Serialize};

pub use super::v36::{CurrentPeriodProgress, Period, VestingProgress};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Account {
    #[serde(rename = "cosmos-sdk/Account")]
    Base(BaseAccount),
    #[serde(rename = "cosmos-sdk/ModuleAccount")]
    Module(ModuleAccount),
    #[serde(rename = "cosmos-sdk/DelayedVestingAccount")]
    DelayedVesting(DelayedVestingAccount),
    #[serde(rename = "cosmos-sdk/ContinuousVestingAccount")]
    ContinuousVesting(ContinuousVestingAccount),
    #[serde(rename = "cosmos-sdk/PeriodicVestingAccount")]
    PeriodicVesting(PeriodicVestingAccount),
    #[serde(rename = "cosmos-sdk/ValidatorVestingAccount")]
    ValidatorVesting(ValidatorVestingAccount),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseAccount {
    pub address: String,
    #[serde(with = "nullable_vec", default)]
    pub coins: Coins,
    #[serde(default)]
    pub public_key: Option<PubKey>,
    #[serde(with = "stringify")]
    pub account_number: u64,
    #[serde(with = "stringify")]
    pub sequence: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleAccount {
    #[serde(flatten)]
    pub base_account: BaseAccount,
    pub name: String,
    #[serde(with = "nullable_vec", default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseVestingAccount {
    #[serde(flatten)]
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
pub struct DelayedVestingAccount {
    #[serde(flatten)]
    pub base_vesting_account: BaseVestingAccount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousVestingAccount {
    #[serde(flatten)]
    pub base_vesting_account: BaseVestingAccount,
    #[serde(with = "stringify")]
    pub start_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicVestingAccount {
    #[serde(flatten)]
    pub base_vesting_account: BaseVestingAccount,
    #[serde(with = "stringify")]
    pub start_time: i64,
    #[serde(with = "nullable_vec", default)]
    pub vesting_periods: Vec<Period>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorVestingAccount {
    #[serde(flatten)]
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
