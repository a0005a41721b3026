// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Old-schema accounts carry no type tag. The kind is inferred from which
//! fields are present, checking the most specific shapes first.

use serde_json::{Map, Value};
use strum::Display;

use super::v36::{BASE_ACCOUNT, BASE_VESTING_ACCOUNT, PERIODIC_VESTING_ACCOUNT};
use crate::shim::crypto::MULTISIG_PUBKEY_TYPE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum AccountKind {
    ValidatorVesting,
    PeriodicVesting,
    ContinuousVesting,
    DelayedVesting,
    Module,
    Multisig,
    Base,
}

type ShapePredicate = fn(&Map<String, Value>) -> Option<AccountKind>;

/// First match wins. A predicate may assume every earlier one returned `None`.
const DETECTION_ORDER: [ShapePredicate; 5] = [
    validator_vesting,
    vesting,
    module,
    multisig,
    base,
];

/// Returns `None` if `account` is not an object or matches no known shape.
pub fn detect(account: &Value) -> Option<AccountKind> {
    let fields = account.as_object()?;
    DETECTION_ORDER
        .iter()
        .find_map(|predicate| predicate(fields))
}

/// Best-effort lookup of the account address through any nesting, for error reports.
pub fn locate_address(account: &Value) -> Option<String> {
    const EMBEDDED: [&str; 3] = [PERIODIC_VESTING_ACCOUNT, BASE_VESTING_ACCOUNT, BASE_ACCOUNT];

    let fields = account.as_object()?;
    if let Some(Value::String(address)) = fields.get("address") {
        return Some(address.clone());
    }
    EMBEDDED
        .iter()
        .find_map(|key| fields.get(*key))
        .and_then(locate_address)
}

fn validator_vesting(fields: &Map<String, Value>) -> Option<AccountKind> {
    (fields.contains_key("validator_address") || fields.contains_key(PERIODIC_VESTING_ACCOUNT))
        .then_some(AccountKind::ValidatorVesting)
}

fn vesting(fields: &Map<String, Value>) -> Option<AccountKind> {
    if !fields.contains_key(BASE_VESTING_ACCOUNT) {
        return None;
    }
    Some(if fields.contains_key("vesting_periods") {
        AccountKind::PeriodicVesting
    } else if fields.contains_key("start_time") {
        AccountKind::ContinuousVesting
    } else {
        AccountKind::DelayedVesting
    })
}

fn module(fields: &Map<String, Value>) -> Option<AccountKind> {
    (fields.contains_key("name") || fields.contains_key("permissions"))
        .then_some(AccountKind::Module)
}

fn multisig(fields: &Map<String, Value>) -> Option<AccountKind> {
    let key_type = fields
        .get("public_key")
        .and_then(|key| key.get("type"))
        .and_then(Value::as_str);
    (key_type == Some(MULTISIG_PUBKEY_TYPE)).then_some(AccountKind::Multisig)
}

fn base(fields: &Map<String, Value>) -> Option<AccountKind> {
    fields.contains_key("address").then_some(AccountKind::Base)
}
