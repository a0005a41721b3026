// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! The distribution parameters used to sit at the top level of the module
//! document. They are grouped under `params`; every other field is untouched.

use itertools::Itertools as _;
use serde_json::{Map, Value};

use super::common::{MigratedModule, into_object};
use super::errors::MigrationError;

pub const MODULE_NAME: &str = "distribution";

const PARAMS: &str = "params";
const PARAM_KEYS: [&str; 4] = [
    "community_tax",
    "base_proposer_reward",
    "bonus_proposer_reward",
    "withdraw_addr_enabled",
];

pub fn migrate(document: Value) -> Result<MigratedModule, MigrationError> {
    let mut state = into_object(MODULE_NAME, document)?;
    if state.contains_key(PARAMS) {
        return Err(MigrationError::malformed(
            MODULE_NAME,
            "unexpected field `params` in old-schema document",
        ));
    }

    let missing = PARAM_KEYS
        .iter()
        .filter(|key| !state.contains_key(**key))
        .map(|key| format!("`{key}`"))
        .join(", ");
    if !missing.is_empty() {
        return Err(MigrationError::malformed(
            MODULE_NAME,
            format!("missing fields {missing}"),
        ));
    }

    let params: Map<String, Value> = PARAM_KEYS
        .iter()
        .filter_map(|key| Some(((*key).to_owned(), state.remove(*key)?)))
        .collect();
    state.insert(PARAMS.into(), Value::Object(params));

    Ok(MigratedModule::reshaped(Value::Object(state)))
}
