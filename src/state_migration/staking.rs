// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Validator records gain a nested `commission_rates` object and a
//! `security_contact` in their description. Nothing else changes.

use serde_json::{Map, Value};

use super::common::{MigratedModule, into_object, json_type};
use super::errors::MigrationError;

pub const MODULE_NAME: &str = "staking";

const COMMISSION_RATE_KEYS: [&str; 3] = ["rate", "max_rate", "max_change_rate"];

pub fn migrate(document: Value) -> Result<MigratedModule, MigrationError> {
    let mut state = into_object(MODULE_NAME, document)?;
    match state.get_mut("validators") {
        None | Some(Value::Null) => {}
        Some(Value::Array(validators)) => {
            for validator in validators.iter_mut() {
                let operator = validator
                    .get("operator_address")
                    .and_then(Value::as_str)
                    .map(str::to_owned);
                migrate_validator(validator)
                    .map_err(|e| e.at_address(operator.as_deref()))?;
            }
        }
        Some(other) => {
            return Err(MigrationError::malformed(
                MODULE_NAME,
                format!("`validators` must be a list, found {}", json_type(other)),
            ));
        }
    }
    Ok(MigratedModule::reshaped(Value::Object(state)))
}

fn migrate_validator(validator: &mut Value) -> Result<(), MigrationError> {
    let fields = validator
        .as_object_mut()
        .ok_or_else(|| MigrationError::malformed(MODULE_NAME, "validator is not an object"))?;

    let commission = object_field(fields, "commission")?;
    if commission.contains_key("commission_rates") {
        return Err(MigrationError::malformed(
            MODULE_NAME,
            "unexpected field `commission_rates` in old-schema validator",
        ));
    }
    let mut rates = Map::new();
    for key in COMMISSION_RATE_KEYS {
        let rate = commission.remove(key).ok_or_else(|| {
            MigrationError::malformed(MODULE_NAME, format!("missing field `commission.{key}`"))
        })?;
        rates.insert(key.into(), rate);
    }
    commission.insert("commission_rates".into(), Value::Object(rates));

    object_field(fields, "description")?
        .entry("security_contact")
        .or_insert_with(|| Value::String(String::new()));

    Ok(())
}

fn object_field<'a>(
    fields: &'a mut Map<String, Value>,
    key: &str,
) -> Result<&'a mut Map<String, Value>, MigrationError> {
    fields
        .get_mut(key)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| MigrationError::malformed(MODULE_NAME, format!("missing object `{key}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn validator() -> Value {
        json!({
            "operator_address": "kavavaloper1xy7hrjy9r0algz9w3gzm8u6mrpq97kwta747gj",
            "jailed": false,
            "status": 2,
            "tokens": "1000000",
            "description": { "moniker": "node0", "identity": "", "website": "", "details": "" },
            "commission": {
                "rate": "0.100000000000000000",
                "max_rate": "0.200000000000000000",
                "max_change_rate": "0.010000000000000000",
                "update_time": "2019-11-15T14:00:00Z"
            },
            "min_self_delegation": "1"
        })
    }

    #[test]
    fn commission_rates_are_nested() {
        let migrated = migrate(json!({ "validators": [validator()], "exported": true })).unwrap();
        assert_eq!(
            migrated.document["validators"][0]["commission"],
            json!({
                "commission_rates": {
                    "rate": "0.100000000000000000",
                    "max_rate": "0.200000000000000000",
                    "max_change_rate": "0.010000000000000000"
                },
                "update_time": "2019-11-15T14:00:00Z"
            })
        );
        assert_eq!(
            migrated.document["validators"][0]["description"]["security_contact"],
            json!("")
        );
        assert_eq!(migrated.document["exported"], json!(true));
        assert_eq!(migrated.document["validators"][0]["tokens"], json!("1000000"));
    }

    #[test]
    fn existing_security_contact_is_kept() {
        let mut v = validator();
        v["description"]["security_contact"] = json!("ops@example.com");
        let migrated = migrate(json!({ "validators": [v] })).unwrap();
        assert_eq!(
            migrated.document["validators"][0]["description"]["security_contact"],
            json!("ops@example.com")
        );
    }

    #[test]
    fn empty_or_null_validators_are_unchanged() {
        for doc in [json!({ "validators": [] }), json!({ "validators": null }), json!({})] {
            assert_eq!(migrate(doc.clone()).unwrap().document, doc);
        }
    }

    #[test]
    fn missing_rate_names_the_validator() {
        let mut v = validator();
        v["commission"].as_object_mut().unwrap().remove("max_rate");
        let err = migrate(json!({ "validators": [v] })).unwrap_err();
        assert!(matches!(
            err,
            MigrationError::MalformedDocument { address: Some(a), .. }
                if a == "kavavaloper1xy7hrjy9r0algz9w3gzm8u6mrpq97kwta747gj"
        ));
    }
}
