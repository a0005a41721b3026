// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! `max_evidence_age` leaves the slashing parameters and seeds the new
//! `evidence` module. Signing infos and missed blocks stay in slashing.

use serde_json::{Value, json};

use super::common::{MigratedModule, into_object};
use super::errors::MigrationError;

pub const MODULE_NAME: &str = "slashing";
pub const EVIDENCE_MODULE_NAME: &str = "evidence";

const MAX_EVIDENCE_AGE: &str = "max_evidence_age";

pub fn migrate(document: Value) -> Result<MigratedModule, MigrationError> {
    let mut state = into_object(MODULE_NAME, document)?;
    let params = state
        .get_mut("params")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| MigrationError::malformed(MODULE_NAME, "missing object `params`"))?;
    let max_evidence_age = params.remove(MAX_EVIDENCE_AGE).ok_or_else(|| {
        MigrationError::malformed(MODULE_NAME, format!("missing field `params.{MAX_EVIDENCE_AGE}`"))
    })?;

    let evidence = json!({
        "params": { MAX_EVIDENCE_AGE: max_evidence_age },
        "evidence": [],
    });
    Ok(MigratedModule::with_split(
        Value::Object(state),
        EVIDENCE_MODULE_NAME,
        evidence,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn max_evidence_age_moves_to_evidence() {
        let old = json!({
            "params": {
                "max_evidence_age": "120000000000",
                "signed_blocks_window": "100",
                "min_signed_per_window": "0.500000000000000000",
                "downtime_jail_duration": "600000000000",
                "slash_fraction_double_sign": "0.050000000000000000",
                "slash_fraction_downtime": "0.010000000000000000"
            },
            "signing_infos": {},
            "missed_blocks": {}
        });
        let migrated = migrate(old).unwrap();
        assert!(migrated.document["params"].get(MAX_EVIDENCE_AGE).is_none());
        assert_eq!(migrated.document["params"]["signed_blocks_window"], json!("100"));

        let split = migrated.split.unwrap();
        assert_eq!(split.module, EVIDENCE_MODULE_NAME);
        assert_eq!(
            split.document,
            json!({ "params": { "max_evidence_age": "120000000000" }, "evidence": [] })
        );
    }

    #[test]
    fn missing_max_evidence_age_is_malformed() {
        let err = migrate(json!({ "params": { "signed_blocks_window": "100" } })).unwrap_err();
        assert!(matches!(err, MigrationError::MalformedDocument { .. }));
    }
}
