// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use crate::config::MigrationConfig;
use crate::genesis::migrate_genesis_doc;
use pretty_assertions::assert_eq;
use quickcheck_macros::quickcheck;
use rstest::rstest;
use serde_json::json;

fn raw(json: &str) -> Box<RawValue> {
    RawValue::from_string(json.to_owned()).unwrap()
}

fn snapshot_of(modules: &[(&str, &str)]) -> Snapshot {
    let mut snapshot = Snapshot::new();
    for (module, json) in modules {
        snapshot.insert_raw(*module, raw(json));
    }
    snapshot
}

fn parse(json: &str) -> Value {
    serde_json::from_str(json).unwrap()
}

#[rstest]
#[case::auth_base(
    "auth",
    include_str!("testdata/auth-base-old.json"),
    include_str!("testdata/auth-base-new.json")
)]
#[case::auth_multisig(
    "auth",
    include_str!("testdata/auth-multisig-old.json"),
    include_str!("testdata/auth-multisig-new.json")
)]
#[case::auth_module(
    "auth",
    include_str!("testdata/auth-module-old.json"),
    include_str!("testdata/auth-module-new.json")
)]
#[case::auth_delayed_and_continuous(
    "auth",
    include_str!("testdata/auth-vesting-old.json"),
    include_str!("testdata/auth-vesting-new.json")
)]
#[case::auth_periodic(
    "auth",
    include_str!("testdata/auth-periodic-old.json"),
    include_str!("testdata/auth-periodic-new.json")
)]
#[case::auth_validator_vesting(
    "auth",
    include_str!("testdata/auth-valvesting-old.json"),
    include_str!("testdata/auth-valvesting-new.json")
)]
#[case::distribution(
    "distribution",
    include_str!("testdata/distribution-old.json"),
    include_str!("testdata/distribution-new.json")
)]
#[case::staking(
    "staking",
    include_str!("testdata/staking-old.json"),
    include_str!("testdata/staking-new.json")
)]
#[case::slashing(
    "slashing",
    include_str!("testdata/slashing-old.json"),
    include_str!("testdata/slashing-new.json")
)]
fn module_matches_golden(#[case] module: &str, #[case] old: &str, #[case] expected: &str) {
    let migrated =
        migrate_app_state(&snapshot_of(&[(module, old)]), &MigrationRegistry::v038()).unwrap();
    assert_eq!(migrated.get_value(module).unwrap(), Some(parse(expected)));
}

#[test]
fn slashing_seeds_evidence() {
    let snapshot = snapshot_of(&[("slashing", include_str!("testdata/slashing-old.json"))]);
    let migrated = migrate_app_state(&snapshot, &MigrationRegistry::v038()).unwrap();
    assert_eq!(
        migrated.modules().collect::<Vec<_>>(),
        vec!["slashing", "evidence"]
    );
    assert_eq!(
        migrated.get_value("evidence").unwrap(),
        Some(parse(include_str!("testdata/evidence-new.json")))
    );
}

#[test]
fn no_evidence_without_slashing() {
    let snapshot = snapshot_of(&[("auth", include_str!("testdata/auth-base-old.json"))]);
    let migrated = migrate_app_state(&snapshot, &MigrationRegistry::v038()).unwrap();
    assert!(migrated.get("evidence").is_none());
}

#[test]
fn split_merges_into_existing_module() {
    let snapshot = snapshot_of(&[
        ("evidence", r#"{"note":"kept"}"#),
        ("slashing", include_str!("testdata/slashing-old.json")),
    ]);
    let migrated = migrate_app_state(&snapshot, &MigrationRegistry::v038()).unwrap();
    assert_eq!(
        migrated.get_value("evidence").unwrap(),
        Some(json!({
            "note": "kept",
            "params": { "max_evidence_age": "1814400000000000" },
            "evidence": []
        }))
    );
}

#[rstest]
#[case::colliding_key(r#"{"params":{}}"#, "params")]
#[case::not_an_object("[]", "<document root>")]
fn split_never_overwrites(#[case] existing: &str, #[case] conflicting_key: &str) {
    let snapshot = snapshot_of(&[
        ("slashing", include_str!("testdata/slashing-old.json")),
        ("evidence", existing),
    ]);
    let err = migrate_app_state(&snapshot, &MigrationRegistry::v038()).unwrap_err();
    let MigrationError::MergeConflict { module, key } = err else {
        panic!("expected a merge conflict, got {err:?}");
    };
    assert_eq!(module, "evidence");
    assert_eq!(key, conflicting_key);
}

#[test]
fn plain_account_with_untouched_siblings() {
    let snapshot = Snapshot::from_json(
        r#"{
            "auth": {
                "params": {},
                "accounts": [{
                    "address": "kava1qvsus5qg8yhre7k2c78xkkw4nvqqgev7ezrja8",
                    "coins": [{"denom": "ukava", "amount": "100"}],
                    "public_key": null,
                    "account_number": "0",
                    "sequence_number": "3"
                }]
            },
            "staking": {"validators": []},
            "mint": {"params" :  {"mint_denom":"ukava"}}
        }"#,
    )
    .unwrap();
    let migrated = migrate_app_state(&snapshot, &MigrationRegistry::v038()).unwrap();

    assert_eq!(
        migrated.get_value("auth").unwrap().unwrap()["accounts"],
        json!([{
            "type": "cosmos-sdk/Account",
            "value": {
                "address": "kava1qvsus5qg8yhre7k2c78xkkw4nvqqgev7ezrja8",
                "coins": [{"denom": "ukava", "amount": "100"}],
                "public_key": null,
                "account_number": "0",
                "sequence": "3"
            }
        }])
    );
    assert_eq!(
        migrated.get_value("staking").unwrap(),
        Some(json!({"validators": []}))
    );
    assert_eq!(
        migrated.get("mint").unwrap().get(),
        r#"{"params" :  {"mint_denom":"ukava"}}"#
    );
    assert_eq!(
        migrated.modules().collect::<Vec<_>>(),
        vec!["auth", "staking", "mint"]
    );
}

#[quickcheck]
fn modules_without_migrator_pass_through(entries: Vec<(String, Vec<u8>)>) {
    let registry = MigrationRegistry::v038();
    let mut snapshot = Snapshot::new();
    for (name, bytes) in entries {
        let module = format!("x-{name}");
        snapshot.insert_raw(module, serde_json::value::to_raw_value(&bytes).unwrap());
    }
    let migrated = migrate_app_state(&snapshot, &registry).unwrap();
    assert_eq!(migrated.len(), snapshot.len());
    for ((module, before), (migrated_module, after)) in snapshot.iter().zip(migrated.iter()) {
        assert_eq!(module, migrated_module);
        assert_eq!(before.get(), after.get());
    }
}

#[test]
fn migration_is_deterministic() {
    let snapshot = snapshot_of(&[
        ("auth", include_str!("testdata/auth-valvesting-old.json")),
        ("distribution", include_str!("testdata/distribution-old.json")),
        ("slashing", include_str!("testdata/slashing-old.json")),
        ("staking", include_str!("testdata/staking-old.json")),
    ]);
    let registry = MigrationRegistry::v038();
    let first = migrate_app_state(&snapshot, &registry).unwrap().to_json().unwrap();
    let second = migrate_app_state(&snapshot, &registry).unwrap().to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn unrecognized_account_aborts_migration() {
    let snapshot = snapshot_of(&[
        ("mint", "{}"),
        ("auth", r#"{"accounts":[{"owner":"kava1x"}]}"#),
    ]);
    let err = migrate_app_state(&snapshot, &MigrationRegistry::v038()).unwrap_err();
    assert!(
        matches!(err, MigrationError::UnrecognizedAccount { index: 0, .. }),
        "{err}"
    );
}

#[test]
fn bad_documents_are_rejected() {
    let mut snapshot = Snapshot::new();
    snapshot.insert_raw("distribution", raw("[1, 2]"));
    let err = migrate_app_state(&snapshot, &MigrationRegistry::v038()).unwrap_err();
    assert!(matches!(err, MigrationError::MalformedDocument { .. }), "{err}");

    assert!(matches!(
        Snapshot::from_json(r#"{"auth": {"#),
        Err(MigrationError::Decode { .. })
    ));
}

#[test]
fn duplicate_module_names_are_rejected() {
    let err = Snapshot::from_json(r#"{"mint": {"a": 1}, "gov": {}, "mint": {"a": 2}}"#)
        .unwrap_err();
    assert!(matches!(err, MigrationError::Decode { .. }), "{err}");

    let snapshot = Snapshot::from_json(r#"{"mint": {"a": 1}, "gov": {}}"#).unwrap();
    assert_eq!(snapshot.modules().collect::<Vec<_>>(), vec!["mint", "gov"]);
}

fn tag_mint(document: Value) -> Result<MigratedModule, MigrationError> {
    let mut state = common::into_object("mint", document)?;
    state.insert("migrated".into(), Value::Bool(true));
    Ok(MigratedModule::reshaped(Value::Object(state)))
}

#[test]
fn registry_is_substitutable() {
    let snapshot = snapshot_of(&[
        ("mint", r#"{"params":{}}"#),
        ("auth", r#"{"accounts":[{"owner":"kava1x"}]}"#),
    ]);

    let mut registry = MigrationRegistry::new();
    registry.add_migrator("mint", tag_mint);
    assert_eq!(registry.modules().collect::<Vec<_>>(), vec!["mint"]);

    let migrated = migrate_app_state(&snapshot, &registry).unwrap();
    assert_eq!(
        migrated.get_value("mint").unwrap(),
        Some(json!({ "params": {}, "migrated": true }))
    );
    assert_eq!(
        migrated.get("auth").unwrap().get(),
        r#"{"accounts":[{"owner":"kava1x"}]}"#
    );
}

#[test]
fn tendermint_genesis_matches_golden() {
    let migrated = migrate_genesis_doc(
        include_str!("testdata/tendermint-old.json"),
        &MigrationConfig::default(),
    )
    .unwrap();
    assert_eq!(
        parse(&migrated),
        parse(include_str!("testdata/tendermint-new.json"))
    );
}
