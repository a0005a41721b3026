// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Migration of the `auth` module. Every record in `accounts` is classified by
//! shape, decoded strictly, and re-encoded in the tagged, flattened layout.
//! All other keys of the document pass through untouched.

mod account;
pub mod detect;
pub mod v36;
pub mod v38;

use serde_json::Value;
use tracing::debug;

use self::detect::{AccountKind, detect, locate_address};
use super::common::{MigratedModule, TypeMigration, TypeMigrator, decode, encode, into_object};
use super::errors::MigrationError;

pub const MODULE_NAME: &str = "auth";

const ACCOUNTS: &str = "accounts";

pub fn migrate(document: Value) -> Result<MigratedModule, MigrationError> {
    let mut state = into_object(MODULE_NAME, document)?;
    let accounts = match state.remove(ACCOUNTS) {
        Some(Value::Array(accounts)) => accounts,
        Some(Value::Null) => vec![],
        Some(_) => {
            return Err(MigrationError::malformed(
                MODULE_NAME,
                "`accounts` is not a list",
            ));
        }
        None => {
            return Err(MigrationError::malformed(
                MODULE_NAME,
                "missing field `accounts`",
            ));
        }
    };

    let migrated = accounts
        .into_iter()
        .enumerate()
        .map(|(index, account)| {
            let account = migrate_indexed_account(index, account)?;
            encode(MODULE_NAME, &account)
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!("migrated {} accounts", migrated.len());

    state.insert(ACCOUNTS.into(), Value::Array(migrated));
    Ok(MigratedModule::reshaped(Value::Object(state)))
}

/// Migrates a single old-schema account record.
pub fn migrate_account(account: Value) -> Result<v38::Account, MigrationError> {
    migrate_indexed_account(0, account)
}

/// Decodes an old-schema account into the closed set of known kinds. Fails
/// rather than falling back to a base account.
pub fn decode_account(account: Value) -> Result<v36::GenesisAccount, MigrationError> {
    decode_indexed_account(0, account)
}

fn migrate_indexed_account(index: usize, account: Value) -> Result<v38::Account, MigrationError> {
    let account = decode_indexed_account(index, account)?;
    TypeMigrator::migrate_type(account)
}

fn decode_indexed_account(
    index: usize,
    account: Value,
) -> Result<v36::GenesisAccount, MigrationError> {
    let address = locate_address(&account);
    let Some(kind) = detect(&account) else {
        return Err(MigrationError::UnrecognizedAccount {
            module: MODULE_NAME.into(),
            index,
            address,
        });
    };
    debug!(
        %kind,
        index,
        address = address.as_deref().unwrap_or_default(),
        "decoding account"
    );

    decode_as(kind, account).map_err(|e| e.at_address(address.as_deref()))
}

fn decode_as(kind: AccountKind, account: Value) -> Result<v36::GenesisAccount, MigrationError> {
    use v36::GenesisAccount;

    Ok(match kind {
        AccountKind::ValidatorVesting => {
            GenesisAccount::ValidatorVesting(decode(MODULE_NAME, account)?)
        }
        AccountKind::PeriodicVesting => {
            GenesisAccount::PeriodicVesting(decode(MODULE_NAME, account)?)
        }
        AccountKind::ContinuousVesting => {
            GenesisAccount::ContinuousVesting(decode(MODULE_NAME, account)?)
        }
        AccountKind::DelayedVesting => GenesisAccount::DelayedVesting(decode(MODULE_NAME, account)?),
        AccountKind::Module => GenesisAccount::Module(decode(MODULE_NAME, account)?),
        AccountKind::Multisig => GenesisAccount::Multisig(decode(MODULE_NAME, account)?),
        AccountKind::Base => GenesisAccount::Base(decode(MODULE_NAME, account)?),
    })
}
