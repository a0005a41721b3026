// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{MODULE_NAME, v36, v38};
use crate::shim::crypto::PubKey;
use crate::state_migration::common::{TypeMigration, TypeMigrator};
use crate::state_migration::errors::MigrationError;

impl TypeMigration<v36::GenesisAccount, v38::Account> for TypeMigrator {
    fn migrate_type(from: v36::GenesisAccount) -> Result<v38::Account, MigrationError> {
        let address = from.address().to_owned();
        let out = match from {
            v36::GenesisAccount::Base(account) => {
                v38::Account::Base(TypeMigrator::migrate_type(account)?)
            }
            v36::GenesisAccount::Multisig(account) => {
                if !matches!(account.public_key, Some(PubKey::MultisigThreshold(_))) {
                    return Err(MigrationError::malformed(
                        MODULE_NAME,
                        "expected a multisig threshold public key",
                    )
                    .at_address(Some(&address)));
                }
                v38::Account::Base(TypeMigrator::migrate_type(account)?)
            }
            v36::GenesisAccount::Module(account) => {
                v38::Account::Module(TypeMigrator::migrate_type(account)?)
            }
            v36::GenesisAccount::DelayedVesting(account) => {
                v38::Account::DelayedVesting(TypeMigrator::migrate_type(account)?)
            }
            v36::GenesisAccount::ContinuousVesting(account) => {
                v38::Account::ContinuousVesting(TypeMigrator::migrate_type(account)?)
            }
            v36::GenesisAccount::PeriodicVesting(account) => {
                v38::Account::PeriodicVesting(TypeMigrator::migrate_type(account)?)
            }
            v36::GenesisAccount::ValidatorVesting(account) => {
                v38::Account::ValidatorVesting(TypeMigrator::migrate_type(account)?)
            }
        };
        Ok(out)
    }
}

impl TypeMigration<v36::BaseAccount, v38::BaseAccount> for TypeMigrator {
    fn migrate_type(from: v36::BaseAccount) -> Result<v38::BaseAccount, MigrationError> {
        let v36::BaseAccount {
            address,
            coins,
            public_key,
            account_number,
            sequence_number,
        } = from;

        if let Some(PubKey::MultisigThreshold(multisig)) = &public_key {
            multisig
                .validate()
                .map_err(|reason| MigrationError::malformed(MODULE_NAME, reason))
                .map_err(|e| e.at_address(Some(&address)))?;
        }

        Ok(v38::BaseAccount {
            address,
            coins,
            public_key,
            account_number,
            sequence: sequence_number,
        })
    }
}

impl TypeMigration<v36::ModuleAccount, v38::ModuleAccount> for TypeMigrator {
    fn migrate_type(from: v36::ModuleAccount) -> Result<v38::ModuleAccount, MigrationError> {
        Ok(v38::ModuleAccount {
            base_account: TypeMigrator::migrate_type(from.base_account)?,
            name: from.name,
            permissions: from.permissions,
        })
    }
}

impl TypeMigration<v36::BaseVestingAccount, v38::BaseVestingAccount> for TypeMigrator {
    fn migrate_type(
        from: v36::BaseVestingAccount,
    ) -> Result<v38::BaseVestingAccount, MigrationError> {
        Ok(v38::BaseVestingAccount {
            base_account: TypeMigrator::migrate_type(from.base_account)?,
            original_vesting: from.original_vesting,
            delegated_free: from.delegated_free,
            delegated_vesting: from.delegated_vesting,
            end_time: from.end_time,
        })
    }
}

impl TypeMigration<v36::DelayedVestingAccount, v38::DelayedVestingAccount> for TypeMigrator {
    fn migrate_type(
        from: v36::DelayedVestingAccount,
    ) -> Result<v38::DelayedVestingAccount, MigrationError> {
        Ok(v38::DelayedVestingAccount {
            base_vesting_account: TypeMigrator::migrate_type(from.base_vesting_account)?,
        })
    }
}

impl TypeMigration<v36::ContinuousVestingAccount, v38::ContinuousVestingAccount> for TypeMigrator {
    fn migrate_type(
        from: v36::ContinuousVestingAccount,
    ) -> Result<v38::ContinuousVestingAccount, MigrationError> {
        let base_vesting_account: v38::BaseVestingAccount =
            TypeMigrator::migrate_type(from.base_vesting_account)?;
        if from.start_time > base_vesting_account.end_time {
            return Err(MigrationError::malformed(
                MODULE_NAME,
                format!(
                    "vesting starts at {} after it ends at {}",
                    from.start_time, base_vesting_account.end_time
                ),
            )
            .at_address(Some(&base_vesting_account.base_account.address)));
        }
        Ok(v38::ContinuousVestingAccount {
            base_vesting_account,
            start_time: from.start_time,
        })
    }
}

impl TypeMigration<v36::PeriodicVestingAccount, v38::PeriodicVestingAccount> for TypeMigrator {
    fn migrate_type(
        from: v36::PeriodicVestingAccount,
    ) -> Result<v38::PeriodicVestingAccount, MigrationError> {
        let base_vesting_account: v38::BaseVestingAccount =
            TypeMigrator::migrate_type(from.base_vesting_account)?;
        check_schedule(
            from.start_time,
            base_vesting_account.end_time,
            &from.vesting_periods,
        )
        .map_err(|e| e.at_address(Some(&base_vesting_account.base_account.address)))?;

        Ok(v38::PeriodicVestingAccount {
            base_vesting_account,
            start_time: from.start_time,
            vesting_periods: from.vesting_periods,
        })
    }
}

impl TypeMigration<v36::ValidatorVestingAccount, v38::ValidatorVestingAccount> for TypeMigrator {
    fn migrate_type(
        from: v36::ValidatorVestingAccount,
    ) -> Result<v38::ValidatorVestingAccount, MigrationError> {
        let periodic_vesting_account: v38::PeriodicVestingAccount =
            TypeMigrator::migrate_type(from.periodic_vesting_account)?;

        let periods = periodic_vesting_account.vesting_periods.len();
        let progress = from.vesting_period_progress.len();
        if periods != progress {
            let address = &periodic_vesting_account
                .base_vesting_account
                .base_account
                .address;
            return Err(MigrationError::malformed(
                MODULE_NAME,
                format!("{progress} vesting progress entries for {periods} vesting periods"),
            )
            .at_address(Some(address)));
        }

        Ok(v38::ValidatorVestingAccount {
            periodic_vesting_account,
            validator_address: from.validator_address,
            return_address: from.return_address,
            signing_threshold: from.signing_threshold,
            current_period_progress: from.current_period_progress,
            vesting_period_progress: from.vesting_period_progress,
            debt_after_failed_vesting: from.debt_after_failed_vesting,
        })
    }
}

/// Period lengths are deltas from `start_time` and must land exactly on `end_time`.
fn check_schedule(
    start_time: i64,
    end_time: i64,
    periods: &[v36::Period],
) -> Result<(), MigrationError> {
    let computed_end = periods.iter().try_fold(start_time, |end, period| {
        if period.length < 0 {
            return None;
        }
        end.checked_add(period.length)
    });
    match computed_end {
        Some(computed_end) if computed_end == end_time => Ok(()),
        Some(computed_end) => Err(MigrationError::malformed(
            MODULE_NAME,
            format!("vesting periods end at {computed_end}, account ends at {end_time}"),
        )),
        None => Err(MigrationError::malformed(
            MODULE_NAME,
            "vesting period lengths are negative or overflow",
        )),
    }
}
