//! # Wrapped States
//!
//! The per-call view of account snapshots the host hands to validate and
//! apply. Lookups return [`LookupError`] instead of defaults: an absent
//! account must never read as an empty one.

use super::entities::*;
use super::errors::LookupError;
use itx_01_addressing::AccountType;
use serde::{Deserialize, Serialize};
use shared_types::{Hash, ShardAddress, Timestamp};
use std::collections::BTreeMap;

/// One snapshot plus the state-proof id the host attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedAccount {
    pub account_id: ShardAddress,
    pub state_id: Hash,
    pub timestamp: Timestamp,
    pub data: Account,
}

impl WrappedAccount {
    /// Wrap a snapshot; the state id is its current content hash.
    pub fn new(account_id: ShardAddress, data: Account) -> Self {
        Self {
            account_id,
            state_id: data.hash(),
            timestamp: data.timestamp(),
            data,
        }
    }
}

macro_rules! typed_accessors {
    ($get:ident, $get_mut:ident, $variant:ident, $ty:ty) => {
        pub fn $get(&self, address: &ShardAddress) -> Result<&$ty, LookupError> {
            match &self.get(address)?.data {
                Account::$variant(inner) => Ok(inner),
                other => Err(LookupError::WrongKind {
                    address: *address,
                    expected: AccountType::$variant,
                    found: other.kind(),
                }),
            }
        }

        pub fn $get_mut(&mut self, address: &ShardAddress) -> Result<&mut $ty, LookupError> {
            match &mut self.get_mut(address)?.data {
                Account::$variant(inner) => Ok(inner),
                other => Err(LookupError::WrongKind {
                    address: *address,
                    expected: AccountType::$variant,
                    found: other.kind(),
                }),
            }
        }
    };
}

/// Address-ordered map of wrapped snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappedStates {
    accounts: BTreeMap<ShardAddress, WrappedAccount>,
}

impl WrappedStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace by `account_id`.
    pub fn insert(&mut self, wrapped: WrappedAccount) {
        self.accounts.insert(wrapped.account_id, wrapped);
    }

    pub fn contains(&self, address: &ShardAddress) -> bool {
        self.accounts.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ShardAddress, &WrappedAccount)> {
        self.accounts.iter()
    }

    pub fn get(&self, address: &ShardAddress) -> Result<&WrappedAccount, LookupError> {
        self.accounts
            .get(address)
            .ok_or(LookupError::NotFound(*address))
    }

    pub fn get_mut(&mut self, address: &ShardAddress) -> Result<&mut WrappedAccount, LookupError> {
        self.accounts
            .get_mut(address)
            .ok_or(LookupError::NotFound(*address))
    }

    /// Replace the snapshot of an existing entry, keeping its state id.
    pub fn replace_data(&mut self, address: &ShardAddress, data: Account) -> Result<(), LookupError> {
        let entry = self.get_mut(address)?;
        entry.timestamp = data.timestamp();
        entry.data = data;
        Ok(())
    }

    /// Plain account at `address`. `Debug` accounts share the layout and
    /// are accepted too.
    pub fn eoa(&self, address: &ShardAddress) -> Result<&EoaAccount, LookupError> {
        match &self.get(address)?.data {
            Account::Account(inner) | Account::Debug(inner) => Ok(inner),
            other => Err(LookupError::WrongKind {
                address: *address,
                expected: AccountType::Account,
                found: other.kind(),
            }),
        }
    }

    pub fn eoa_mut(&mut self, address: &ShardAddress) -> Result<&mut EoaAccount, LookupError> {
        match &mut self.get_mut(address)?.data {
            Account::Account(inner) | Account::Debug(inner) => Ok(inner),
            other => Err(LookupError::WrongKind {
                address: *address,
                expected: AccountType::Account,
                found: other.kind(),
            }),
        }
    }

    /// Wrap `account` in the same plain variant as the entry at `address`.
    pub fn rewrap_eoa(
        &self,
        address: &ShardAddress,
        account: EoaAccount,
    ) -> Result<Account, LookupError> {
        match &self.get(address)?.data {
            Account::Debug(_) => Ok(Account::Debug(account)),
            Account::Account(_) => Ok(Account::Account(account)),
            other => Err(LookupError::WrongKind {
                address: *address,
                expected: AccountType::Account,
                found: other.kind(),
            }),
        }
    }

    typed_accessors!(node_account, node_account_mut, NodeAccount, NodeAccount);
    typed_accessors!(network_account, network_account_mut, NetworkAccount, NetworkAccount);
    typed_accessors!(secure_account, secure_account_mut, SecureAccount, SecureAccount);
}

impl FromIterator<WrappedAccount> for WrappedStates {
    fn from_iter<I: IntoIterator<Item = WrappedAccount>>(iter: I) -> Self {
        let mut states = Self::new();
        for wrapped in iter {
            states.insert(wrapped);
        }
        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::U256;

    fn secure(id: u8) -> WrappedAccount {
        WrappedAccount::new(
            ShardAddress([id; 32]),
            Account::SecureAccount(SecureAccount {
                id: ShardAddress([id; 32]),
                next_transfer_amount: U256::from(100),
                ..Default::default()
            }),
        )
    }

    #[test]
    fn test_missing_is_explicit() {
        let states = WrappedStates::new();
        let addr = ShardAddress([1; 32]);
        assert_eq!(states.get(&addr).unwrap_err(), LookupError::NotFound(addr));
        assert_eq!(
            states.secure_account(&addr).unwrap_err(),
            LookupError::NotFound(addr)
        );
    }

    #[test]
    fn test_wrong_kind_reported() {
        let states: WrappedStates = [secure(1)].into_iter().collect();
        let addr = ShardAddress([1; 32]);
        assert_eq!(
            states.node_account(&addr).unwrap_err(),
            LookupError::WrongKind {
                address: addr,
                expected: AccountType::NodeAccount,
                found: AccountType::SecureAccount,
            }
        );
        assert!(states.secure_account(&addr).is_ok());
    }

    #[test]
    fn test_mutation_through_typed_accessor() {
        let mut states: WrappedStates = [secure(2)].into_iter().collect();
        let addr = ShardAddress([2; 32]);
        states.secure_account_mut(&addr).unwrap().nonce = 7;
        assert_eq!(states.secure_account(&addr).unwrap().nonce, 7);
    }

    #[test]
    fn test_debug_account_reads_as_plain() {
        let addr = ShardAddress([4; 32]);
        let account = EoaAccount {
            account: LedgerAccount {
                balance: U256::from(9),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut states: WrappedStates =
            [WrappedAccount::new(addr, Account::Debug(account.clone()))]
                .into_iter()
                .collect();

        assert_eq!(states.eoa(&addr).unwrap().account.balance, U256::from(9));
        states.eoa_mut(&addr).unwrap().account.balance = U256::from(10);
        let rewrapped = states.rewrap_eoa(&addr, account).unwrap();
        assert_eq!(rewrapped.kind(), AccountType::Debug);

        let other = ShardAddress([5; 32]);
        states.insert(secure(5));
        assert!(matches!(
            states.rewrap_eoa(&other, EoaAccount::default()),
            Err(LookupError::WrongKind { .. })
        ));
    }

    #[test]
    fn test_replace_data_requires_existing_entry() {
        let mut states = WrappedStates::new();
        let addr = ShardAddress([3; 32]);
        let result = states.replace_data(&addr, Account::SecureAccount(SecureAccount::default()));
        assert_eq!(result, Err(LookupError::NotFound(addr)));
    }
}
