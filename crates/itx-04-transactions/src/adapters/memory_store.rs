//! In-memory execution state store with nested checkpoints.

use crate::domain::errors::StoreError;
use crate::ports::outbound::ExecutionStateStore;
use async_trait::async_trait;
use itx_02_accounts::LedgerAccount;
use parking_lot::Mutex;
use shared_types::EthAddress;
use std::collections::HashMap;
use tracing::debug;

/// Pre-images of the accounts written since one checkpoint.
type Journal = HashMap<EthAddress, Option<LedgerAccount>>;

#[derive(Default)]
struct Inner {
    accounts: HashMap<EthAddress, LedgerAccount>,
    journals: Vec<Journal>,
}

/// Ledger accounts in a map; each checkpoint keeps a journal of pre-images
/// so `revert` can restore them.
#[derive(Default)]
pub struct InMemoryExecutionStore {
    inner: Mutex<Inner>,
}

impl InMemoryExecutionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed accounts outside any checkpoint.
    pub fn with_accounts(accounts: impl IntoIterator<Item = (EthAddress, LedgerAccount)>) -> Self {
        let store = Self::new();
        store.inner.lock().accounts.extend(accounts);
        store
    }

    /// Current value, ignoring checkpoints.
    pub fn account(&self, address: &EthAddress) -> Option<LedgerAccount> {
        self.inner.lock().accounts.get(address).cloned()
    }

    pub fn open_checkpoints(&self) -> usize {
        self.inner.lock().journals.len()
    }
}

#[async_trait]
impl ExecutionStateStore for InMemoryExecutionStore {
    async fn checkpoint(&self) -> Result<(), StoreError> {
        self.inner.lock().journals.push(Journal::new());
        Ok(())
    }

    async fn commit(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let journal = inner.journals.pop().ok_or(StoreError::NoCheckpoint)?;
        // A nested commit hands its pre-images to the enclosing checkpoint.
        if let Some(parent) = inner.journals.last_mut() {
            for (address, previous) in journal {
                parent.entry(address).or_insert(previous);
            }
        }
        Ok(())
    }

    async fn revert(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let journal = inner.journals.pop().ok_or(StoreError::NoCheckpoint)?;
        debug!("[itx-04] Reverting {} store writes", journal.len());
        for (address, previous) in journal {
            match previous {
                Some(account) => inner.accounts.insert(address, account),
                None => inner.accounts.remove(&address),
            };
        }
        Ok(())
    }

    async fn put_account(
        &self,
        address: EthAddress,
        account: LedgerAccount,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let previous = inner.accounts.insert(address, account);
        if let Some(journal) = inner.journals.last_mut() {
            journal.entry(address).or_insert(previous);
        }
        Ok(())
    }

    async fn get_account(&self, address: EthAddress) -> Result<Option<LedgerAccount>, StoreError> {
        Ok(self.inner.lock().accounts.get(&address).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::U256;

    fn ledger(balance: u64) -> LedgerAccount {
        LedgerAccount {
            balance: U256::from(balance),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_revert_restores_and_removes() {
        let a = EthAddress([1; 20]);
        let b = EthAddress([2; 20]);
        let store = InMemoryExecutionStore::with_accounts([(a, ledger(10))]);

        store.checkpoint().await.unwrap();
        store.put_account(a, ledger(5)).await.unwrap();
        store.put_account(a, ledger(4)).await.unwrap();
        store.put_account(b, ledger(1)).await.unwrap();
        store.revert().await.unwrap();

        assert_eq!(store.account(&a), Some(ledger(10)));
        assert_eq!(store.account(&b), None);
        assert_eq!(store.open_checkpoints(), 0);
    }

    #[tokio::test]
    async fn test_nested_commit_then_outer_revert() {
        let a = EthAddress([1; 20]);
        let store = InMemoryExecutionStore::with_accounts([(a, ledger(10))]);

        store.checkpoint().await.unwrap();
        store.checkpoint().await.unwrap();
        store.put_account(a, ledger(7)).await.unwrap();
        store.commit().await.unwrap();
        assert_eq!(store.get_account(a).await.unwrap(), Some(ledger(7)));
        store.revert().await.unwrap();

        assert_eq!(store.account(&a), Some(ledger(10)));
    }

    #[tokio::test]
    async fn test_commit_without_checkpoint() {
        let store = InMemoryExecutionStore::new();
        assert_eq!(store.commit().await, Err(StoreError::NoCheckpoint));
        assert_eq!(store.revert().await, Err(StoreError::NoCheckpoint));
    }
}
