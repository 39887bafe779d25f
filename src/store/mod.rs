use thiserror::Error;

use crate::account::{Account, AccountId};

pub mod in_memory_store;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Account id {0} already exists!")]
    DuplicateId(AccountId),
    #[error("Account id {0} is not stored")]
    NotFound(AccountId),
}

/// Owns account records and decides its own synchronization, callers never
/// see the locks behind it.
pub trait AccountStore: Send + Sync {
    /// Inserts the account unless its id is taken. Of concurrent creators
    /// of the same id exactly one succeeds.
    fn create(&self, account: Account) -> Result<(), StoreError>;

    /// Snapshot of the stored record.
    fn get(&self, id: &AccountId) -> Option<Account>;

    /// Replaces the record of an existing account.
    fn update(&self, account: Account) -> Result<(), StoreError>;

    /// All accounts, ordered by id.
    fn accounts(&self) -> Vec<Account>;

    fn clear(&self);
}
