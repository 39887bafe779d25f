use dashmap::{DashMap, mapref::entry::Entry};

use crate::account::{Account, AccountId};

use super::{AccountStore, StoreError};

#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: DashMap<AccountId, Account>,
}

impl AccountStore for InMemoryAccountStore {
    fn create(&self, account: Account) -> Result<(), StoreError> {
        match self.accounts.entry(account.id().clone()) {
            Entry::Occupied(entry) => Err(StoreError::DuplicateId(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(account);
                Ok(())
            }
        }
    }

    fn get(&self, id: &AccountId) -> Option<Account> {
        self.accounts.get(id).map(|acc| acc.value().clone())
    }

    fn update(&self, account: Account) -> Result<(), StoreError> {
        let Some(mut stored) = self.accounts.get_mut(account.id()) else {
            return Err(StoreError::NotFound(account.id().clone()));
        };
        *stored = account;
        Ok(())
    }

    fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|acc| acc.value().clone())
            .collect();
        accounts.sort_by(|a, b| a.id().cmp(b.id()));
        accounts
    }

    fn clear(&self) {
        self.accounts.clear();
    }
}
