use std::panic::{AssertUnwindSafe, catch_unwind};

use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    account::{Account, AccountId, BalanceError},
    notification::NotificationSink,
    store::{AccountStore, StoreError},
};

pub mod lock_table;

use lock_table::AccountLocks;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Account id {0} already exists!")]
    DuplicateId(AccountId),
    #[error("One or both accounts do not exist")]
    AccountNotFound { missing: AccountId },
    #[error("Transfer amount must be positive")]
    InvalidAmount,
    #[error("Insufficient funds in account {0}")]
    InsufficientFunds(AccountId),
    #[error("Balance of account {0} would overflow")]
    BalanceOverflow(AccountId),
    #[error("Balance of account {0} cannot hold the amount exactly")]
    PrecisionLoss(AccountId),
    /// Store lost a record that was seen a moment ago. Not expected while
    /// accounts are never deleted.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateId(id) => Self::DuplicateId(id),
            err @ StoreError::NotFound(_) => Self::Store(err),
        }
    }
}

impl LedgerError {
    fn from_balance(id: &AccountId, err: BalanceError) -> Self {
        match err {
            BalanceError::InsufficientFunds => Self::InsufficientFunds(id.clone()),
            BalanceError::Overflow => Self::BalanceOverflow(id.clone()),
            BalanceError::PrecisionLoss => Self::PrecisionLoss(id.clone()),
        }
    }
}

/// Creates accounts and moves money between them.
///
/// The service is shared between threads. A transfer locks only the two
/// accounts it touches, always in ascending id order, so transfers in
/// opposite directions can't wait on each other.
pub struct LedgerService<S, N> {
    store: S,
    notifications: N,
    locks: AccountLocks,
}

impl<S, N> LedgerService<S, N>
where
    S: AccountStore,
    N: NotificationSink,
{
    pub fn new(store: S, notifications: N) -> Self {
        Self {
            store,
            notifications,
            locks: AccountLocks::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifications(&self) -> &N {
        &self.notifications
    }

    pub fn create_account(&self, account: Account) -> Result<(), LedgerError> {
        let id = account.id().clone();
        self.store.create(account)?;
        info!(account = %id, "account created");
        Ok(())
    }

    pub fn get_account(&self, id: &AccountId) -> Option<Account> {
        self.store.get(id)
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.store.accounts()
    }

    pub fn transfer_money(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if amount <= Decimal::zero() {
            return Err(LedgerError::InvalidAmount);
        }
        for id in [from, to] {
            if self.store.get(id).is_none() {
                return Err(LedgerError::AccountNotFound {
                    missing: id.clone(),
                });
            }
        }

        let locks = self.locks.pair(from, to);
        {
            let _guard = locks.lock();
            debug!(%from, %to, %amount, "transfer locks acquired");
            self.settle(from, to, amount).inspect_err(|err| {
                warn!(%from, %to, %amount, error = %err, "transfer rejected");
            })?;
        }
        debug!(%from, %to, %amount, "transfer committed");

        self.notify(from, &format!("Transferred {amount} to account {to}"));
        self.notify(to, &format!("Received {amount} from account {from}"));
        Ok(())
    }

    /// Balance check and both writes. Callers hold the locks of both accounts.
    fn settle(&self, from: &AccountId, to: &AccountId, amount: Decimal) -> Result<(), LedgerError> {
        let mut source = self.load(from)?;
        let debit = source
            .handle_debit(amount)
            .map_err(|err| LedgerError::from_balance(from, err))?;
        source.apply(&debit);

        if from == to {
            let credit = source
                .handle_credit(amount)
                .map_err(|err| LedgerError::from_balance(to, err))?;
            source.apply(&credit);
            self.store.update(source)?;
            return Ok(());
        }

        let mut target = self.load(to)?;
        let credit = target
            .handle_credit(amount)
            .map_err(|err| LedgerError::from_balance(to, err))?;
        target.apply(&credit);

        self.store.update(source)?;
        self.store.update(target)?;
        Ok(())
    }

    fn load(&self, id: &AccountId) -> Result<Account, LedgerError> {
        self.store
            .get(id)
            .ok_or_else(|| LedgerError::Store(StoreError::NotFound(id.clone())))
    }

    fn notify(&self, account_id: &AccountId, message: &str) {
        match catch_unwind(AssertUnwindSafe(|| {
            self.notifications.notify(account_id, message)
        })) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(account = %account_id, error = %err, "notification dropped"),
            Err(_) => warn!(account = %account_id, "notification sink panicked"),
        }
    }
}
