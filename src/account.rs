use std::fmt;

use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Result<Self, AccountError> {
        let id = id.into();
        if id.is_empty() {
            return Err(AccountError::EmptyId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountEventKind {
    Debited,
    Credited,
}

#[derive(Debug)]
pub struct AccountEvent {
    amount: Decimal,
    kind: AccountEventKind,
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Account id must not be empty")]
    EmptyId,
    #[error("Initial balance must not be negative, got {balance}")]
    NegativeBalance { balance: Decimal },
}

/// Reasons a balance change is refused before any event is produced.
#[derive(Debug, Error)]
pub enum BalanceError {
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Balance would overflow")]
    Overflow,
    #[error("Balance cannot represent the amount exactly")]
    PrecisionLoss,
}

/// `rust_decimal` keeps the wider scale of its operands when a sum or
/// difference fits in 96 bits and drops fractional digits (rounding) when it
/// doesn't. A result narrower than its operands is therefore not exact.
fn exact(result: Option<Decimal>, lhs: Decimal, rhs: Decimal) -> Result<Decimal, BalanceError> {
    let result = result.ok_or(BalanceError::Overflow)?;
    if result.scale() < lhs.scale().max(rhs.scale()) {
        return Err(BalanceError::PrecisionLoss);
    }
    Ok(result)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    balance: Decimal,
}

impl Account {
    pub fn new(id: AccountId, balance: Decimal) -> Result<Self, AccountError> {
        if balance < Decimal::zero() {
            return Err(AccountError::NegativeBalance { balance });
        }
        Ok(Self { id, balance })
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn apply(&mut self, event: &AccountEvent) {
        match event.kind {
            AccountEventKind::Debited => {
                self.balance -= event.amount;
            }
            AccountEventKind::Credited => {
                self.balance += event.amount;
            }
        }
    }

    pub fn handle_debit(&self, amount: Decimal) -> Result<AccountEvent, BalanceError> {
        if self.balance < amount {
            return Err(BalanceError::InsufficientFunds);
        }
        exact(self.balance.checked_sub(amount), self.balance, amount)?;
        Ok(AccountEvent {
            amount,
            kind: AccountEventKind::Debited,
        })
    }

    pub fn handle_credit(&self, amount: Decimal) -> Result<AccountEvent, BalanceError> {
        exact(self.balance.checked_add(amount), self.balance, amount)?;
        Ok(AccountEvent {
            amount,
            kind: AccountEventKind::Credited,
        })
    }
}
