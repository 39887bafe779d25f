//! Translates ledger outcomes into HTTP-style status and message pairs.

use crate::{account::Account, ledger::LedgerError};

use super::ServiceError;

pub const OK: u16 = 200;
pub const CREATED: u16 = 201;
pub const BAD_REQUEST: u16 = 400;
pub const NOT_FOUND: u16 = 404;
pub const INTERNAL_ERROR: u16 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub message: String,
}

impl Response {
    fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn created() -> Self {
        Self::new(CREATED, "")
    }

    pub fn transferred() -> Self {
        Self::new(OK, "Transfer successful")
    }

    pub fn for_account(account: Option<Account>) -> Self {
        match account {
            Some(acc) => Self::new(OK, acc.balance().to_string()),
            None => Self::new(NOT_FOUND, ""),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<&ServiceError> for Response {
    fn from(err: &ServiceError) -> Self {
        let status = match err {
            ServiceError::UnknownAccount(_) => return Self::for_account(None),
            ServiceError::Parse(_) | ServiceError::Command(_) => BAD_REQUEST,
            ServiceError::Ledger(
                LedgerError::DuplicateId(_)
                | LedgerError::AccountNotFound { .. }
                | LedgerError::InvalidAmount
                | LedgerError::InsufficientFunds(_)
                | LedgerError::PrecisionLoss(_),
            ) => BAD_REQUEST,
            ServiceError::Ledger(LedgerError::BalanceOverflow(_) | LedgerError::Store(_)) => {
                INTERNAL_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}
