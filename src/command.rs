use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::account::{Account, AccountError, AccountId};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Create,
    Transfer,
    Get,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
    #[error("Counterparty account is required for {kind:?}")]
    CounterpartyRequired { kind: OperationKind },
    #[error(transparent)]
    Account(#[from] AccountError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    CreateAccount(Account),
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    },
    GetAccount(AccountId),
}

impl LedgerCommand {
    /// Checks that a raw request carries everything its kind needs. The
    /// transfer amount is passed through as is, the ledger decides whether
    /// it is acceptable. Lookups ignore the amount and counterparty columns.
    pub fn parse_command(
        kind: OperationKind,
        account: &str,
        counterparty: Option<&str>,
        amount: Option<Decimal>,
    ) -> Result<Self, CommandError> {
        let id = AccountId::new(account)?;
        let amount = amount.ok_or(CommandError::AmountRequired { kind });
        match kind {
            OperationKind::Get => Ok(Self::GetAccount(id)),
            OperationKind::Create => Ok(Self::CreateAccount(Account::new(id, amount?)?)),
            OperationKind::Transfer => {
                let amount = amount?;
                let Some(counterparty) = counterparty.filter(|c| !c.is_empty()) else {
                    return Err(CommandError::CounterpartyRequired { kind });
                };
                Ok(Self::Transfer {
                    from: id,
                    to: AccountId::new(counterparty)?,
                    amount,
                })
            }
        }
    }
}
