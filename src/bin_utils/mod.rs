//! Drives [`crate::ledger::LedgerService`] from a CSV batch: one operation per
//! row, final balances printed as CSV. It stands in for a network front end,
//! so rejected operations are reported the way a client would see them.

use std::io::{Read, Write};

use crate::{
    account::AccountId,
    command::{CommandError, LedgerCommand},
    ledger::{LedgerError, LedgerService},
    notification::TracingNotificationSink,
    store::in_memory_store::InMemoryAccountStore,
};
use anyhow::Result;
use csv_parser::{CsvOperationParser, Operation};
use csv_printer::{AccountRow, print_accounts};
use response::Response;
use thiserror::Error;
use tracing::debug;

pub mod csv_parser;
pub mod csv_printer;
pub mod response;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Malformed row: {0}")]
    Parse(#[from] csv::Error),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Account {0} not found")]
    UnknownAccount(AccountId),
}

pub type Ledger = LedgerService<InMemoryAccountStore, TracingNotificationSink>;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, ServiceError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let ledger = Ledger::new(InMemoryAccountStore::default(), TracingNotificationSink);

        for (line, row) in parser {
            match row
                .map_err(ServiceError::from)
                .and_then(|op| execute(&ledger, op))
            {
                Ok(response) => debug!(
                    line,
                    status = response.status,
                    message = %response.message,
                    "operation done"
                ),
                Err(err) => (self.error_printer)(line, err),
            }
        }

        let accounts = ledger.accounts();
        print_accounts(
            self.output,
            accounts.iter().map(|acc| AccountRow {
                account: acc.id().as_str(),
                balance: acc.balance(),
            }),
        )
    }
}

pub fn execute(ledger: &Ledger, op: Operation) -> Result<Response, ServiceError> {
    let command = LedgerCommand::parse_command(
        op.kind,
        &op.account,
        op.counterparty.as_deref(),
        op.amount,
    )?;
    match command {
        LedgerCommand::CreateAccount(account) => {
            ledger.create_account(account)?;
            Ok(Response::created())
        }
        LedgerCommand::Transfer { from, to, amount } => {
            ledger.transfer_money(&from, &to, amount)?;
            Ok(Response::transferred())
        }
        LedgerCommand::GetAccount(id) => match ledger.get_account(&id) {
            Some(account) => Ok(Response::for_account(Some(account))),
            None => Err(ServiceError::UnknownAccount(id)),
        },
    }
}
