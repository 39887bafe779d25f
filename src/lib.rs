/// Account identity and balance. Balance changes are expressed as events,
/// which are created by handling debit and credit requests.
pub mod account;

/// Storage interface for accounts, plus "in memory" implementation.
pub mod store;

/// Best effort delivery of messages to account holders.
pub mod notification;

/// Account creation and transfers. Owns the per-account locking protocol.
pub mod ledger;

/// Turns raw requests into ledger commands that later are executed by [`ledger`].
pub mod command;

/// Bootstraps the ledger behind a CSV batch interface. Lives in the library
/// so integration tests can drive it.
pub mod bin_utils;
