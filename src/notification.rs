use thiserror::Error;
use tracing::info;

use crate::account::AccountId;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Failed to deliver notification to {account_id}: {reason}")]
    Delivery {
        account_id: AccountId,
        reason: String,
    },
}

/// Tells an account holder about a change to their account.
///
/// Delivery is best effort: the ledger logs a failed delivery and moves on,
/// an error here never undoes a committed transfer.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, account_id: &AccountId, message: &str) -> Result<(), NotificationError>;
}

/// Writes every notification to the log.
#[derive(Debug, Default)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, account_id: &AccountId, message: &str) -> Result<(), NotificationError> {
        info!(account = %account_id, text = message, "notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_sink_never_fails() {
        let sink = TracingNotificationSink;
        let id = AccountId::new("Id-123").unwrap();
        assert!(sink.notify(&id, "Received 200 from account Id-456").is_ok());
    }

    #[test]
    fn delivery_error_message() {
        let err = NotificationError::Delivery {
            account_id: AccountId::new("Id-123").unwrap(),
            reason: "mailbox full".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to deliver notification to Id-123: mailbox full"
        );
    }
}
