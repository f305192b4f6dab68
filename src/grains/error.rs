//! Grain call errors.

use thiserror::Error;

/// Errors that can occur while calling a grain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrainError {
    /// The activation's mailbox is gone (activation ended).
    #[error("Mailbox closed for grain {0}")]
    MailboxClosed(String),

    /// No reply arrived within the configured call timeout.
    #[error("Grain call timed out after {millis} ms")]
    Timeout { millis: u64 },

    /// The silo is shutting down or has stopped.
    #[error("Silo is stopped")]
    SiloStopped,

    /// The grain refused the request or failed to activate.
    #[error("Grain rejected request: {0}")]
    Rejected(String),
}
