use thiserror::Error;

/// Error type for snapshot and configuration persistence failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Boundary validation failures for ledger entry submissions.
///
/// These are raised before an entry reaches the session store; the store
/// itself never errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("amount must not be negative")]
    NegativeAmount,
}

/// Top-level failures of the interactive shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
