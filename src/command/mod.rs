mod commands;
mod history;

use thiserror::Error;

use crate::document::LayerError;

pub use commands::Command;
pub use history::{HistoryError, HistoryItem, HistoryLog};

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur during command execution
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Layer(#[from] LayerError),

    #[error("Invalid command parameters: {0}")]
    InvalidParameters(String),
}
