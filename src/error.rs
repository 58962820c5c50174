use thiserror::Error;

use crate::ai::AiError;
use crate::command::{CommandError, HistoryError};
use crate::config::ConfigError;
use crate::document::LayerError;
use crate::export::ExportError;
use crate::interaction::InteractionError;
use crate::mask::MaskError;
use crate::renderer::RenderError;
use crate::state::PersistenceError;

/// Top-level error for operations that violate the editor's contracts or
/// fail at a boundary the caller has to handle.
///
/// Rejected user input and recoverable service failures are not errors:
/// they are reported as an [`Outcome`] and a notification event.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Layer(#[from] LayerError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Interaction(#[from] InteractionError),

    #[error(transparent)]
    Mask(#[from] MaskError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type EditorResult<T> = Result<T, EditorError>;

/// Result of a user-initiated operation that talks to an external service
/// or validates user input before touching the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State was updated and a history entry was written.
    Applied,
    /// The input was rejected; nothing changed.
    Rejected(String),
    /// An external service failed; nothing changed.
    Failed(String),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}
