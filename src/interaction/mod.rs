//! Direct manipulation of layers: move, resize, rotate and vector-point edits.

mod gesture;
mod layer_interaction;

use thiserror::Error;

use crate::document::LayerError;
use crate::layer::LayerId;

pub use gesture::DragGesture;
pub use layer_interaction::{InteractionPhase, LayerInteraction, Viewport};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InteractionError {
    #[error("Another interaction is already in progress")]
    Busy,

    #[error("Layer {0} is locked")]
    LayerLocked(LayerId),

    #[error("Layer {0} is not a vector shape")]
    NotVectorShape(LayerId),

    #[error("Layer {layer_id} has no point {index}")]
    InvalidPointIndex { layer_id: LayerId, index: usize },

    #[error(transparent)]
    Layer(#[from] LayerError),
}

pub type InteractionResult<T> = Result<T, InteractionError>;
