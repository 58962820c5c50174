use crate::layer::LayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// A transient, user-visible message (toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Error, message: message.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Drag,
    Resize,
    Rotate,
    VectorPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A live change touched the edit state; re-render the preview.
    EditStateChanged,
    /// A live change touched the layer stack; re-render the preview.
    LayersChanged,
    /// A history entry was recorded.
    HistoryRecorded { name: String, index: usize, len: usize },
    /// The cursor moved (undo/redo/jump) and the document was re-hydrated.
    HistoryMoved { index: usize },
    /// The whole document was replaced (new project, image or project load).
    DocumentReplaced,
    SelectionChanged { selected_layer: Option<LayerId> },
    InteractionStarted { layer_id: LayerId, kind: InteractionKind },
    InteractionEnded { layer_id: LayerId, committed: bool },
    Notification(Notification),
}
