#![warn(clippy::all, rust_2018_idioms)]

pub mod ai;
pub mod color;
pub mod command;
pub mod config;
pub mod document;
pub mod edit_state;
pub mod error;
pub mod event;
pub mod export;
pub mod geometry;
pub mod id_generator;
pub mod interaction;
pub mod layer;
pub mod mask;
pub mod renderer;
pub mod selection;
pub mod state;
pub mod tools;

pub use color::Rgb;
pub use command::{Command, HistoryItem, HistoryLog};
pub use config::EditorConfig;
pub use document::Document;
pub use edit_state::EditState;
pub use error::{EditorError, EditorResult, Outcome};
pub use event::{EditorEvent, EventBus, Notification};
pub use interaction::{LayerInteraction, Viewport};
pub use layer::{Layer, LayerId, LayerKind};
pub use mask::{Mask, MaskOp, MaskPatch};
pub use renderer::{RenderRequest, Renderer};
pub use state::{Editor, NewProjectSettings};
pub use tools::ToolType;
