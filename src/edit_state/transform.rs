use serde::{Deserialize, Serialize};

use super::{EditSlice, EditState};
use crate::geometry::normalize_degrees;

/// Whole-image orientation. Flips are encoded as the sign of the scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformState {
    /// Degrees in `[0, 360)`.
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl TransformState {
    pub fn is_flipped_horizontally(&self) -> bool {
        self.scale_x < 0.0
    }

    pub fn is_flipped_vertically(&self) -> bool {
        self.scale_y < 0.0
    }
}

/// Discrete orientation actions; each commits on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformAction {
    RotateLeft,
    RotateRight,
    FlipHorizontal,
    FlipVertical,
}

impl TransformAction {
    pub fn label(&self) -> &'static str {
        match self {
            TransformAction::RotateLeft => "Rotate Left",
            TransformAction::RotateRight => "Rotate Right",
            TransformAction::FlipHorizontal => "Flip Horizontal",
            TransformAction::FlipVertical => "Flip Vertical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformChange {
    /// Free rotation (straighten slider).
    Rotation(f32),
    Action(TransformAction),
}

impl EditSlice for TransformState {
    type Change = TransformChange;

    fn slice_mut(state: &mut EditState) -> &mut Self {
        &mut state.transform
    }

    fn apply(&mut self, change: &TransformChange) {
        match *change {
            TransformChange::Rotation(degrees) => self.rotation = normalize_degrees(degrees),
            TransformChange::Action(TransformAction::RotateLeft) => {
                self.rotation = normalize_degrees(self.rotation - 90.0)
            }
            TransformChange::Action(TransformAction::RotateRight) => {
                self.rotation = normalize_degrees(self.rotation + 90.0)
            }
            TransformChange::Action(TransformAction::FlipHorizontal) => self.scale_x = -self.scale_x,
            TransformChange::Action(TransformAction::FlipVertical) => self.scale_y = -self.scale_y,
        }
    }

    fn history_name(change: &TransformChange) -> String {
        match change {
            TransformChange::Rotation(_) => "Straighten".to_string(),
            TransformChange::Action(action) => action.label().to_string(),
        }
    }
}
