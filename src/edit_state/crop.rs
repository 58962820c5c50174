use serde::{Deserialize, Serialize};

use super::{EditSlice, EditState};

/// Crop rectangle in percent of the canvas, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropRect {
    pub const FULL: CropRect = CropRect {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 100.0,
    };

    /// Keeps the rect inside the canvas and at least 1% in each direction.
    pub fn clamped(self) -> Self {
        let x = self.x.clamp(0.0, 99.0);
        let y = self.y.clamp(0.0, 99.0);
        Self {
            x,
            y,
            width: self.width.clamp(1.0, 100.0 - x),
            height: self.height.clamp(1.0, 100.0 - y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropState {
    pub rect: Option<CropRect>,
    /// Width / height; `None` crops freely.
    pub aspect_ratio: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CropChange {
    Rect(Option<CropRect>),
    AspectRatio(Option<f32>),
}

impl EditSlice for CropState {
    type Change = CropChange;

    fn slice_mut(state: &mut EditState) -> &mut Self {
        &mut state.crop
    }

    fn apply(&mut self, change: &CropChange) {
        match *change {
            CropChange::Rect(rect) => self.rect = rect.map(CropRect::clamped),
            CropChange::AspectRatio(ratio) => {
                self.aspect_ratio = ratio.filter(|r| r.is_finite() && *r > 0.0)
            }
        }
    }

    fn history_name(change: &CropChange) -> String {
        match change {
            CropChange::Rect(Some(_)) => "Crop Applied",
            CropChange::Rect(None) => "Crop Cleared",
            CropChange::AspectRatio(_) => "Crop Aspect Ratio",
        }
        .to_string()
    }
}
