use serde::{Deserialize, Serialize};

use super::{EditSlice, EditState};
use crate::color::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameType {
    #[default]
    None,
    Border,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub frame_type: FrameType,
    /// Border width in percent of the shorter canvas side, 0–50.
    pub width: f32,
    pub color: Rgb,
    pub opacity: f32,
    pub roundness: f32,
    pub vignette: f32,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            frame_type: FrameType::None,
            width: 5.0,
            color: Rgb::WHITE,
            opacity: 100.0,
            roundness: 0.0,
            vignette: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameChange {
    Type(FrameType),
    Width(f32),
    Color(Rgb),
    Opacity(f32),
    Roundness(f32),
    Vignette(f32),
}

impl EditSlice for Frame {
    type Change = FrameChange;

    fn slice_mut(state: &mut EditState) -> &mut Self {
        &mut state.frame
    }

    fn apply(&mut self, change: &FrameChange) {
        match *change {
            FrameChange::Type(t) => self.frame_type = t,
            FrameChange::Width(v) => self.width = v.clamp(0.0, 50.0),
            FrameChange::Color(c) => self.color = c,
            FrameChange::Opacity(v) => self.opacity = v.clamp(0.0, 100.0),
            FrameChange::Roundness(v) => self.roundness = v.clamp(0.0, 100.0),
            FrameChange::Vignette(v) => self.vignette = v.clamp(0.0, 100.0),
        }
    }

    fn history_name(change: &FrameChange) -> String {
        let field = match change {
            FrameChange::Type(_) => "Type",
            FrameChange::Width(_) => "Width",
            FrameChange::Color(_) => "Color",
            FrameChange::Opacity(_) => "Opacity",
            FrameChange::Roundness(_) => "Roundness",
            FrameChange::Vignette(_) => "Vignette",
        };
        format!("Frame {field}")
    }
}

/// A named set of frame fields applied in one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramePreset {
    pub name: String,
    pub frame: Frame,
}

impl FramePreset {
    pub fn new(name: impl Into<String>, frame: Frame) -> Self {
        Self {
            name: name.into(),
            frame,
        }
    }

    pub fn builtin() -> Vec<FramePreset> {
        let border = |width: f32, color: Rgb, roundness: f32, vignette: f32| Frame {
            frame_type: FrameType::Border,
            width,
            color,
            opacity: 100.0,
            roundness,
            vignette,
        };
        vec![
            FramePreset::new("None", Frame::default()),
            FramePreset::new("Thin White", border(2.0, Rgb::WHITE, 0.0, 0.0)),
            FramePreset::new("Thick Black", border(8.0, Rgb::BLACK, 0.0, 0.0)),
            FramePreset::new("Polaroid", border(6.0, Rgb::new(250, 250, 245), 0.0, 0.0)),
            FramePreset::new("Rounded", border(4.0, Rgb::WHITE, 40.0, 0.0)),
            FramePreset::new("Vintage", border(5.0, Rgb::new(60, 40, 25), 10.0, 60.0)),
        ]
    }

    /// Applies every field of the preset at once, with the same clamping as single changes.
    pub fn apply_to(&self, frame: &mut Frame) {
        let f = &self.frame;
        for change in [
            FrameChange::Type(f.frame_type),
            FrameChange::Width(f.width),
            FrameChange::Color(f.color),
            FrameChange::Opacity(f.opacity),
            FrameChange::Roundness(f.roundness),
            FrameChange::Vignette(f.vignette),
        ] {
            frame.apply(&change);
        }
    }
}
