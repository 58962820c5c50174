//! The document-wide, non-destructive edit pipeline.
//!
//! [`EditState`] is always fully populated. Every change goes through an
//! [`EditSlice`], which merges into its own slice and never replaces the
//! whole record; wholesale replacement only happens on history moves,
//! project load and preset application.

mod adjustments;
mod crop;
mod curves;
mod frame;
mod hsl;
mod selection_settings;
mod transform;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::mask::Mask;

pub use adjustments::{
    AdjustmentChange, AdjustmentKey, Adjustments, ChannelChange, ChannelKey, Channels, EffectChange,
    EffectKey, Effects, Grading, GradingChange,
};
pub use crop::{CropChange, CropRect, CropState};
pub use curves::{normalize_curve, CurveChannel, CurvePoint, Curves, CurvesChange};
pub use frame::{Frame, FrameChange, FramePreset, FrameType};
pub use hsl::{HslAdjustments, HslBand, HslChange, HslComponent, HslValues};
pub use selection_settings::{SelectionSettings, SelectionSettingsChange};
pub use transform::{TransformAction, TransformChange, TransformState};

/// One slice of [`EditState`] together with the changes it accepts.
pub trait EditSlice: Sized {
    type Change: Clone + fmt::Debug;

    fn slice_mut(state: &mut EditState) -> &mut Self;

    /// Merges `change` into this slice, clamping values to their ranges.
    fn apply(&mut self, change: &Self::Change);

    /// Label of the history entry a commit of `change` records.
    fn history_name(change: &Self::Change) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditState {
    pub adjustments: Adjustments,
    pub grading: Grading,
    pub hsl_adjustments: HslAdjustments,
    pub curves: Curves,
    pub channels: Channels,
    pub effects: Effects,
    pub frame: Frame,
    pub crop: CropState,
    pub transform: TransformState,
    pub selection_settings: SelectionSettings,
    /// The single active selection of the document.
    pub selection_mask: Option<Mask>,
    pub selective_blur_mask: Option<Mask>,
    pub selective_sharpen_mask: Option<Mask>,
    /// Swatch of the custom (magenta) HSL band.
    pub custom_hsl_color: Rgb,
}

impl Default for EditState {
    fn default() -> Self {
        Self {
            adjustments: Adjustments::default(),
            grading: Grading::default(),
            hsl_adjustments: HslAdjustments::default(),
            curves: Curves::default(),
            channels: Channels::default(),
            effects: Effects::default(),
            frame: Frame::default(),
            crop: CropState::default(),
            transform: TransformState::default(),
            selection_settings: SelectionSettings::default(),
            selection_mask: None,
            selective_blur_mask: None,
            selective_sharpen_mask: None,
            custom_hsl_color: Rgb::new(255, 0, 255),
        }
    }
}

impl EditState {
    /// The defaults every new document starts from.
    pub fn initial() -> Self {
        Self::default()
    }

    /// Applies `change` to the slice it belongs to.
    pub fn apply<S: EditSlice>(&mut self, change: &S::Change) {
        S::slice_mut(self).apply(change);
    }
}
