//! Change/commit pairs for every edit-state slice.
//!
//! `on_*_change` merges into the live state and only notifies subscribers.
//! `on_*_commit` snapshots the state as it already stands; it does not
//! re-apply the value. Sliders call change per tick and commit on release.

use super::Editor;
use crate::color::Rgb;
use crate::command::Command;
use crate::edit_state::{
    AdjustmentChange, AdjustmentKey, Adjustments, ChannelChange, ChannelKey, Channels, CropChange,
    CropRect, CropState, CurveChannel, CurvePoint, Curves, CurvesChange, EditSlice, EditState,
    EffectChange, EffectKey, Effects, Frame, FrameChange, FramePreset, Grading, GradingChange,
    HslAdjustments, HslBand, HslChange, HslComponent, SelectionSettings, SelectionSettingsChange,
    TransformAction, TransformChange, TransformState,
};
use crate::error::EditorResult;
use crate::event::EditorEvent;

impl Editor {
    /// Live change of any slice.
    pub fn on_change<S: EditSlice>(&mut self, change: S::Change) {
        self.document.edit_state.apply::<S>(&change);
        self.emit(EditorEvent::EditStateChanged);
    }

    /// Commit of any slice: records the current state under the change's label.
    pub fn on_commit<S: EditSlice>(&mut self, change: S::Change) {
        self.record_history(S::history_name(&change));
    }

    pub fn on_adjustment_change(&mut self, key: AdjustmentKey, value: f32) {
        self.on_change::<Adjustments>(AdjustmentChange { key, value });
    }

    pub fn on_adjustment_commit(&mut self, key: AdjustmentKey, value: f32) {
        self.on_commit::<Adjustments>(AdjustmentChange { key, value });
    }

    pub fn on_grading_change(&mut self, change: GradingChange) {
        self.on_change::<Grading>(change);
    }

    pub fn on_grading_commit(&mut self, change: GradingChange) {
        self.on_commit::<Grading>(change);
    }

    pub fn on_hsl_change(&mut self, band: HslBand, component: HslComponent, value: f32) {
        self.on_change::<HslAdjustments>(HslChange { band, component, value });
    }

    pub fn on_hsl_commit(&mut self, band: HslBand, component: HslComponent, value: f32) {
        self.on_commit::<HslAdjustments>(HslChange { band, component, value });
    }

    /// Live swatch of the custom HSL band; the band's math is unaffected.
    pub fn set_custom_hsl_color(&mut self, color: Rgb) {
        self.document.edit_state.custom_hsl_color = color;
        self.emit(EditorEvent::EditStateChanged);
    }

    pub fn commit_custom_hsl_color(&mut self) {
        self.record_history("Custom HSL Color");
    }

    pub fn on_curves_change(&mut self, channel: CurveChannel, points: Vec<CurvePoint>) {
        self.on_change::<Curves>(CurvesChange { channel, points });
    }

    pub fn on_curves_commit(&mut self, channel: CurveChannel, points: Vec<CurvePoint>) {
        self.on_commit::<Curves>(CurvesChange { channel, points });
    }

    pub fn on_channel_change(&mut self, key: ChannelKey, enabled: bool) {
        self.on_change::<Channels>(ChannelChange { key, enabled });
    }

    pub fn on_channel_commit(&mut self, key: ChannelKey, enabled: bool) {
        self.on_commit::<Channels>(ChannelChange { key, enabled });
    }

    pub fn on_effect_change(&mut self, key: EffectKey, value: f32) {
        self.on_change::<Effects>(EffectChange { key, value });
    }

    pub fn on_effect_commit(&mut self, key: EffectKey, value: f32) {
        self.on_commit::<Effects>(EffectChange { key, value });
    }

    pub fn on_frame_change(&mut self, change: FrameChange) {
        self.on_change::<Frame>(change);
    }

    pub fn on_frame_commit(&mut self, change: FrameChange) {
        self.on_commit::<Frame>(change);
    }

    /// Presets replace all frame fields at once and commit in the same call.
    pub fn on_frame_preset_change(&mut self, preset: &FramePreset) {
        preset.apply_to(&mut self.document.edit_state.frame);
        self.emit(EditorEvent::EditStateChanged);
        self.record_history(format!("Frame Preset: {}", preset.name));
    }

    pub fn on_crop_change(&mut self, change: CropChange) {
        self.on_change::<CropState>(change);
    }

    pub fn on_crop_commit(&mut self, change: CropChange) {
        self.on_commit::<CropState>(change);
    }

    /// Sets and commits a crop rectangle in one step.
    pub fn apply_crop(&mut self, rect: CropRect) {
        let change = CropChange::Rect(Some(rect));
        self.on_crop_change(change);
        self.on_crop_commit(change);
    }

    /// Locks the crop box to `ratio` (width / height), or frees it.
    pub fn set_crop_aspect(&mut self, ratio: Option<f32>) {
        let change = CropChange::AspectRatio(ratio);
        self.on_crop_change(change);
        self.on_crop_commit(change);
    }

    /// Drops uncommitted crop edits, returning to the crop at the history cursor.
    pub fn cancel_crop(&mut self) {
        self.document.edit_state.crop = self.history.current().state.crop.clone();
        self.emit(EditorEvent::EditStateChanged);
    }

    /// Live free rotation (straighten).
    pub fn on_rotation_change(&mut self, degrees: f32) {
        self.on_change::<TransformState>(TransformChange::Rotation(degrees));
    }

    pub fn on_rotation_commit(&mut self, degrees: f32) {
        self.on_commit::<TransformState>(TransformChange::Rotation(degrees));
    }

    /// Rotate/flip steps have no drag phase and commit immediately.
    pub fn on_transform_action(&mut self, action: TransformAction) {
        let change = TransformChange::Action(action);
        self.on_change::<TransformState>(change);
        self.on_commit::<TransformState>(change);
    }

    pub fn on_selection_settings_change(&mut self, change: SelectionSettingsChange) {
        self.on_change::<SelectionSettings>(change);
    }

    pub fn on_selection_settings_commit(&mut self, change: SelectionSettingsChange) {
        self.on_commit::<SelectionSettings>(change);
    }

    pub fn apply_preset(&mut self, name: impl Into<String>, state: EditState) -> EditorResult<()> {
        self.execute(Command::ApplyPreset {
            name: name.into(),
            state: Box::new(state),
        })
    }

    pub fn reset_all_edits(&mut self) -> EditorResult<()> {
        self.execute(Command::ResetAllEdits)
    }
}
