use serde::{Deserialize, Serialize};

use super::{EditSlice, EditState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSettings {
    /// Color distance accepted by the magic wand, 0–255.
    pub tolerance: u8,
    pub feather: f32,
    pub contiguous: bool,
    pub sample_all_layers: bool,
    pub brush_size: f32,
    pub brush_hardness: f32,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            tolerance: 32,
            feather: 0.0,
            contiguous: true,
            sample_all_layers: false,
            brush_size: 40.0,
            brush_hardness: 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionSettingsChange {
    Tolerance(u8),
    Feather(f32),
    Contiguous(bool),
    SampleAllLayers(bool),
    BrushSize(f32),
    BrushHardness(f32),
}

impl EditSlice for SelectionSettings {
    type Change = SelectionSettingsChange;

    fn slice_mut(state: &mut EditState) -> &mut Self {
        &mut state.selection_settings
    }

    fn apply(&mut self, change: &SelectionSettingsChange) {
        match *change {
            SelectionSettingsChange::Tolerance(v) => self.tolerance = v,
            SelectionSettingsChange::Feather(v) => self.feather = v.clamp(0.0, 100.0),
            SelectionSettingsChange::Contiguous(v) => self.contiguous = v,
            SelectionSettingsChange::SampleAllLayers(v) => self.sample_all_layers = v,
            SelectionSettingsChange::BrushSize(v) => self.brush_size = v.clamp(1.0, 500.0),
            SelectionSettingsChange::BrushHardness(v) => self.brush_hardness = v.clamp(0.0, 100.0),
        }
    }

    fn history_name(_change: &SelectionSettingsChange) -> String {
        "Selection Settings".to_string()
    }
}
