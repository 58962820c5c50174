use serde::{Deserialize, Serialize};

use super::{EditSlice, EditState};

/// The nine fixed color bands. `Magenta` doubles as the custom band whose
/// swatch is tracked in [`EditState::custom_hsl_color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HslBand {
    Global,
    Red,
    Orange,
    Yellow,
    Green,
    Aqua,
    Blue,
    Purple,
    Magenta,
}

impl HslBand {
    pub const ALL: [HslBand; 9] = [
        HslBand::Global,
        HslBand::Red,
        HslBand::Orange,
        HslBand::Yellow,
        HslBand::Green,
        HslBand::Aqua,
        HslBand::Blue,
        HslBand::Purple,
        HslBand::Magenta,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HslBand::Global => "Global",
            HslBand::Red => "Red",
            HslBand::Orange => "Orange",
            HslBand::Yellow => "Yellow",
            HslBand::Green => "Green",
            HslBand::Aqua => "Aqua",
            HslBand::Blue => "Blue",
            HslBand::Purple => "Purple",
            HslBand::Magenta => "Custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HslComponent {
    Hue,
    Saturation,
    Luminance,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HslValues {
    /// -180..180
    pub hue: f32,
    /// -100..100
    pub saturation: f32,
    /// -100..100
    pub luminance: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HslAdjustments {
    pub global: HslValues,
    pub red: HslValues,
    pub orange: HslValues,
    pub yellow: HslValues,
    pub green: HslValues,
    pub aqua: HslValues,
    pub blue: HslValues,
    pub purple: HslValues,
    pub magenta: HslValues,
}

impl HslAdjustments {
    pub fn band(&self, band: HslBand) -> &HslValues {
        match band {
            HslBand::Global => &self.global,
            HslBand::Red => &self.red,
            HslBand::Orange => &self.orange,
            HslBand::Yellow => &self.yellow,
            HslBand::Green => &self.green,
            HslBand::Aqua => &self.aqua,
            HslBand::Blue => &self.blue,
            HslBand::Purple => &self.purple,
            HslBand::Magenta => &self.magenta,
        }
    }

    pub fn band_mut(&mut self, band: HslBand) -> &mut HslValues {
        match band {
            HslBand::Global => &mut self.global,
            HslBand::Red => &mut self.red,
            HslBand::Orange => &mut self.orange,
            HslBand::Yellow => &mut self.yellow,
            HslBand::Green => &mut self.green,
            HslBand::Aqua => &mut self.aqua,
            HslBand::Blue => &mut self.blue,
            HslBand::Purple => &mut self.purple,
            HslBand::Magenta => &mut self.magenta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslChange {
    pub band: HslBand,
    pub component: HslComponent,
    pub value: f32,
}

impl EditSlice for HslAdjustments {
    type Change = HslChange;

    fn slice_mut(state: &mut EditState) -> &mut Self {
        &mut state.hsl_adjustments
    }

    fn apply(&mut self, change: &HslChange) {
        let values = self.band_mut(change.band);
        match change.component {
            HslComponent::Hue => values.hue = change.value.clamp(-180.0, 180.0),
            HslComponent::Saturation => values.saturation = change.value.clamp(-100.0, 100.0),
            HslComponent::Luminance => values.luminance = change.value.clamp(-100.0, 100.0),
        }
    }

    fn history_name(change: &HslChange) -> String {
        format!("HSL: {}", change.band.label())
    }
}
