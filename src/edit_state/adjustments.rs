use serde::{Deserialize, Serialize};

use super::{EditSlice, EditState};
use crate::color::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdjustmentKey {
    Brightness,
    Contrast,
    Saturation,
    Exposure,
    Highlights,
    Shadows,
    Temperature,
    Tint,
    Vibrance,
    Hue,
}

impl AdjustmentKey {
    pub const ALL: [AdjustmentKey; 10] = [
        AdjustmentKey::Brightness,
        AdjustmentKey::Contrast,
        AdjustmentKey::Saturation,
        AdjustmentKey::Exposure,
        AdjustmentKey::Highlights,
        AdjustmentKey::Shadows,
        AdjustmentKey::Temperature,
        AdjustmentKey::Tint,
        AdjustmentKey::Vibrance,
        AdjustmentKey::Hue,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AdjustmentKey::Brightness => "Brightness",
            AdjustmentKey::Contrast => "Contrast",
            AdjustmentKey::Saturation => "Saturation",
            AdjustmentKey::Exposure => "Exposure",
            AdjustmentKey::Highlights => "Highlights",
            AdjustmentKey::Shadows => "Shadows",
            AdjustmentKey::Temperature => "Temperature",
            AdjustmentKey::Tint => "Tint",
            AdjustmentKey::Vibrance => "Vibrance",
            AdjustmentKey::Hue => "Hue",
        }
    }

    /// Multiplicative adjustments are neutral at 100, additive ones at 0.
    pub fn neutral(&self) -> f32 {
        match self {
            AdjustmentKey::Brightness | AdjustmentKey::Contrast | AdjustmentKey::Saturation => 100.0,
            _ => 0.0,
        }
    }

    pub fn range(&self) -> (f32, f32) {
        match self {
            AdjustmentKey::Brightness | AdjustmentKey::Contrast | AdjustmentKey::Saturation => {
                (0.0, 200.0)
            }
            AdjustmentKey::Hue => (-180.0, 180.0),
            _ => (-100.0, 100.0),
        }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustments {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub exposure: f32,
    pub highlights: f32,
    pub shadows: f32,
    pub temperature: f32,
    pub tint: f32,
    pub vibrance: f32,
    pub hue: f32,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            exposure: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            temperature: 0.0,
            tint: 0.0,
            vibrance: 0.0,
            hue: 0.0,
        }
    }
}

impl Adjustments {
    pub fn get(&self, key: AdjustmentKey) -> f32 {
        match key {
            AdjustmentKey::Brightness => self.brightness,
            AdjustmentKey::Contrast => self.contrast,
            AdjustmentKey::Saturation => self.saturation,
            AdjustmentKey::Exposure => self.exposure,
            AdjustmentKey::Highlights => self.highlights,
            AdjustmentKey::Shadows => self.shadows,
            AdjustmentKey::Temperature => self.temperature,
            AdjustmentKey::Tint => self.tint,
            AdjustmentKey::Vibrance => self.vibrance,
            AdjustmentKey::Hue => self.hue,
        }
    }

    fn get_mut(&mut self, key: AdjustmentKey) -> &mut f32 {
        match key {
            AdjustmentKey::Brightness => &mut self.brightness,
            AdjustmentKey::Contrast => &mut self.contrast,
            AdjustmentKey::Saturation => &mut self.saturation,
            AdjustmentKey::Exposure => &mut self.exposure,
            AdjustmentKey::Highlights => &mut self.highlights,
            AdjustmentKey::Shadows => &mut self.shadows,
            AdjustmentKey::Temperature => &mut self.temperature,
            AdjustmentKey::Tint => &mut self.tint,
            AdjustmentKey::Vibrance => &mut self.vibrance,
            AdjustmentKey::Hue => &mut self.hue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentChange {
    pub key: AdjustmentKey,
    pub value: f32,
}

impl EditSlice for Adjustments {
    type Change = AdjustmentChange;

    fn slice_mut(state: &mut EditState) -> &mut Self {
        &mut state.adjustments
    }

    fn apply(&mut self, change: &AdjustmentChange) {
        *self.get_mut(change.key) = change.key.clamp(change.value);
    }

    fn history_name(change: &AdjustmentChange) -> String {
        format!("Adjust {}", change.key.label())
    }
}

/// Black & white, sepia, invert and split toning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grading {
    pub grayscale: f32,
    pub sepia: f32,
    pub invert: f32,
    pub shadows_tone: Rgb,
    pub highlights_tone: Rgb,
    /// -100 favours shadows, 100 favours highlights
    pub balance: f32,
}

impl Default for Grading {
    fn default() -> Self {
        Self {
            grayscale: 0.0,
            sepia: 0.0,
            invert: 0.0,
            shadows_tone: Rgb::new(128, 128, 128),
            highlights_tone: Rgb::new(128, 128, 128),
            balance: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradingChange {
    Grayscale(f32),
    Sepia(f32),
    Invert(f32),
    Balance(f32),
    ShadowsTone(Rgb),
    HighlightsTone(Rgb),
}

impl EditSlice for Grading {
    type Change = GradingChange;

    fn slice_mut(state: &mut EditState) -> &mut Self {
        &mut state.grading
    }

    fn apply(&mut self, change: &GradingChange) {
        match *change {
            GradingChange::Grayscale(v) => self.grayscale = v.clamp(0.0, 100.0),
            GradingChange::Sepia(v) => self.sepia = v.clamp(0.0, 100.0),
            GradingChange::Invert(v) => self.invert = v.clamp(0.0, 100.0),
            GradingChange::Balance(v) => self.balance = v.clamp(-100.0, 100.0),
            GradingChange::ShadowsTone(c) => self.shadows_tone = c,
            GradingChange::HighlightsTone(c) => self.highlights_tone = c,
        }
    }

    fn history_name(change: &GradingChange) -> String {
        match change {
            GradingChange::Grayscale(_) => "Grayscale",
            GradingChange::Sepia(_) => "Sepia",
            GradingChange::Invert(_) => "Invert",
            GradingChange::Balance(_)
            | GradingChange::ShadowsTone(_)
            | GradingChange::HighlightsTone(_) => "Split Toning",
        }
        .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKey {
    Blur,
    Noise,
    Sharpen,
    Clarity,
    Vignette,
}

impl EffectKey {
    pub fn label(&self) -> &'static str {
        match self {
            EffectKey::Blur => "Blur",
            EffectKey::Noise => "Noise",
            EffectKey::Sharpen => "Sharpen",
            EffectKey::Clarity => "Clarity",
            EffectKey::Vignette => "Vignette",
        }
    }

    pub fn range(&self) -> (f32, f32) {
        match self {
            EffectKey::Blur => (0.0, 50.0),
            EffectKey::Clarity => (-100.0, 100.0),
            _ => (0.0, 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Effects {
    pub blur: f32,
    pub noise: f32,
    pub sharpen: f32,
    pub clarity: f32,
    pub vignette: f32,
}

impl Effects {
    pub fn get(&self, key: EffectKey) -> f32 {
        match key {
            EffectKey::Blur => self.blur,
            EffectKey::Noise => self.noise,
            EffectKey::Sharpen => self.sharpen,
            EffectKey::Clarity => self.clarity,
            EffectKey::Vignette => self.vignette,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectChange {
    pub key: EffectKey,
    pub value: f32,
}

impl EditSlice for Effects {
    type Change = EffectChange;

    fn slice_mut(state: &mut EditState) -> &mut Self {
        &mut state.effects
    }

    fn apply(&mut self, change: &EffectChange) {
        let (min, max) = change.key.range();
        let value = change.value.clamp(min, max);
        match change.key {
            EffectKey::Blur => self.blur = value,
            EffectKey::Noise => self.noise = value,
            EffectKey::Sharpen => self.sharpen = value,
            EffectKey::Clarity => self.clarity = value,
            EffectKey::Vignette => self.vignette = value,
        }
    }

    fn history_name(change: &EffectChange) -> String {
        format!("Effect: {}", change.key.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKey {
    Red,
    Green,
    Blue,
}

/// Per-channel visibility toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channels {
    pub r: bool,
    pub g: bool,
    pub b: bool,
}

impl Default for Channels {
    fn default() -> Self {
        Self { r: true, g: true, b: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelChange {
    pub key: ChannelKey,
    pub enabled: bool,
}

impl EditSlice for Channels {
    type Change = ChannelChange;

    fn slice_mut(state: &mut EditState) -> &mut Self {
        &mut state.channels
    }

    fn apply(&mut self, change: &ChannelChange) {
        match change.key {
            ChannelKey::Red => self.r = change.enabled,
            ChannelKey::Green => self.g = change.enabled,
            ChannelKey::Blue => self.b = change.enabled,
        }
    }

    fn history_name(change: &ChannelChange) -> String {
        let channel = match change.key {
            ChannelKey::Red => "Red",
            ChannelKey::Green => "Green",
            ChannelKey::Blue => "Blue",
        };
        let verb = if change.enabled { "Show" } else { "Hide" };
        format!("{verb} {channel} Channel")
    }
}
