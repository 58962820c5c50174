use serde::{Deserialize, Serialize};

use super::{EditSlice, EditState};

/// A control point in 0–255 input/output space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f32,
    pub y: f32,
}

impl CurvePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveChannel {
    All,
    #[serde(rename = "r")]
    Red,
    #[serde(rename = "g")]
    Green,
    #[serde(rename = "b")]
    Blue,
}

impl CurveChannel {
    pub fn label(&self) -> &'static str {
        match self {
            CurveChannel::All => "RGB",
            CurveChannel::Red => "Red",
            CurveChannel::Green => "Green",
            CurveChannel::Blue => "Blue",
        }
    }
}

fn identity() -> Vec<CurvePoint> {
    vec![CurvePoint::new(0.0, 0.0), CurvePoint::new(255.0, 255.0)]
}

/// Brings a point list into canonical form: coordinates clamped to 0–255,
/// sorted by `x`, one point per `x` (the later one wins) and endpoints present
/// at `x = 0` and `x = 255`.
///
/// Endpoint `y` values are left alone so lifted blacks and crushed whites survive.
pub fn normalize_curve(points: &[CurvePoint]) -> Vec<CurvePoint> {
    let mut out: Vec<CurvePoint> = Vec::with_capacity(points.len() + 2);
    for p in points {
        if !p.x.is_finite() || !p.y.is_finite() {
            continue;
        }
        let p = CurvePoint::new(p.x.clamp(0.0, 255.0), p.y.clamp(0.0, 255.0));
        match out.iter_mut().find(|q| q.x == p.x) {
            Some(existing) => *existing = p,
            None => out.push(p),
        }
    }
    out.sort_by(|a, b| a.x.total_cmp(&b.x));

    if out.first().is_none_or(|p| p.x > 0.0) {
        out.insert(0, CurvePoint::new(0.0, 0.0));
    }
    if out.last().is_none_or(|p| p.x < 255.0) {
        out.push(CurvePoint::new(255.0, 255.0));
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curves {
    pub all: Vec<CurvePoint>,
    pub r: Vec<CurvePoint>,
    pub g: Vec<CurvePoint>,
    pub b: Vec<CurvePoint>,
}

impl Default for Curves {
    fn default() -> Self {
        Self {
            all: identity(),
            r: identity(),
            g: identity(),
            b: identity(),
        }
    }
}

impl Curves {
    pub fn channel(&self, channel: CurveChannel) -> &[CurvePoint] {
        match channel {
            CurveChannel::All => &self.all,
            CurveChannel::Red => &self.r,
            CurveChannel::Green => &self.g,
            CurveChannel::Blue => &self.b,
        }
    }

    fn channel_mut(&mut self, channel: CurveChannel) -> &mut Vec<CurvePoint> {
        match channel {
            CurveChannel::All => &mut self.all,
            CurveChannel::Red => &mut self.r,
            CurveChannel::Green => &mut self.g,
            CurveChannel::Blue => &mut self.b,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurvesChange {
    pub channel: CurveChannel,
    pub points: Vec<CurvePoint>,
}

impl EditSlice for Curves {
    type Change = CurvesChange;

    fn slice_mut(state: &mut EditState) -> &mut Self {
        &mut state.curves
    }

    fn apply(&mut self, change: &CurvesChange) {
        *self.channel_mut(change.channel) = normalize_curve(&change.points);
    }

    fn history_name(change: &CurvesChange) -> String {
        format!("Curves ({})", change.channel.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_endpoints_are_inserted() {
        let points = normalize_curve(&[CurvePoint::new(128.0, 160.0)]);
        assert_eq!(
            points,
            vec![
                CurvePoint::new(0.0, 0.0),
                CurvePoint::new(128.0, 160.0),
                CurvePoint::new(255.0, 255.0),
            ]
        );
    }

    #[test]
    fn points_are_sorted_clamped_and_deduplicated() {
        let points = normalize_curve(&[
            CurvePoint::new(300.0, 10.0),
            CurvePoint::new(64.0, 20.0),
            CurvePoint::new(0.0, 30.0),
            CurvePoint::new(64.0, 80.0),
        ]);
        assert_eq!(
            points,
            vec![
                CurvePoint::new(0.0, 30.0),
                CurvePoint::new(64.0, 80.0),
                CurvePoint::new(255.0, 10.0),
            ]
        );
    }

    #[test]
    fn empty_input_becomes_identity() {
        assert_eq!(normalize_curve(&[]), identity());
    }
}
