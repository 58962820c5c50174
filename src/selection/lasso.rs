use egui::Pos2;

use crate::tools::LassoMode;

/// Points of a lasso in image pixels.
///
/// Freehand paths collect every pointer move; polygonal paths collect clicks
/// and close when a click lands near the first point.
#[derive(Debug, Clone, PartialEq)]
pub struct LassoPath {
    mode: LassoMode,
    points: Vec<Pos2>,
    closed: bool,
}

impl LassoPath {
    pub const MIN_POINTS: usize = 3;

    pub fn new(mode: LassoMode) -> Self {
        Self {
            mode,
            points: Vec::new(),
            closed: false,
        }
    }

    pub fn mode(&self) -> LassoMode {
        self.mode
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Freehand drag sample. Ignored once closed.
    pub fn extend(&mut self, point: Pos2) {
        if !self.closed && self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    /// Polygonal click. Returns true when it closed the loop.
    pub fn click(&mut self, point: Pos2, close_radius: f32) -> bool {
        if self.closed {
            return true;
        }
        let near_start = self
            .points
            .first()
            .is_some_and(|first| first.distance(point) <= close_radius);
        if near_start && self.points.len() >= Self::MIN_POINTS {
            self.closed = true;
        } else {
            self.points.push(point);
        }
        self.closed
    }

    /// Double-click or pointer release. Returns false if too few points.
    pub fn close(&mut self) -> bool {
        self.closed = self.can_close();
        self.closed
    }

    pub fn can_close(&self) -> bool {
        self.points.len() >= Self::MIN_POINTS
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.closed = false;
    }
}
