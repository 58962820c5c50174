//! Coordinate conventions shared by the document model.
//!
//! Three spaces are in play:
//! - **percent space**: layer positions and sizes, 0–100 of the canvas.
//!   `x`/`y` name the layer's *center*.
//! - **point space**: vector-shape control points, 0–100 of the layer's own box.
//! - **image space**: pixels of the source image (masks, selections).
//!
//! Screen-space values (pointer positions, container bounds) use egui's
//! `Pos2`/`Vec2`/`Rect`.

pub mod hit_testing;
pub mod transform;

use serde::{Deserialize, Serialize};

pub use hit_testing::{Corner, HitTarget, HANDLE_RADIUS, ROTATION_HANDLE_OFFSET};
pub use transform::{
    layer_screen_rect, normalize_degrees, percent_delta, pointer_angle, screen_to_image,
    ResizeStart,
};

/// Pixel dimensions of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A point in one of the normalized spaces (percent or point space).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamps both coordinates into `[0, 100]`.
    pub fn clamped(self) -> Self {
        Self::new(self.x.clamp(0.0, 100.0), self.y.clamp(0.0, 100.0))
    }
}
