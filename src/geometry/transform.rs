use egui::{Pos2, Rect, Vec2, pos2, vec2};

use super::{Corner, Dimensions, Point};
use crate::layer::LayerGeometry;

/// Converts a screen-space delta into a percentage of `container`.
///
/// A degenerate container yields a zero delta.
pub fn percent_delta(delta_px: Vec2, container: Vec2) -> Vec2 {
    let axis = |d: f32, size: f32| if size > 0.0 { d / size * 100.0 } else { 0.0 };
    vec2(axis(delta_px.x, container.x), axis(delta_px.y, container.y))
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Angle of `pointer` around `center` in degrees, screen coordinates (y down).
pub fn pointer_angle(center: Pos2, pointer: Pos2) -> f32 {
    let v = pointer - center;
    v.y.atan2(v.x).to_degrees()
}

/// Rotation after the pointer moved from `initial_angle` to `current_angle`.
pub fn rotated(initial_rotation: f32, initial_angle: f32, current_angle: f32) -> f32 {
    normalize_degrees(initial_rotation + (current_angle - initial_angle))
}

/// The on-screen, unrotated box of a layer inside `container`.
pub fn layer_screen_rect(geometry: &LayerGeometry, container: Rect) -> Rect {
    let size = container.size();
    let center = pos2(
        container.min.x + geometry.x / 100.0 * size.x,
        container.min.y + geometry.y / 100.0 * size.y,
    );
    Rect::from_center_size(
        center,
        vec2(geometry.width / 100.0 * size.x, geometry.height / 100.0 * size.y),
    )
}

/// Maps a screen position over the displayed image to image pixels.
///
/// `displayed` is the image's on-screen bounding rect, `natural` its decoded size.
pub fn screen_to_image(pos: Pos2, displayed: Rect, natural: Dimensions) -> Pos2 {
    let size = displayed.size();
    let scale = |natural: u32, shown: f32| if shown > 0.0 { natural as f32 / shown } else { 0.0 };
    pos2(
        (pos.x - displayed.min.x) * scale(natural.width, size.x),
        (pos.y - displayed.min.y) * scale(natural.height, size.y),
    )
}

/// New center position for a layer dragged by `delta_px`.
pub fn dragged_position(initial: Point, delta_px: Vec2, container: Vec2) -> Point {
    let d = percent_delta(delta_px, container);
    Point::new(initial.x + d.x, initial.y + d.y)
}

/// Snapshot of a layer box taken when a corner drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStart {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub width_px: f32,
    pub height_px: f32,
    /// Pixel aspect ratio (width / height) at gesture start.
    pub aspect: f32,
}

impl ResizeStart {
    pub fn capture(geometry: &LayerGeometry, container: Vec2) -> Self {
        let width_px = geometry.width / 100.0 * container.x;
        let height_px = geometry.height / 100.0 * container.y;
        Self {
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            width_px,
            height_px,
            aspect: if height_px > 0.0 { width_px / height_px } else { 1.0 },
        }
    }

    /// Resized box `(x, y, width, height)` in percent for a corner drag of `delta_px`.
    ///
    /// Width and height never drop below `min_percent`. Left and top corners
    /// shift the center by half the applied change so the opposite edge stays put.
    pub fn resize(
        &self,
        corner: Corner,
        delta_px: Vec2,
        container: Vec2,
        keep_aspect: bool,
        min_percent: f32,
    ) -> (f32, f32, f32, f32) {
        let dx = if corner.is_left() { -delta_px.x } else { delta_px.x };
        let dy = if corner.is_top() { -delta_px.y } else { delta_px.y };

        let width_px = self.width_px + dx;
        let mut height_px = self.height_px + dy;
        if keep_aspect && self.aspect > 0.0 {
            height_px = width_px / self.aspect;
        }

        let to_percent = |px: f32, size: f32| if size > 0.0 { px / size * 100.0 } else { 0.0 };
        let width = to_percent(width_px, container.x).max(min_percent);
        let height = to_percent(height_px, container.y).max(min_percent);

        let mut x = self.x;
        let mut y = self.y;
        if corner.is_left() {
            x -= (width - self.width) / 2.0;
        }
        if corner.is_top() {
            y -= (height - self.height) / 2.0;
        }
        (x, y, width, height)
    }
}

/// Converts a pointer delta into point space of a layer box of `layer_size` pixels.
pub fn point_space_delta(delta_px: Vec2, layer_size: Vec2) -> Vec2 {
    percent_delta(delta_px, layer_size)
}
