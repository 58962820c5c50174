use egui::{Pos2, Rect, Vec2, pos2};

use super::Point;

pub const HANDLE_RADIUS: f32 = 8.0;
pub const ROTATION_HANDLE_OFFSET: f32 = 30.0;

/// A corner of a layer's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top_left",
            Corner::TopRight => "top_right",
            Corner::BottomLeft => "bottom_left",
            Corner::BottomRight => "bottom_right",
        }
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    pub fn position(&self, rect: Rect) -> Pos2 {
        match self {
            Corner::TopLeft => rect.left_top(),
            Corner::TopRight => rect.right_top(),
            Corner::BottomLeft => rect.left_bottom(),
            Corner::BottomRight => rect.right_bottom(),
        }
    }
}

/// What a pointer-down landed on, in the order handles take priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    VectorPoint(usize),
    Rotate,
    Corner(Corner),
    Body,
}

/// Screen position of a vector-shape point inside the layer box.
pub fn vector_point_position(point: Point, rect: Rect) -> Pos2 {
    pos2(
        rect.min.x + point.x / 100.0 * rect.width(),
        rect.min.y + point.y / 100.0 * rect.height(),
    )
}

/// Position of the rotate handle above the top edge of an unrotated box.
pub fn rotation_handle_position(rect: Rect) -> Pos2 {
    pos2(rect.center().x, rect.min.y - ROTATION_HANDLE_OFFSET)
}

/// Maps `pos` into the unrotated frame of a box rotated by `rotation` degrees around its center.
fn unrotate(pos: Pos2, center: Pos2, rotation: f32) -> Pos2 {
    if rotation == 0.0 {
        return pos;
    }
    let (sin, cos) = (-rotation.to_radians()).sin_cos();
    let v = pos - center;
    center + Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Hit tests a layer box (`rect`, unrotated) drawn with `rotation` degrees.
///
/// Vector points are only tested when `points` is given.
pub fn hit_test_layer(
    pos: Pos2,
    rect: Rect,
    rotation: f32,
    points: Option<&[Point]>,
) -> Option<HitTarget> {
    let local = unrotate(pos, rect.center(), rotation);

    if let Some(points) = points {
        let hit = points
            .iter()
            .position(|p| vector_point_position(*p, rect).distance(local) <= HANDLE_RADIUS);
        if let Some(index) = hit {
            return Some(HitTarget::VectorPoint(index));
        }
    }

    if rotation_handle_position(rect).distance(local) <= HANDLE_RADIUS {
        return Some(HitTarget::Rotate);
    }

    for corner in Corner::ALL {
        if corner.position(rect).distance(local) <= HANDLE_RADIUS {
            return Some(HitTarget::Corner(corner));
        }
    }

    rect.contains(local).then_some(HitTarget::Body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::from_min_max(pos2(100.0, 100.0), pos2(200.0, 150.0))
    }

    #[test]
    fn corners_win_over_body() {
        let hit = hit_test_layer(pos2(101.0, 101.0), rect(), 0.0, None);
        assert_eq!(hit, Some(HitTarget::Corner(Corner::TopLeft)));
        assert_eq!(hit_test_layer(pos2(150.0, 125.0), rect(), 0.0, None), Some(HitTarget::Body));
        assert_eq!(hit_test_layer(pos2(10.0, 10.0), rect(), 0.0, None), None);
    }

    #[test]
    fn rotate_handle_sits_above_top_edge() {
        let hit = hit_test_layer(pos2(150.0, 70.0), rect(), 0.0, None);
        assert_eq!(hit, Some(HitTarget::Rotate));
    }

    #[test]
    fn rotated_box_is_tested_in_its_own_frame() {
        // a 100x50 box rotated 90 degrees covers x in 125..175 and y in 75..175
        assert_eq!(hit_test_layer(pos2(150.0, 170.0), rect(), 90.0, None), Some(HitTarget::Body));
        assert_eq!(hit_test_layer(pos2(105.0, 125.0), rect(), 90.0, None), None);
    }

    #[test]
    fn vector_points_take_priority() {
        let points = [Point::new(0.0, 0.0), Point::new(50.0, 50.0)];
        let hit = hit_test_layer(pos2(150.0, 125.0), rect(), 0.0, Some(&points));
        assert_eq!(hit, Some(HitTarget::VectorPoint(1)));
    }
}
