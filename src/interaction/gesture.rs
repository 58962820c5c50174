use egui::{Pos2, Vec2};

/// A pointer gesture: where it started and what the target looked like then.
///
/// Every update is computed from `initial` and the total pointer delta, never
/// accumulated, so dropped move events cannot drift the result.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture<T> {
    origin: Pos2,
    initial: T,
}

impl<T> DragGesture<T> {
    pub fn new(origin: Pos2, initial: T) -> Self {
        Self { origin, initial }
    }

    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    pub fn initial(&self) -> &T {
        &self.initial
    }

    pub fn delta(&self, pointer: Pos2) -> Vec2 {
        pointer - self.origin
    }

    /// Runs `update` with the initial value and the delta to `pointer`.
    pub fn apply<R>(&self, pointer: Pos2, update: impl FnOnce(&T, Vec2) -> R) -> R {
        update(&self.initial, self.delta(pointer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn delta_is_total_since_origin() {
        let gesture = DragGesture::new(pos2(10.0, 10.0), 5.0_f32);
        assert_eq!(gesture.delta(pos2(15.0, 7.0)), vec2(5.0, -3.0));
        let moved = gesture.apply(pos2(20.0, 10.0), |initial, d| initial + d.x);
        assert_eq!(moved, 15.0);
    }
}
