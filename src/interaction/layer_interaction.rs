use egui::{Pos2, Rect, Vec2};
use log::debug;

use super::{DragGesture, InteractionError, InteractionResult};
use crate::event::{EditorEvent, InteractionKind};
use crate::geometry::hit_testing::hit_test_layer;
use crate::geometry::transform::{dragged_position, point_space_delta, rotated};
use crate::geometry::{layer_screen_rect, pointer_angle, Corner, HitTarget, Point, ResizeStart};
use crate::layer::{Layer, LayerGeometry, LayerId, LayerPatch};
use crate::state::Editor;

/// Screen rectangle the canvas is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub container: Rect,
}

impl Viewport {
    pub fn new(container: Rect) -> Self {
        Self { container }
    }

    pub fn layer_rect(&self, layer: &Layer) -> Rect {
        layer_screen_rect(&layer.geometry, self.container)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionPhase {
    Idle,
    Dragging,
    Resizing(Corner),
    Rotating,
    DraggingVectorPoint(usize),
}

#[derive(Debug, Clone)]
enum Gesture {
    Drag(DragGesture<Point>),
    Resize {
        corner: Corner,
        gesture: DragGesture<ResizeStart>,
    },
    Rotate {
        center: Pos2,
        /// (initial rotation, initial pointer angle)
        gesture: DragGesture<(f32, f32)>,
    },
    VectorPoint {
        index: usize,
        layer_size: Vec2,
        gesture: DragGesture<Vec<Point>>,
    },
}

impl Gesture {
    fn kind(&self) -> InteractionKind {
        match self {
            Gesture::Drag(_) => InteractionKind::Drag,
            Gesture::Resize { .. } => InteractionKind::Resize,
            Gesture::Rotate { .. } => InteractionKind::Rotate,
            Gesture::VectorPoint { .. } => InteractionKind::VectorPoint,
        }
    }

    fn history_name(&self) -> &'static str {
        match self {
            Gesture::Drag(_) => "Move Layer",
            Gesture::Resize { .. } => "Resize Layer",
            Gesture::Rotate { .. } => "Rotate Layer",
            Gesture::VectorPoint { .. } => "Edit Shape Points",
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveGesture {
    layer_id: LayerId,
    initial_geometry: LayerGeometry,
    initial_points: Option<Vec<Point>>,
    gesture: Gesture,
}

/// Pointer state machine for one canvas.
///
/// At most one gesture runs at a time. Moves write live layer updates; release
/// records one history entry if anything changed; cancel restores the layer.
#[derive(Debug, Clone)]
pub struct LayerInteraction {
    viewport: Viewport,
    keep_aspect: bool,
    active: Option<ActiveGesture>,
}

impl LayerInteraction {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            keep_aspect: false,
            active: None,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Locks the aspect ratio of corner resizes (shift held).
    pub fn set_keep_aspect(&mut self, keep_aspect: bool) {
        self.keep_aspect = keep_aspect;
    }

    pub fn phase(&self) -> InteractionPhase {
        match self.active.as_ref().map(|active| &active.gesture) {
            None => InteractionPhase::Idle,
            Some(Gesture::Drag(_)) => InteractionPhase::Dragging,
            Some(Gesture::Resize { corner, .. }) => InteractionPhase::Resizing(*corner),
            Some(Gesture::Rotate { .. }) => InteractionPhase::Rotating,
            Some(Gesture::VectorPoint { index, .. }) => InteractionPhase::DraggingVectorPoint(*index),
        }
    }

    pub fn active_layer(&self) -> Option<&LayerId> {
        self.active.as_ref().map(|active| &active.layer_id)
    }

    /// Routes a pointer press to the gesture under it.
    ///
    /// Handles of the selected layer are tested first, then layer bodies from
    /// the top of the stack down. A body press only starts a drag when the
    /// active tool allows it; the move tool also selects the pressed layer.
    pub fn pointer_down(&mut self, editor: &mut Editor, pos: Pos2) -> InteractionResult<InteractionPhase> {
        if self.active.is_some() {
            return Err(InteractionError::Busy);
        }

        if let Some(layer) = editor.document().selected_layer().filter(|l| l.visible) {
            let rect = self.viewport.layer_rect(layer);
            let id = layer.id.clone();
            match hit_test_layer(pos, rect, layer.geometry.rotation, layer.vector_points()) {
                Some(HitTarget::VectorPoint(index)) => {
                    self.begin_vector_point(editor, &id, index, pos)?;
                    return Ok(self.phase());
                }
                Some(HitTarget::Rotate) => {
                    self.begin_rotate(editor, &id, pos)?;
                    return Ok(self.phase());
                }
                Some(HitTarget::Corner(corner)) => {
                    self.begin_resize(editor, &id, corner, pos)?;
                    return Ok(self.phase());
                }
                Some(HitTarget::Body) | None => {}
            }
        }

        let hit = editor
            .document()
            .layers()
            .iter()
            .rev()
            .filter(|layer| layer.visible)
            .find(|layer| {
                let rect = self.viewport.layer_rect(layer);
                hit_test_layer(pos, rect, layer.geometry.rotation, None) == Some(HitTarget::Body)
            })
            .map(|layer| layer.id.clone());
        let Some(id) = hit else {
            return Ok(InteractionPhase::Idle);
        };

        let is_selected = editor.document().selected_layer_id() == Some(&id);
        if !editor.active_tool().allows_layer_drag(is_selected) {
            debug!("{} does not drag layers", editor.active_tool());
            return Ok(InteractionPhase::Idle);
        }
        // a press that cannot drag must not move the selection either
        self.unlocked_layer(editor, &id)?;
        if !is_selected {
            editor.document.select_layer(Some(id.clone()))?;
            editor.emit(EditorEvent::SelectionChanged {
                selected_layer: Some(id.clone()),
            });
        }
        self.begin_drag(editor, &id, pos)?;
        Ok(self.phase())
    }

    fn unlocked_layer<'a>(&self, editor: &'a Editor, id: &LayerId) -> InteractionResult<&'a Layer> {
        if self.active.is_some() {
            return Err(InteractionError::Busy);
        }
        let layer = editor.document().layer(id)?;
        if layer.is_locked {
            return Err(InteractionError::LayerLocked(id.clone()));
        }
        Ok(layer)
    }

    fn start(&mut self, editor: &Editor, layer: &Layer, gesture: Gesture) {
        let kind = gesture.kind();
        debug!("Begin {:?} on layer {}", kind, layer.id);
        self.active = Some(ActiveGesture {
            layer_id: layer.id.clone(),
            initial_geometry: layer.geometry,
            initial_points: layer.vector_points().map(<[Point]>::to_vec),
            gesture,
        });
        editor.emit(EditorEvent::InteractionStarted {
            layer_id: layer.id.clone(),
            kind,
        });
    }

    pub fn begin_drag(&mut self, editor: &Editor, id: &LayerId, pos: Pos2) -> InteractionResult<()> {
        let layer = self.unlocked_layer(editor, id)?;
        let gesture = Gesture::Drag(DragGesture::new(pos, layer.geometry.center()));
        self.start(editor, layer, gesture);
        Ok(())
    }

    pub fn begin_resize(
        &mut self,
        editor: &Editor,
        id: &LayerId,
        corner: Corner,
        pos: Pos2,
    ) -> InteractionResult<()> {
        let layer = self.unlocked_layer(editor, id)?;
        let start = ResizeStart::capture(&layer.geometry, self.viewport.container.size());
        let gesture = Gesture::Resize {
            corner,
            gesture: DragGesture::new(pos, start),
        };
        self.start(editor, layer, gesture);
        Ok(())
    }

    pub fn begin_rotate(&mut self, editor: &Editor, id: &LayerId, pos: Pos2) -> InteractionResult<()> {
        let layer = self.unlocked_layer(editor, id)?;
        let center = self.viewport.layer_rect(layer).center();
        let gesture = Gesture::Rotate {
            center,
            gesture: DragGesture::new(pos, (layer.geometry.rotation, pointer_angle(center, pos))),
        };
        self.start(editor, layer, gesture);
        Ok(())
    }

    pub fn begin_vector_point(
        &mut self,
        editor: &Editor,
        id: &LayerId,
        index: usize,
        pos: Pos2,
    ) -> InteractionResult<()> {
        let layer = self.unlocked_layer(editor, id)?;
        let points = layer
            .vector_points()
            .ok_or_else(|| InteractionError::NotVectorShape(id.clone()))?;
        if index >= points.len() {
            return Err(InteractionError::InvalidPointIndex {
                layer_id: id.clone(),
                index,
            });
        }
        let gesture = Gesture::VectorPoint {
            index,
            layer_size: self.viewport.layer_rect(layer).size(),
            gesture: DragGesture::new(pos, points.to_vec()),
        };
        self.start(editor, layer, gesture);
        Ok(())
    }

    /// Live update of the running gesture. Does nothing when idle.
    pub fn pointer_move(&mut self, editor: &mut Editor, pos: Pos2) -> InteractionResult<()> {
        let Some(active) = &self.active else {
            return Ok(());
        };
        let container = self.viewport.container.size();
        let mut geometry = active.initial_geometry;

        let patch = match &active.gesture {
            Gesture::Drag(gesture) => {
                let center = gesture.apply(pos, |initial, delta| dragged_position(*initial, delta, container));
                geometry.x = center.x;
                geometry.y = center.y;
                LayerPatch::geometry(geometry)
            }
            Gesture::Resize { corner, gesture } => {
                let min_percent = editor.config().min_layer_size_percent;
                let (x, y, width, height) = gesture.apply(pos, |start, delta| {
                    start.resize(*corner, delta, container, self.keep_aspect, min_percent)
                });
                geometry.x = x;
                geometry.y = y;
                geometry.width = width;
                geometry.height = height;
                LayerPatch::geometry(geometry)
            }
            Gesture::Rotate { center, gesture } => {
                let (initial_rotation, initial_angle) = *gesture.initial();
                geometry.rotation = rotated(initial_rotation, initial_angle, pointer_angle(*center, pos));
                LayerPatch::geometry(geometry)
            }
            Gesture::VectorPoint {
                index,
                layer_size,
                gesture,
            } => {
                let points = gesture.apply(pos, |initial, delta| {
                    let d = point_space_delta(delta, *layer_size);
                    let mut points = initial.clone();
                    let moved = initial[*index];
                    points[*index] = Point::new(moved.x + d.x, moved.y + d.y).clamped();
                    points
                });
                LayerPatch::points(points)
            }
        };

        editor.document.update_layer(&active.layer_id, &patch)?;
        editor.emit(EditorEvent::LayersChanged);
        Ok(())
    }

    /// Ends the gesture. Records one history entry when the layer changed.
    ///
    /// Returns whether an entry was recorded. The machine is idle afterwards
    /// even if the layer disappeared mid-gesture.
    pub fn pointer_up(&mut self, editor: &mut Editor) -> InteractionResult<bool> {
        let Some(active) = self.active.take() else {
            return Ok(false);
        };
        let changed = match editor.document().layer(&active.layer_id) {
            Ok(layer) => {
                layer.geometry != active.initial_geometry
                    || layer.vector_points() != active.initial_points.as_deref()
            }
            Err(err) => {
                editor.emit(EditorEvent::InteractionEnded {
                    layer_id: active.layer_id,
                    committed: false,
                });
                return Err(err.into());
            }
        };

        if changed {
            editor.commit_layer_update(active.gesture.history_name());
        } else {
            debug!("{:?} on {} changed nothing", active.gesture.kind(), active.layer_id);
        }
        editor.emit(EditorEvent::InteractionEnded {
            layer_id: active.layer_id,
            committed: changed,
        });
        Ok(changed)
    }

    /// Abandons the gesture, restoring the layer as it was at pointer-down.
    pub fn cancel(&mut self, editor: &mut Editor) -> InteractionResult<()> {
        let Some(active) = self.active.take() else {
            return Ok(());
        };
        let patch = LayerPatch {
            geometry: Some(active.initial_geometry),
            points: active.initial_points,
            ..LayerPatch::default()
        };
        let restored = editor.document.update_layer(&active.layer_id, &patch);
        editor.emit(EditorEvent::LayersChanged);
        editor.emit(EditorEvent::InteractionEnded {
            layer_id: active.layer_id,
            committed: false,
        });
        restored.map_err(Into::into)
    }
}
