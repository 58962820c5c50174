//! Selection and mask pipeline.
//!
//! Each operation asks a [`MaskService`] for a document-sized mask, stores it
//! in the edit state and records one history entry. Rejected input and
//! service failures notify the user and leave the document as it was.

mod lasso;
mod service;

use egui::{pos2, Pos2, Rect};
use log::debug;

pub use lasso::LassoPath;
pub use service::{rasterize_polygon, MaskResult, MaskService, RasterMaskService};

use crate::edit_state::EditState;
use crate::error::Outcome;
use crate::event::EditorEvent;
use crate::geometry::{screen_to_image, Dimensions};
use crate::mask::{Mask, MaskOp, MaskPatch};
use crate::state::Editor;
use crate::tools::MarqueeShape;

const ELLIPSE_SEGMENTS: usize = 64;

/// Where the image is drawn on screen and its decoded size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageView {
    pub displayed: Rect,
    pub natural: Dimensions,
}

impl ImageView {
    pub fn new(displayed: Rect, natural: Dimensions) -> Self {
        Self { displayed, natural }
    }

    pub fn to_image(&self, screen: Pos2) -> Pos2 {
        screen_to_image(screen, self.displayed, self.natural)
    }
}

/// Which edit-state mask a brush stroke paints into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskTarget {
    Selection,
    SelectiveBlur,
    SelectiveSharpen,
}

impl MaskTarget {
    fn slot(self, state: &EditState) -> Option<&Mask> {
        match self {
            MaskTarget::Selection => state.selection_mask.as_ref(),
            MaskTarget::SelectiveBlur => state.selective_blur_mask.as_ref(),
            MaskTarget::SelectiveSharpen => state.selective_sharpen_mask.as_ref(),
        }
    }

    fn slot_mut(self, state: &mut EditState) -> &mut Option<Mask> {
        match self {
            MaskTarget::Selection => &mut state.selection_mask,
            MaskTarget::SelectiveBlur => &mut state.selective_blur_mask,
            MaskTarget::SelectiveSharpen => &mut state.selective_sharpen_mask,
        }
    }

    fn history_name(self, op: MaskOp) -> &'static str {
        match (self, op) {
            (MaskTarget::Selection, MaskOp::Add) => "Brush Selection",
            (MaskTarget::Selection, MaskOp::Subtract) => "Brush Deselection",
            (MaskTarget::SelectiveBlur, MaskOp::Add) => "Selective Blur",
            (MaskTarget::SelectiveBlur, MaskOp::Subtract) => "Erase Selective Blur",
            (MaskTarget::SelectiveSharpen, MaskOp::Add) => "Selective Sharpen",
            (MaskTarget::SelectiveSharpen, MaskOp::Subtract) => "Erase Selective Sharpen",
        }
    }
}

fn store_mask(editor: &mut Editor, target: MaskTarget, mask: Mask, name: &str) -> Outcome {
    let dimensions = editor.document().dimensions();
    if mask.dimensions() != dimensions {
        return editor.fail(format!(
            "{name} returned a {:?} mask for a {:?} document",
            mask.dimensions(),
            dimensions
        ));
    }
    debug!("{name}: {} pixels covered", mask.coverage());
    *target.slot_mut(&mut editor.document.edit_state) = Some(mask);
    editor.emit(EditorEvent::EditStateChanged);
    editor.record_history(name);
    Outcome::Applied
}

fn store_result(editor: &mut Editor, result: MaskResult, name: &str) -> Outcome {
    match result {
        Ok(mask) => store_mask(editor, MaskTarget::Selection, mask, name),
        Err(err) => editor.fail(format!("{name} failed: {err}")),
    }
}

/// Closed polygon approximating the ellipse inscribed in `rect`.
fn ellipse_polygon(rect: Rect) -> Vec<Pos2> {
    let center = rect.center();
    let (rx, ry) = (rect.width() / 2.0, rect.height() / 2.0);
    (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let t = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
            pos2(center.x + rx * t.cos(), center.y + ry * t.sin())
        })
        .collect()
}

/// Marquee between two screen points over the displayed image.
pub async fn marquee_select(
    editor: &mut Editor,
    service: &dyn MaskService,
    view: &ImageView,
    shape: MarqueeShape,
    start: Pos2,
    end: Pos2,
) -> Outcome {
    marquee_select_pixels(editor, service, shape, view.to_image(start), view.to_image(end)).await
}

/// Marquee between two corners in image pixels.
///
/// Boxes narrower or shorter than `min_selection_px` are rejected.
pub async fn marquee_select_pixels(
    editor: &mut Editor,
    service: &dyn MaskService,
    shape: MarqueeShape,
    a: Pos2,
    b: Pos2,
) -> Outcome {
    let rect = Rect::from_two_pos(a, b);
    let min = editor.config().min_selection_px;
    if rect.width() < min || rect.height() < min {
        return editor.reject(format!(
            "Selection too small ({:.0}x{:.0} px); drag at least {min:.0} px",
            rect.width(),
            rect.height()
        ));
    }

    let polygon = match shape {
        MarqueeShape::Rectangle => vec![rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()],
        MarqueeShape::Ellipse => ellipse_polygon(rect),
    };
    let dimensions = editor.document().dimensions();
    let result = service.polygon_to_mask(&polygon, dimensions).await;
    store_result(editor, result, "Marquee Selection")
}

pub async fn lasso_select(editor: &mut Editor, service: &dyn MaskService, path: &LassoPath) -> Outcome {
    if !path.can_close() {
        return editor.reject(format!(
            "A lasso needs at least {} points",
            LassoPath::MIN_POINTS
        ));
    }
    let dimensions = editor.document().dimensions();
    let result = service.polygon_to_mask(path.points(), dimensions).await;
    store_result(editor, result, "Lasso Selection")
}

/// Flood fill from a click, using the selection tolerance.
pub async fn magic_wand_select(
    editor: &mut Editor,
    service: &dyn MaskService,
    view: &ImageView,
    click: Pos2,
) -> Outcome {
    let tolerance = editor.edit_state().selection_settings.tolerance;
    let dimensions = editor.document().dimensions();
    let result = service.flood_fill(view.to_image(click), dimensions, tolerance).await;
    store_result(editor, result, "Magic Wand Selection")
}

/// Like the magic wand, but adds the filled region to the current selection.
pub async fn quick_select(
    editor: &mut Editor,
    service: &dyn MaskService,
    view: &ImageView,
    click: Pos2,
) -> Outcome {
    let tolerance = editor.edit_state().selection_settings.tolerance;
    let dimensions = editor.document().dimensions();
    let region = match service.flood_fill(view.to_image(click), dimensions, tolerance).await {
        Ok(region) => region,
        Err(err) => return editor.fail(format!("Quick Selection failed: {err}")),
    };
    let existing = editor.edit_state().selection_mask.clone();
    let patch = MaskPatch::new(0, 0, region);
    let result = service
        .merge_masks(existing.as_ref(), &patch, dimensions, MaskOp::Add)
        .await;
    store_result(editor, result, "Quick Selection")
}

/// Object detection, seeded by the click when one is given.
pub async fn object_select(
    editor: &mut Editor,
    service: &dyn MaskService,
    view: &ImageView,
    click: Option<Pos2>,
) -> Outcome {
    let dimensions = editor.document().dimensions();
    let seed = click.map(|pos| view.to_image(pos));
    let result = service.object_detect(dimensions, seed).await;
    store_result(editor, result, "Object Selection")
}

/// Merges one finished brush stroke into `target`.
pub async fn apply_brush_stroke(
    editor: &mut Editor,
    service: &dyn MaskService,
    target: MaskTarget,
    patch: &MaskPatch,
    op: MaskOp,
) -> Outcome {
    let dimensions = editor.document().dimensions();
    let existing = target.slot(editor.edit_state()).cloned();
    match service.merge_masks(existing.as_ref(), patch, dimensions, op).await {
        Ok(mask) => store_mask(editor, target, mask, target.history_name(op)),
        Err(err) => editor.fail(format!("Brush stroke failed: {err}")),
    }
}

/// Rasterizes a stroke of round dabs into a patch covering its bounds.
///
/// `hardness` is 0–100; softer brushes fade linearly toward the rim.
/// Returns `None` for an empty stroke.
pub fn brush_stroke_patch(points: &[Pos2], size: f32, hardness: f32) -> Option<MaskPatch> {
    let radius = (size / 2.0).max(0.5);
    let hard = (hardness / 100.0).clamp(0.0, 1.0) * radius;
    let bounds = points
        .iter()
        .fold(None::<Rect>, |acc, p| {
            let dab = Rect::from_center_size(*p, egui::Vec2::splat(radius * 2.0));
            Some(acc.map_or(dab, |r| r.union(dab)))
        })?;

    let (x0, y0) = (bounds.min.x.floor() as i32, bounds.min.y.floor() as i32);
    let width = (bounds.max.x.ceil() as i32 - x0).max(1) as u32;
    let height = (bounds.max.y.ceil() as i32 - y0).max(1) as u32;
    let mut mask = Mask::empty(Dimensions::new(width, height));

    for y in 0..height {
        for x in 0..width {
            let center = pos2((x0 + x as i32) as f32 + 0.5, (y0 + y as i32) as f32 + 0.5);
            let distance = points
                .iter()
                .map(|p| p.distance(center))
                .fold(f32::INFINITY, f32::min);
            let value = if distance <= hard {
                255.0
            } else if distance < radius {
                255.0 * (radius - distance) / (radius - hard)
            } else {
                0.0
            };
            mask.set(x, y, value as u8);
        }
    }
    Some(MaskPatch::new(x0, y0, mask))
}

/// Drops the active selection.
pub fn clear_selection(editor: &mut Editor) -> Outcome {
    if editor.edit_state().selection_mask.is_none() {
        return editor.reject("Nothing is selected");
    }
    editor.document.edit_state.selection_mask = None;
    editor.emit(EditorEvent::EditStateChanged);
    editor.record_history("Deselect");
    Outcome::Applied
}

/// Selects the whole document.
pub fn select_all(editor: &mut Editor) -> Outcome {
    let mask = Mask::filled(editor.document().dimensions());
    store_mask(editor, MaskTarget::Selection, mask, "Select All")
}
