use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::geometry::Point;
use crate::mask::Mask;

/// A stable layer identifier. Assigned once at creation, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    pub const BACKGROUND: &'static str = "background";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn background() -> Self {
        Self(Self::BACKGROUND.to_string())
    }

    pub fn is_background(&self) -> bool {
        self.0 == Self::BACKGROUND
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

/// Placement of a layer on the canvas.
///
/// `x`/`y` are the center in percent of the canvas, `width`/`height` are percent
/// of the canvas, `rotation` is degrees and the signed scales encode flips.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Default for LayerGeometry {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            width: 100.0,
            height: 100.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl LayerGeometry {
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    /// Reference to the decoded image (URL or data URL), owned by the host.
    pub source: String,
    pub natural_width: u32,
    pub natural_height: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingContent {
    /// Externally rendered paint data; `None` until something is drawn.
    pub data_url: Option<String>,
    pub fill: Option<Rgb>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStroke {
    pub color: Rgb,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextShadow {
    pub color: Rgb,
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub content: String,
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: u16,
    pub color: Rgb,
    pub align: TextAlign,
    pub letter_spacing: f32,
    pub line_height: f32,
    pub stroke: Option<TextStroke>,
    pub shadow: Option<TextShadow>,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            content: "New Text".to_string(),
            font_family: "Roboto".to_string(),
            font_size: 48.0,
            font_weight: 400,
            color: Rgb::BLACK,
            align: TextAlign::Center,
            letter_spacing: 0.0,
            line_height: 1.2,
            stroke: None,
            shadow: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeType {
    Rectangle,
    Ellipse,
    Triangle,
    Polygon,
    Star,
    Line,
    Arrow,
}

impl ShapeType {
    pub fn label(&self) -> &'static str {
        match self {
            ShapeType::Rectangle => "Rectangle",
            ShapeType::Ellipse => "Ellipse",
            ShapeType::Triangle => "Triangle",
            ShapeType::Polygon => "Polygon",
            ShapeType::Star => "Star",
            ShapeType::Line => "Line",
            ShapeType::Arrow => "Arrow",
        }
    }

    /// Editable control points in point space. Ellipses are drawn from the box.
    pub fn default_points(&self) -> Vec<Point> {
        match self {
            ShapeType::Rectangle => vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(0.0, 100.0),
            ],
            ShapeType::Ellipse => Vec::new(),
            ShapeType::Triangle => vec![
                Point::new(50.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(0.0, 100.0),
            ],
            ShapeType::Polygon => regular_points(6, 50.0, 0.0),
            ShapeType::Star => star_points(5),
            ShapeType::Line => vec![Point::new(0.0, 50.0), Point::new(100.0, 50.0)],
            ShapeType::Arrow => vec![
                Point::new(0.0, 35.0),
                Point::new(60.0, 35.0),
                Point::new(60.0, 10.0),
                Point::new(100.0, 50.0),
                Point::new(60.0, 90.0),
                Point::new(60.0, 65.0),
                Point::new(0.0, 65.0),
            ],
        }
    }
}

fn regular_points(count: usize, radius: f32, phase: f32) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = phase + i as f32 * std::f32::consts::TAU / count as f32
                - std::f32::consts::FRAC_PI_2;
            Point::new(50.0 + radius * angle.cos(), 50.0 + radius * angle.sin()).clamped()
        })
        .collect()
}

fn star_points(tips: usize) -> Vec<Point> {
    let outer = regular_points(tips, 50.0, 0.0);
    let inner = regular_points(tips, 20.0, std::f32::consts::PI / tips as f32);
    outer.into_iter().zip(inner).flat_map(|(o, i)| [o, i]).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorShapeContent {
    pub shape_type: ShapeType,
    pub points: Vec<Point>,
    pub fill_color: Option<Rgb>,
    pub stroke_color: Option<Rgb>,
    pub stroke_width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    #[default]
    Linear,
    Radial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: Rgb,
    /// 0–100 along the gradient axis
    pub position: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientContent {
    pub gradient_type: GradientType,
    pub angle: f32,
    pub stops: Vec<GradientStop>,
}

impl Default for GradientContent {
    fn default() -> Self {
        Self {
            gradient_type: GradientType::Linear,
            angle: 90.0,
            stops: vec![
                GradientStop { color: Rgb::BLACK, position: 0.0 },
                GradientStop { color: Rgb::WHITE, position: 100.0 },
            ],
        }
    }
}

/// The global adjustment an adjustment layer mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdjustmentTarget {
    BrightnessContrast,
    HueSaturation,
    Curves,
    ColorGrading,
    Channels,
    Effects,
}

impl AdjustmentTarget {
    pub fn label(&self) -> &'static str {
        match self {
            AdjustmentTarget::BrightnessContrast => "Brightness/Contrast",
            AdjustmentTarget::HueSaturation => "Hue/Saturation",
            AdjustmentTarget::Curves => "Curves",
            AdjustmentTarget::ColorGrading => "Color Grading",
            AdjustmentTarget::Channels => "Channels",
            AdjustmentTarget::Effects => "Effects",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentContent {
    pub mirrors: AdjustmentTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartObjectContent {
    pub source: String,
    pub natural_width: u32,
    pub natural_height: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupContent {
    pub children: Vec<LayerId>,
    pub expanded: bool,
}

/// Per-type payload of a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LayerKind {
    Image(ImageContent),
    Drawing(DrawingContent),
    Text(TextContent),
    VectorShape(VectorShapeContent),
    Gradient(GradientContent),
    Adjustment(AdjustmentContent),
    SmartObject(SmartObjectContent),
    Group(GroupContent),
}

impl LayerKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            LayerKind::Image(_) => "image",
            LayerKind::Drawing(_) => "drawing",
            LayerKind::Text(_) => "text",
            LayerKind::VectorShape(_) => "vector-shape",
            LayerKind::Gradient(_) => "gradient",
            LayerKind::Adjustment(_) => "adjustment",
            LayerKind::SmartObject(_) => "smart-object",
            LayerKind::Group(_) => "group",
        }
    }

    /// Human-readable name used in history labels ("Add Text Layer").
    pub fn label(&self) -> &'static str {
        match self {
            LayerKind::Image(_) => "Image",
            LayerKind::Drawing(_) => "Drawing",
            LayerKind::Text(_) => "Text",
            LayerKind::VectorShape(_) => "Shape",
            LayerKind::Gradient(_) => "Gradient",
            LayerKind::Adjustment(_) => "Adjustment",
            LayerKind::SmartObject(_) => "Smart Object",
            LayerKind::Group(_) => "Group",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    /// 0–100
    pub opacity: f32,
    pub blend_mode: BlendMode,
    pub is_locked: bool,
    pub mask: Option<Mask>,
    pub geometry: LayerGeometry,
    pub kind: LayerKind,
}

impl Layer {
    pub fn new(id: LayerId, name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            opacity: 100.0,
            blend_mode: BlendMode::Normal,
            is_locked: false,
            mask: None,
            geometry: LayerGeometry::default(),
            kind,
        }
    }

    pub fn with_geometry(mut self, geometry: LayerGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn locked(mut self) -> Self {
        self.is_locked = true;
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn vector_points(&self) -> Option<&[Point]> {
        match &self.kind {
            LayerKind::VectorShape(shape) => Some(&shape.points),
            _ => None,
        }
    }

    /// Applies every field present in `patch`. Values are stored as given.
    pub fn apply(&mut self, patch: &LayerPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
        if let Some(blend_mode) = patch.blend_mode {
            self.blend_mode = blend_mode;
        }
        if let Some(is_locked) = patch.is_locked {
            self.is_locked = is_locked;
        }
        if let Some(mask) = &patch.mask {
            self.mask = mask.clone();
        }
        if let Some(geometry) = patch.geometry {
            self.geometry = geometry;
        }
        if let Some(points) = &patch.points {
            if let LayerKind::VectorShape(shape) = &mut self.kind {
                shape.points = points.clone();
            }
        }
        if let Some(kind) = &patch.kind {
            self.kind = kind.clone();
        }
    }
}

/// A partial update for [`Layer::apply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerPatch {
    pub name: Option<String>,
    pub visible: Option<bool>,
    pub opacity: Option<f32>,
    pub blend_mode: Option<BlendMode>,
    pub is_locked: Option<bool>,
    pub mask: Option<Option<Mask>>,
    pub geometry: Option<LayerGeometry>,
    pub points: Option<Vec<Point>>,
    pub kind: Option<LayerKind>,
}

impl LayerPatch {
    pub fn geometry(geometry: LayerGeometry) -> Self {
        Self {
            geometry: Some(geometry),
            ..Self::default()
        }
    }

    pub fn points(points: Vec<Point>) -> Self {
        Self {
            points: Some(points),
            ..Self::default()
        }
    }

    pub fn opacity(opacity: f32) -> Self {
        Self {
            opacity: Some(opacity),
            ..Self::default()
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// True when the patch moves, resizes, rotates or reshapes the layer.
    pub fn touches_geometry(&self) -> bool {
        self.geometry.is_some() || self.points.is_some()
    }
}

/// Factory functions for creating layers
pub mod factory {
    use super::*;
    use crate::geometry::Dimensions;
    use crate::id_generator::generate_layer_id;

    /// The locked background layer of a new project, filled with `color`.
    pub fn create_background(color: Rgb) -> Layer {
        Layer::new(
            LayerId::background(),
            "Background",
            LayerKind::Drawing(DrawingContent {
                data_url: None,
                fill: Some(color),
            }),
        )
        .locked()
    }

    /// The locked background layer of a loaded image.
    pub fn create_image_background(source: impl Into<String>, dimensions: Dimensions) -> Layer {
        Layer::new(
            LayerId::background(),
            "Background",
            LayerKind::Image(ImageContent {
                source: source.into(),
                natural_width: dimensions.width,
                natural_height: dimensions.height,
            }),
        )
        .locked()
    }

    /// An image layer scaled to fit inside the canvas, keeping its aspect ratio.
    pub fn create_image(
        name: impl Into<String>,
        source: impl Into<String>,
        natural: Dimensions,
        canvas: Dimensions,
    ) -> Layer {
        let geometry = fit_inside(natural, canvas);
        Layer::new(
            generate_layer_id(),
            name,
            LayerKind::Image(ImageContent {
                source: source.into(),
                natural_width: natural.width,
                natural_height: natural.height,
            }),
        )
        .with_geometry(geometry)
    }

    pub fn create_drawing(name: impl Into<String>) -> Layer {
        Layer::new(generate_layer_id(), name, LayerKind::Drawing(DrawingContent::default()))
    }

    pub fn create_text(content: impl Into<String>) -> Layer {
        let content = content.into();
        let name = if content.is_empty() { "Text".to_string() } else { content.clone() };
        Layer::new(
            generate_layer_id(),
            name,
            LayerKind::Text(TextContent {
                content,
                ..TextContent::default()
            }),
        )
        .with_geometry(LayerGeometry::centered(40.0, 15.0))
    }

    pub fn create_shape(shape_type: ShapeType, fill: Rgb) -> Layer {
        Layer::new(
            generate_layer_id(),
            shape_type.label(),
            LayerKind::VectorShape(VectorShapeContent {
                shape_type,
                points: shape_type.default_points(),
                fill_color: Some(fill),
                stroke_color: None,
                stroke_width: 0.0,
            }),
        )
        .with_geometry(LayerGeometry::centered(30.0, 30.0))
    }

    pub fn create_gradient(gradient: GradientContent) -> Layer {
        Layer::new(generate_layer_id(), "Gradient", LayerKind::Gradient(gradient))
    }

    pub fn create_adjustment(target: AdjustmentTarget) -> Layer {
        Layer::new(
            generate_layer_id(),
            target.label(),
            LayerKind::Adjustment(AdjustmentContent { mirrors: target }),
        )
    }

    pub fn create_smart_object(
        name: impl Into<String>,
        source: impl Into<String>,
        natural: Dimensions,
        canvas: Dimensions,
    ) -> Layer {
        Layer::new(
            generate_layer_id(),
            name,
            LayerKind::SmartObject(SmartObjectContent {
                source: source.into(),
                natural_width: natural.width,
                natural_height: natural.height,
            }),
        )
        .with_geometry(fit_inside(natural, canvas))
    }

    pub fn create_group(name: impl Into<String>, children: Vec<LayerId>) -> Layer {
        Layer::new(
            generate_layer_id(),
            name,
            LayerKind::Group(GroupContent {
                children,
                expanded: true,
            }),
        )
    }

    fn fit_inside(natural: Dimensions, canvas: Dimensions) -> LayerGeometry {
        if natural.is_empty() || canvas.is_empty() {
            return LayerGeometry::default();
        }
        let width = natural.width as f32 / canvas.width as f32 * 100.0;
        let height = natural.height as f32 / canvas.height as f32 * 100.0;
        let shrink = (100.0 / width).min(100.0 / height).min(1.0);
        LayerGeometry::centered(width * shrink, height * shrink)
    }
}
