use std::fmt;

/// Marquee shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarqueeShape {
    Rectangle,
    Ellipse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LassoMode {
    Freehand,
    Polygonal,
}

/// Every tool the editor can have active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolType {
    #[default]
    Move,
    Marquee(MarqueeShape),
    Lasso(LassoMode),
    MagicWand,
    QuickSelect,
    ObjectSelect,
    SelectionBrush,
    Brush,
    Eraser,
    SelectiveBlur,
    SelectiveSharpen,
    Text,
    Shape,
    Gradient,
    Crop,
    Eyedropper,
    Hand,
    Zoom,
}

impl ToolType {
    pub fn name(&self) -> &'static str {
        match self {
            ToolType::Move => "Move",
            ToolType::Marquee(MarqueeShape::Rectangle) => "Rectangular Marquee",
            ToolType::Marquee(MarqueeShape::Ellipse) => "Elliptical Marquee",
            ToolType::Lasso(LassoMode::Freehand) => "Lasso",
            ToolType::Lasso(LassoMode::Polygonal) => "Polygonal Lasso",
            ToolType::MagicWand => "Magic Wand",
            ToolType::QuickSelect => "Quick Select",
            ToolType::ObjectSelect => "Object Select",
            ToolType::SelectionBrush => "Selection Brush",
            ToolType::Brush => "Brush",
            ToolType::Eraser => "Eraser",
            ToolType::SelectiveBlur => "Selective Blur",
            ToolType::SelectiveSharpen => "Selective Sharpen",
            ToolType::Text => "Text",
            ToolType::Shape => "Shape",
            ToolType::Gradient => "Gradient",
            ToolType::Crop => "Crop",
            ToolType::Eyedropper => "Eyedropper",
            ToolType::Hand => "Hand",
            ToolType::Zoom => "Zoom",
        }
    }

    /// Paint and selection tools own the pointer; a selected layer cannot be
    /// dragged while one of them is active.
    pub fn blocks_layer_drag(&self) -> bool {
        matches!(
            self,
            ToolType::Marquee(_)
                | ToolType::Lasso(_)
                | ToolType::MagicWand
                | ToolType::QuickSelect
                | ToolType::ObjectSelect
                | ToolType::SelectionBrush
                | ToolType::Brush
                | ToolType::Eraser
                | ToolType::SelectiveBlur
                | ToolType::SelectiveSharpen
                | ToolType::Gradient
                | ToolType::Crop
                | ToolType::Eyedropper
        )
    }

    /// Whether pressing on a layer with this tool may start a drag.
    ///
    /// The move tool can grab any layer; other non-blocking tools only the selected one.
    pub fn allows_layer_drag(&self, layer_is_selected: bool) -> bool {
        *self == ToolType::Move || (layer_is_selected && !self.blocks_layer_drag())
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
