use image::RgbaImage;
use thiserror::Error;

use crate::edit_state::EditState;
use crate::geometry::Dimensions;
use crate::layer::Layer;
use crate::state::Editor;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("Source image is not available")]
    SourceUnavailable,

    #[error("Renderer produced {actual:?}, expected {expected:?}")]
    SizeMismatch {
        expected: Dimensions,
        actual: Dimensions,
    },

    #[error("Rendering failed: {0}")]
    Failed(String),
}

/// Everything a renderer needs to rasterize the document.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub layers: &'a [Layer],
    pub dimensions: Dimensions,
    pub edit_state: &'a EditState,
    pub source: Option<&'a RgbaImage>,
    /// Interactive preview; the renderer may take shortcuts.
    pub is_preview: bool,
    /// Final output; full quality, no preview shortcuts.
    pub is_exporting: bool,
}

impl<'a> RenderRequest<'a> {
    pub fn preview(editor: &'a Editor, source: Option<&'a RgbaImage>) -> Self {
        Self::from_editor(editor, source, true, false)
    }

    pub fn export(editor: &'a Editor, source: Option<&'a RgbaImage>) -> Self {
        Self::from_editor(editor, source, false, true)
    }

    fn from_editor(editor: &'a Editor, source: Option<&'a RgbaImage>, is_preview: bool, is_exporting: bool) -> Self {
        let document = editor.document();
        Self {
            layers: document.layers(),
            dimensions: document.dimensions(),
            edit_state: &document.edit_state,
            source,
            is_preview,
            is_exporting,
        }
    }
}

/// Rasterizes layers plus edit state. Must be deterministic for equal requests.
pub trait Renderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<RgbaImage, RenderError>;
}

/// Renders and checks that the output matches the document size.
pub fn render_checked(renderer: &dyn Renderer, request: &RenderRequest<'_>) -> Result<RgbaImage, RenderError> {
    let image = renderer.render(request)?;
    let actual = Dimensions::new(image.width(), image.height());
    if actual != request.dimensions {
        return Err(RenderError::SizeMismatch {
            expected: request.dimensions,
            actual,
        });
    }
    Ok(image)
}
