use std::fs;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::renderer::{render_checked, RenderError, RenderRequest, Renderer};
use crate::state::Editor;

pub const MIN_QUALITY: u8 = 10;
pub const MAX_QUALITY: u8 = 100;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to encode {format:?}: {source}")]
    Encode {
        format: ExportFormat,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Webp => "webp",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Webp => "image/webp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// 10–100; only JPEG is lossy; PNG and WebP are written lossless.
    pub quality: u8,
}

impl ExportOptions {
    pub fn new(format: ExportFormat, quality: u8) -> Self {
        Self {
            format,
            quality: quality.clamp(MIN_QUALITY, MAX_QUALITY),
        }
    }

    pub fn from_config(editor: &Editor, format: ExportFormat) -> Self {
        Self::new(format, editor.config().default_export_quality)
    }
}

/// Encodes an already rendered image.
pub fn encode_image(image: &RgbaImage, options: ExportOptions) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    let (width, height) = image.dimensions();
    let quality = options.quality.clamp(MIN_QUALITY, MAX_QUALITY);

    let result = match options.format {
        ExportFormat::Png => {
            PngEncoder::new(&mut bytes).write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
        }
        ExportFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, quality).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        ExportFormat::Webp => WebPEncoder::new_lossless(&mut bytes).write_image(
            image.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
    };
    result.map_err(|source| ExportError::Encode {
        format: options.format,
        source,
    })?;
    Ok(bytes)
}

/// Renders the current document in export mode and encodes it.
pub fn export_image(
    editor: &Editor,
    renderer: &dyn Renderer,
    source: Option<&RgbaImage>,
    options: ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let image = render_checked(renderer, &RenderRequest::export(editor, source))?;
    let bytes = encode_image(&image, options)?;
    info!(
        "Exported {}x{} {:?} ({} bytes)",
        image.width(),
        image.height(),
        options.format,
        bytes.len()
    );
    Ok(bytes)
}

pub fn export_to_file(
    editor: &Editor,
    renderer: &dyn Renderer,
    source: Option<&RgbaImage>,
    options: ExportOptions,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let bytes = export_image(editor, renderer, source, options)?;
    fs::write(path, bytes)?;
    Ok(())
}
