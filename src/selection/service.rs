use std::collections::VecDeque;

use async_trait::async_trait;
use egui::Pos2;
use image::{imageops, Rgba, RgbaImage};
use log::debug;

use crate::config::EditorConfig;
use crate::geometry::Dimensions;
use crate::mask::{Mask, MaskError, MaskOp, MaskPatch};

pub type MaskResult = Result<Mask, MaskError>;

/// Produces document-sized masks. Every call may fail; callers keep their
/// previous selection when it does.
#[async_trait]
pub trait MaskService: Send + Sync {
    /// Fills the polygon `points` (image pixels) with the even-odd rule.
    async fn polygon_to_mask(&self, points: &[Pos2], dimensions: Dimensions) -> MaskResult;

    /// Selects pixels whose color is within `tolerance` of the pixel at `point`.
    async fn flood_fill(&self, point: Pos2, dimensions: Dimensions, tolerance: u8) -> MaskResult;

    /// Composites `patch` into `existing` (or an empty mask).
    async fn merge_masks(
        &self,
        existing: Option<&Mask>,
        patch: &MaskPatch,
        dimensions: Dimensions,
        op: MaskOp,
    ) -> MaskResult;

    /// Finds the main object, optionally seeded by a click in image pixels.
    async fn object_detect(&self, dimensions: Dimensions, seed: Option<Pos2>) -> MaskResult;
}

/// CPU mask service over the decoded source image.
#[derive(Debug, Clone, Default)]
pub struct RasterMaskService {
    source: Option<RgbaImage>,
    feather: f32,
}

impl RasterMaskService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Service feathered per the editor settings.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new().with_feather(config.magic_wand_feather)
    }

    pub fn with_source(mut self, source: RgbaImage) -> Self {
        self.source = Some(source);
        self
    }

    /// Blur sigma applied to flood-fill results.
    pub fn with_feather(mut self, feather: f32) -> Self {
        self.feather = feather.max(0.0);
        self
    }

    pub fn set_source(&mut self, source: Option<RgbaImage>) {
        self.source = source;
    }
}

fn check_dimensions(mask: &Mask, expected: Dimensions) -> Result<(), MaskError> {
    if mask.dimensions() != expected {
        return Err(MaskError::DimensionMismatch {
            expected,
            actual: mask.dimensions(),
        });
    }
    Ok(())
}

/// Even-odd scanline fill, sampling each pixel at its center.
pub fn rasterize_polygon(points: &[Pos2], dimensions: Dimensions) -> Mask {
    let mut mask = Mask::empty(dimensions);
    if points.len() < 3 {
        return mask;
    }

    let mut crossings = Vec::with_capacity(points.len());
    for y in 0..dimensions.height {
        let sy = y as f32 + 0.5;
        crossings.clear();
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            if (a.y <= sy && b.y > sy) || (b.y <= sy && a.y > sy) {
                crossings.push(a.x + (sy - a.y) / (b.y - a.y) * (b.x - a.x));
            }
        }
        crossings.sort_by(f32::total_cmp);

        for span in crossings.chunks_exact(2) {
            let start = (span[0] - 0.5).ceil().max(0.0) as u32;
            let end = (span[1] - 0.5).floor().min(dimensions.width as f32 - 1.0);
            if end < 0.0 {
                continue;
            }
            for x in start..=end as u32 {
                mask.set(x, y, 255);
            }
        }
    }
    mask
}

fn color_distance(a: &Rgba<u8>, b: &Rgba<u8>) -> u8 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(x, y)| x.abs_diff(*y))
        .max()
        .unwrap_or(0)
}

fn contiguous_fill(source: &RgbaImage, seed: (u32, u32), tolerance: u8) -> Mask {
    let (width, height) = source.dimensions();
    let mut mask = Mask::empty(Dimensions::new(width, height));
    let target = *source.get_pixel(seed.0, seed.1);

    let mut queue = VecDeque::from([seed]);
    mask.set(seed.0, seed.1, 255);
    while let Some((x, y)) = queue.pop_front() {
        let neighbours = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in neighbours {
            if nx >= width || ny >= height || mask.get(nx, ny) != 0 {
                continue;
            }
            if color_distance(source.get_pixel(nx, ny), &target) <= tolerance {
                mask.set(nx, ny, 255);
                queue.push_back((nx, ny));
            }
        }
    }
    mask
}

#[async_trait]
impl MaskService for RasterMaskService {
    async fn polygon_to_mask(&self, points: &[Pos2], dimensions: Dimensions) -> MaskResult {
        if dimensions.is_empty() {
            return Err(MaskError::RenderFailed("empty document".to_string()));
        }
        Ok(rasterize_polygon(points, dimensions))
    }

    async fn flood_fill(&self, point: Pos2, dimensions: Dimensions, tolerance: u8) -> MaskResult {
        let source = self.source.as_ref().ok_or(MaskError::ImageNotReady)?;
        let actual = Dimensions::new(source.width(), source.height());
        if actual != dimensions {
            return Err(MaskError::DimensionMismatch {
                expected: dimensions,
                actual,
            });
        }
        if point.x < 0.0 || point.y < 0.0 || point.x >= actual.width as f32 || point.y >= actual.height as f32 {
            return Err(MaskError::RenderFailed(format!(
                "seed ({:.0}, {:.0}) is outside the image",
                point.x, point.y
            )));
        }

        let mask = contiguous_fill(source, (point.x as u32, point.y as u32), tolerance);
        debug!("Flood fill covered {} pixels", mask.coverage());
        if self.feather > 0.0 {
            Ok(Mask::from_gray(imageops::blur(&mask.to_gray(), self.feather)))
        } else {
            Ok(mask)
        }
    }

    async fn merge_masks(
        &self,
        existing: Option<&Mask>,
        patch: &MaskPatch,
        dimensions: Dimensions,
        op: MaskOp,
    ) -> MaskResult {
        let base = match existing {
            Some(mask) => {
                check_dimensions(mask, dimensions)?;
                mask.clone()
            }
            None => Mask::empty(dimensions),
        };
        Ok(base.merged(patch, op))
    }

    async fn object_detect(&self, _dimensions: Dimensions, _seed: Option<Pos2>) -> MaskResult {
        Err(MaskError::Unsupported("Object detection"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use futures::executor::block_on;

    #[test]
    fn rectangle_polygon_fills_inclusive_pixels() {
        let square = [pos2(2.0, 2.0), pos2(6.0, 2.0), pos2(6.0, 5.0), pos2(2.0, 5.0)];
        let mask = rasterize_polygon(&square, Dimensions::new(10, 10));
        assert_eq!(mask.coverage(), 4 * 3);
        assert_eq!(mask.get(2, 2), 255);
        assert_eq!(mask.get(6, 2), 0);
    }

    #[test]
    fn flood_fill_stops_at_color_edges() {
        let mut source = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        for y in 0..8 {
            for x in 4..8 {
                source.put_pixel(x, y, Rgba([250, 250, 250, 255]));
            }
        }
        let service = RasterMaskService::new().with_source(source);
        let mask = block_on(service.flood_fill(pos2(1.0, 1.0), Dimensions::new(8, 8), 10)).unwrap();
        assert_eq!(mask.coverage(), 32);
        assert_eq!(mask.get(5, 5), 0);
    }

    #[test]
    fn flood_fill_without_source_is_not_ready() {
        let service = RasterMaskService::new();
        let err = block_on(service.flood_fill(pos2(0.0, 0.0), Dimensions::new(4, 4), 0)).unwrap_err();
        assert_eq!(err, MaskError::ImageNotReady);
    }
}
