//! Greyscale masks: white marks selected/affected pixels, black marks the rest.

use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Dimensions;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MaskError {
    #[error("Mask size {actual:?} does not match document size {expected:?}")]
    DimensionMismatch {
        expected: Dimensions,
        actual: Dimensions,
    },

    #[error("Image is not decoded yet")]
    ImageNotReady,

    #[error("Mask rendering failed: {0}")]
    RenderFailed(String),

    #[error("{0} is not available")]
    Unsupported(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskOp {
    Add,
    Subtract,
}

/// A greyscale mask the size of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    pub fn empty(dimensions: Dimensions) -> Self {
        Self {
            width: dimensions.width,
            height: dimensions.height,
            data: vec![0; dimensions.pixel_count()],
        }
    }

    pub fn filled(dimensions: Dimensions) -> Self {
        Self {
            width: dimensions.width,
            height: dimensions.height,
            data: vec![255; dimensions.pixel_count()],
        }
    }

    pub fn from_gray(image: GrayImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }

    pub fn to_gray(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| Luma([self.get(x, y)]))
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Value at `(x, y)`; out-of-bounds reads are unselected.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[(y as usize) * (self.width as usize) + x as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        if x < self.width && y < self.height {
            self.data[(y as usize) * (self.width as usize) + x as usize] = value;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|v| *v == 0)
    }

    /// Number of pixels with any coverage.
    pub fn coverage(&self) -> usize {
        self.data.iter().filter(|v| **v > 0).count()
    }

    /// Returns `self` with `patch` composited in: OR for [`MaskOp::Add`],
    /// AND-NOT for [`MaskOp::Subtract`].
    pub fn merged(&self, patch: &MaskPatch, op: MaskOp) -> Mask {
        let mut out = self.clone();
        let (pw, ph) = (patch.mask.width as i64, patch.mask.height as i64);
        for py in 0..ph {
            let y = patch.y as i64 + py;
            if y < 0 || y >= self.height as i64 {
                continue;
            }
            for px in 0..pw {
                let x = patch.x as i64 + px;
                if x < 0 || x >= self.width as i64 {
                    continue;
                }
                let value = patch.mask.get(px as u32, py as u32);
                let (x, y) = (x as u32, y as u32);
                let current = out.get(x, y);
                let merged = match op {
                    MaskOp::Add => current.max(value),
                    MaskOp::Subtract => current.min(255 - value),
                };
                out.set(x, y, merged);
            }
        }
        out
    }
}

/// A brush-stroke mask placed at an offset in document pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskPatch {
    pub x: i32,
    pub y: i32,
    pub mask: Mask,
}

impl MaskPatch {
    pub fn new(x: i32, y: i32, mask: Mask) -> Self {
        Self { x, y, mask }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtract_clears_only_covered_pixels() {
        let dims = Dimensions::new(4, 4);
        let base = Mask::filled(dims);
        let patch = MaskPatch::new(1, 1, Mask::filled(Dimensions::new(2, 2)));
        let merged = base.merged(&patch, MaskOp::Subtract);
        assert_eq!(merged.coverage(), 12);
        assert_eq!(merged.get(1, 1), 0);
        assert_eq!(merged.get(0, 0), 255);
    }

    #[test]
    fn patch_outside_document_is_clipped() {
        let dims = Dimensions::new(4, 4);
        let patch = MaskPatch::new(3, -1, Mask::filled(Dimensions::new(3, 3)));
        let merged = Mask::empty(dims).merged(&patch, MaskOp::Add);
        assert_eq!(merged.coverage(), 2);
    }

    #[test]
    fn gray_image_conversion_preserves_pixels() {
        let mut mask = Mask::empty(Dimensions::new(3, 2));
        mask.set(2, 1, 200);
        let back = Mask::from_gray(mask.to_gray());
        assert_eq!(back, mask);
    }
}
