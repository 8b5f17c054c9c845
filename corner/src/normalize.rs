use image::{imageops::FilterType, DynamicImage};
use log::*;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The bounding box frames and marker images are shrunk to fit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MaximumDimensions {
    pub height: u32,
    pub width: u32,
}

impl MaximumDimensions {
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// The uniform factor that brings a `width` by `height` image within
    /// bounds, or `None` if no resize is needed.
    ///
    /// Height is checked first. Only if the height fits is the width checked,
    /// and only the first overflowing dimension decides the factor.
    pub fn scale_factor(&self, width: u32, height: u32) -> Option<f64> {
        if width == 0 || height == 0 {
            None
        } else if height > self.height {
            Some(self.height as f64 / height as f64)
        } else if width > self.width {
            Some(self.width as f64 / width as f64)
        } else {
            None
        }
    }

    /// The size a `width` by `height` image has after [`Self::resize_to_fit`].
    pub fn fitted_size(&self, width: u32, height: u32) -> (u32, u32) {
        let scaled = |v: u32, factor: f64| ((v as f64 * factor).round() as u32).max(1);
        match self.scale_factor(width, height) {
            None => (width, height),
            Some(factor) if height > self.height => (scaled(width, factor), self.height),
            Some(factor) => (self.width, scaled(height, factor)),
        }
    }

    /// Shrinks the image to fit, preserving the aspect ratio.
    pub fn resize_to_fit(&self, image: &DynamicImage) -> DynamicImage {
        let (width, height) = (image.width(), image.height());
        let (new_width, new_height) = self.fitted_size(width, height);
        if (new_width, new_height) == (width, height) {
            return image.clone();
        }
        trace!(
            "Resizing {}x{} image to {}x{}.",
            width,
            height,
            new_width,
            new_height
        );
        image.resize_exact(new_width, new_height, FilterType::Triangle)
    }
}

impl Default for MaximumDimensions {
    fn default() -> Self {
        Self::new(720, 1280)
    }
}
