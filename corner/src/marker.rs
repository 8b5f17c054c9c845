use crate::{CornerError, Descriptor, MaximumDimensions, Result};
use akaze::{Akaze, KeyPoint};
use corner_core::PhysicalSize;
use image::DynamicImage;
use log::*;
use std::path::Path;

/// Checks a marker size given in centimeters.
pub fn physical_size(height: f64, width: f64) -> Result<PhysicalSize> {
    PhysicalSize::new(height, width).ok_or(CornerError::InvalidPhysicalSize { height, width })
}

/// The reference image of known physical size.
///
/// Its features are extracted once, when the marker is created, and reused
/// for every frame.
#[derive(Debug, Clone)]
pub struct Marker {
    image: DynamicImage,
    physical_size: PhysicalSize,
    keypoints: Vec<KeyPoint>,
    descriptors: Vec<Descriptor>,
}

impl Marker {
    pub fn new(image: DynamicImage, physical_size: PhysicalSize, akaze: &Akaze) -> Self {
        let (keypoints, descriptors) = akaze.extract(&image);
        if keypoints.len() < 4 {
            warn!(
                "Marker has only {} features; it is unlikely to be found.",
                keypoints.len()
            );
        }
        Self {
            image,
            physical_size,
            keypoints,
            descriptors,
        }
    }

    /// Reads a marker image from disk and shrinks it to fit `bounds`.
    pub fn open(
        path: impl AsRef<Path>,
        physical_size: PhysicalSize,
        bounds: &MaximumDimensions,
        akaze: &Akaze,
    ) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CornerError::MarkerNotFound(path.to_owned()));
        }
        let image = image::open(path).map_err(|source| CornerError::MarkerImage {
            path: path.to_owned(),
            source,
        })?;
        info!(
            "Loaded {}x{} marker from {}",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(Self::new(bounds.resize_to_fit(&image), physical_size, akaze))
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn width(&self) -> f64 {
        self.image.width() as f64
    }

    pub fn height(&self) -> f64 {
        self.image.height() as f64
    }

    pub fn physical_size(&self) -> PhysicalSize {
        self.physical_size
    }

    pub fn keypoints(&self) -> &[KeyPoint] {
        &self.keypoints
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }
}
