use crate::{pixel_distance, PixelPoint};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Real-world size of the marker in centimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PhysicalSize {
    height: f64,
    width: f64,
}

impl PhysicalSize {
    /// Both components must be finite and strictly positive.
    pub fn new(height: f64, width: f64) -> Option<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        (valid(height) && valid(width)).then(|| Self { height, width })
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn width(&self) -> f64 {
        self.width
    }
}

/// Pixel lengths of the two adjacent marker edges as last detected in a frame.
///
/// `x` is the projected length of the marker's width edge and `y` of its
/// height edge. Both are strictly positive, so they are always safe divisors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Calibration {
    x: f64,
    y: f64,
}

impl Calibration {
    /// Returns `None` unless both lengths are finite and strictly positive.
    pub fn new(x: f64, y: f64) -> Option<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        (valid(x) && valid(y)).then(|| Self { x, y })
    }

    /// Builds a calibration from the projected marker corners `c0 c1 c2 c3`.
    ///
    /// `x` is `|c0 c1|` and `y` is `|c1 c2|`.
    pub fn from_corners(corners: &[PixelPoint; 4]) -> Option<Self> {
        Self::new(
            pixel_distance(corners[0], corners[1]),
            pixel_distance(corners[1], corners[2]),
        )
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// Physical size of a measured object in centimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Measurement {
    pub width: f64,
    pub height: f64,
}
