use crate::{CornerError, MaximumDimensions, Result};
use std::time::Duration;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The settings for the measurement pipeline.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CornerSettings {
    /// The threshold used for akaze
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_akaze_threshold")
    )]
    pub akaze_threshold: f64,
    /// The best match must be closer than this fraction of the second best match
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_lowes_ratio"))]
    pub lowes_ratio: f32,
    /// The minimum number of matches surviving the ratio test to attempt a homography
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_minimum_good_matches")
    )]
    pub minimum_good_matches: usize,
    /// The transfer error in pixels under which a match is a homography inlier
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_consensus_threshold")
    )]
    pub consensus_threshold: f64,
    /// The maximum height in pixels of frames and of the marker image
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_max_height"))]
    pub max_height: u32,
    /// The maximum width in pixels of frames and of the marker image
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_max_width"))]
    pub max_width: u32,
    /// The standard deviation of the blur applied before edge detection
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_blur_sigma"))]
    pub blur_sigma: f32,
    /// The low Canny threshold; the high threshold is three times this
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_canny_threshold")
    )]
    pub canny_threshold: f32,
    /// The minimum time between two marker detections
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_recalibration_interval_ms")
    )]
    pub recalibration_interval_ms: u64,
    /// The height in pixels of overlay text
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_label_scale"))]
    pub label_scale: f32,
}

impl CornerSettings {
    pub fn maximum_dimensions(&self) -> MaximumDimensions {
        MaximumDimensions::new(self.max_height, self.max_width)
    }

    pub fn recalibration_interval(&self) -> Duration {
        Duration::from_millis(self.recalibration_interval_ms)
    }

    /// Rejects settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| Err(CornerError::Settings(message.to_owned()));
        if !(self.lowes_ratio > 0.0 && self.lowes_ratio <= 1.0) {
            return invalid("lowes_ratio must be in (0, 1]");
        }
        if self.minimum_good_matches < 4 {
            return invalid("minimum_good_matches must be at least 4");
        }
        if !(self.consensus_threshold > 0.0) {
            return invalid("consensus_threshold must be positive");
        }
        if !(self.akaze_threshold > 0.0) {
            return invalid("akaze_threshold must be positive");
        }
        if self.max_height == 0 || self.max_width == 0 {
            return invalid("max_height and max_width must be positive");
        }
        if !(self.blur_sigma > 0.0) || !(self.canny_threshold > 0.0) {
            return invalid("blur_sigma and canny_threshold must be positive");
        }
        Ok(())
    }
}

impl Default for CornerSettings {
    fn default() -> Self {
        Self {
            akaze_threshold: default_akaze_threshold(),
            lowes_ratio: default_lowes_ratio(),
            minimum_good_matches: default_minimum_good_matches(),
            consensus_threshold: default_consensus_threshold(),
            max_height: default_max_height(),
            max_width: default_max_width(),
            blur_sigma: default_blur_sigma(),
            canny_threshold: default_canny_threshold(),
            recalibration_interval_ms: default_recalibration_interval_ms(),
            label_scale: default_label_scale(),
        }
    }
}

fn default_akaze_threshold() -> f64 {
    0.001
}

fn default_lowes_ratio() -> f32 {
    0.7
}

fn default_minimum_good_matches() -> usize {
    8
}

fn default_consensus_threshold() -> f64 {
    3.0
}

fn default_max_height() -> u32 {
    720
}

fn default_max_width() -> u32 {
    1280
}

fn default_blur_sigma() -> f32 {
    1.5
}

fn default_canny_threshold() -> f32 {
    50.0
}

fn default_recalibration_interval_ms() -> u64 {
    1000
}

fn default_label_scale() -> f32 {
    20.0
}
