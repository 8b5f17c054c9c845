//! # Corner
//!
//! Measures flat objects in camera frames using a printed reference marker of
//! known physical size.
//!
//! Every frame goes through the same steps:
//!
//! 1. The frame is scaled down to fit the [`MaximumDimensions`].
//! 2. When the [`RecalibrationPolicy`] says so, the [`MarkerLocator`] matches
//!    AKAZE features between the marker image and the frame, estimates a
//!    homography with ARRSAC and projects the marker corners into the frame.
//!    The lengths of two adjacent projected edges give the [`Calibration`]:
//!    how many pixels the marker's physical width and height span.
//! 3. The [`ObjectSegmenter`] finds the largest closed edge contour and its
//!    minimum-area bounding box.
//! 4. The box edges are converted to centimeters with [`measure`].
//!
//! A failed detection never clears the calibration; frames keep being
//! measured with the last one that was found.
//!
//! ```text
//!   marker corners          c0 ---------- c1
//!                            |    width    |
//!                            |             | height
//!                           c3 ---------- c2
//! ```
//!
//! `|c0 c1|` is the x calibration and pairs with the physical width, `|c1 c2|`
//! is the y calibration and pairs with the physical height.

mod annotate;
mod error;
mod locator;
mod marker;
mod matching;
mod measure;
mod normalize;
mod pipeline;
mod schedule;
mod segment;
mod settings;
mod source;

pub use annotate::*;
pub use error::*;
pub use locator::*;
pub use marker::*;
pub use matching::*;
pub use measure::*;
pub use normalize::*;
pub use pipeline::*;
pub use schedule::*;
pub use segment::*;
pub use settings::*;
pub use source::*;

pub use akaze::{self, Akaze};
pub use corner_core::*;
