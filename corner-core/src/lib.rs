//! # Corner Core
//!
//! Common types shared by the crates that make up the corner virtual ruler.
//! Everything that crosses a crate boundary lives here: pixel points and the
//! geometry utilities that operate on them, marker-to-frame point matches,
//! the [`Homography`] model that consensus estimators produce, the
//! [`OrientedBoundingBox`] of a segmented object, and the physical quantities
//! ([`PhysicalSize`], [`Calibration`], [`Measurement`]) used to turn pixels
//! into centimeters.
//!
//! ## Axis convention
//!
//! A marker of [`PhysicalSize`] `(height, width)` is projected into a frame as
//! the quadrilateral `c0 c1 c2 c3`, built from the marker image corners
//! `(0, 0)`, `(w, 0)`, `(w, h)`, `(0, h)`. The edge `c0 c1` is the marker's
//! width and becomes [`Calibration::x`]; the edge `c1 c2` is its height and
//! becomes [`Calibration::y`]. An [`OrientedBoundingBox`] orders its corners
//! the same way, so its edge `b0 b1` is measured against `x` and the physical
//! width, and `b1 b2` against `y` and the physical height.
//!
//! ```text
//!   c0 ---- x ---- c1
//!    |              |
//!    |   marker     y
//!    |              |
//!   c3 ----------- c2
//! ```

mod homography;
mod matches;
mod point;
mod rect;
mod size;

pub use homography::*;
pub use matches::*;
pub use nalgebra;
pub use point::*;
pub use rect::*;
pub use sample_consensus;
pub use size::*;
