use crate::{is_convex_quadrilateral, PixelPoint, PointMatch};
use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::{Matrix3, Point2};
use sample_consensus::Model;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A 3x3 projective transform from marker image coordinates to frame
/// coordinates.
///
/// Estimators produce it scaled so that the bottom-right entry is `1` when
/// possible, but any non-zero scaling describes the same transform.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Homography(pub Matrix3<f64>);

impl Homography {
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Maps a point through the homography.
    ///
    /// Returns `None` if the point maps to (or numerically near) infinity.
    pub fn project(&self, point: PixelPoint) -> Option<PixelPoint> {
        let p = self.0 * point.to_homogeneous();
        if !p.iter().all(|v| v.is_finite()) || p.z.abs() < 1e-12 {
            return None;
        }
        Some(PixelPoint(Point2::new(p.x / p.z, p.y / p.z)))
    }

    /// A homography is degenerate when it has non-finite entries or is
    /// numerically singular.
    pub fn is_degenerate(&self) -> bool {
        if !self.0.iter().all(|v| v.is_finite()) {
            return true;
        }
        let norm = self.0.norm();
        norm == 0.0 || self.0.determinant().abs() <= 1e-12 * norm.powi(3)
    }

    /// Projects the corners `(0, 0)`, `(w, 0)`, `(w, h)`, `(0, h)` of a
    /// `width` by `height` image.
    ///
    /// Returns `None` if the homography is degenerate, a corner lands at
    /// infinity, or the projected corners do not form a convex quadrilateral.
    pub fn project_corners(&self, width: f64, height: f64) -> Option<[PixelPoint; 4]> {
        if self.is_degenerate() {
            return None;
        }
        let corners = [
            self.project(PixelPoint::new(0.0, 0.0))?,
            self.project(PixelPoint::new(width, 0.0))?,
            self.project(PixelPoint::new(width, height))?,
            self.project(PixelPoint::new(0.0, height))?,
        ];
        is_convex_quadrilateral(&corners).then(|| corners)
    }
}

impl Model<PointMatch> for Homography {
    /// Transfer error in pixels of the frame point.
    fn residual(&self, data: &PointMatch) -> f64 {
        let PointMatch(marker, frame) = *data;
        self.project(marker)
            .map(|projected| projected.distance(&frame))
            .unwrap_or(f64::INFINITY)
    }
}
