use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::Point2;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A point on an image frame in pixel coordinates, with +x to the right and
/// +y towards the bottom of the image.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PixelPoint(pub Point2<f64>);

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self(Point2::new(x, y))
    }

    /// Euclidean distance to `other` in pixels.
    pub fn distance(&self, other: &Self) -> f64 {
        pixel_distance(*self, *other)
    }
}

impl From<(f32, f32)> for PixelPoint {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x as f64, y as f64)
    }
}

/// Computes the pixel distance between two points.
pub fn pixel_distance(a: PixelPoint, b: PixelPoint) -> f64 {
    nalgebra::distance(&a.0, &b.0)
}

/// Point halfway between `a` and `b`.
pub fn midpoint(a: PixelPoint, b: PixelPoint) -> PixelPoint {
    PixelPoint(nalgebra::center(&a.0, &b.0))
}

/// Area enclosed by a closed polygon, using the shoelace formula.
///
/// The orientation of the polygon does not matter. Fewer than three points
/// enclose no area.
pub fn polygon_area(points: &[PixelPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice_area: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    0.5 * twice_area.abs()
}

/// Checks that the four points form a strictly convex quadrilateral when
/// connected in order.
///
/// A marker seen through a valid homography always projects to one; a
/// self-intersecting or collapsed quadrilateral means the estimate is
/// unusable.
pub fn is_convex_quadrilateral(corners: &[PixelPoint; 4]) -> bool {
    let turn = |i: usize| {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        let c = corners[(i + 2) % 4];
        (b.0 - a.0).perp(&(c.0 - b.0))
    };
    let turns = [turn(0), turn(1), turn(2), turn(3)];
    turns.iter().all(|&t| t > 0.0) || turns.iter().all(|&t| t < 0.0)
}
