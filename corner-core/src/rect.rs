use crate::{pixel_distance, PixelPoint};
use nalgebra::Vector2;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The minimum-area rectangle, at any rotation, enclosing a contour.
///
/// `width` runs along the direction given by `angle` (degrees, clockwise on
/// screen since +y points down) and `height` runs perpendicular to it. The
/// angle is kept in `[-45, 45)`, swapping `width` and `height` when needed,
/// so the same rectangle always has the same description.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct OrientedBoundingBox {
    pub center: PixelPoint,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

impl OrientedBoundingBox {
    pub fn new(center: PixelPoint, width: f64, height: f64, angle: f64) -> Self {
        let mut angle = angle.rem_euclid(180.0);
        let (mut width, mut height) = (width, height);
        if angle >= 135.0 {
            angle -= 180.0;
        } else if angle >= 45.0 {
            angle -= 90.0;
            core::mem::swap(&mut width, &mut height);
        }
        Self {
            center,
            width,
            height,
            angle,
        }
    }

    /// Corners `b0 b1 b2 b3` such that `b0 b1` spans `width` and `b1 b2`
    /// spans `height`.
    pub fn corners(&self) -> [PixelPoint; 4] {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        let u = Vector2::new(cos, sin) * (0.5 * self.width);
        let v = Vector2::new(-sin, cos) * (0.5 * self.height);
        let c = self.center.0;
        [
            PixelPoint(c - u - v),
            PixelPoint(c + u - v),
            PixelPoint(c + u + v),
            PixelPoint(c - u + v),
        ]
    }

    /// Pixel lengths of the edges `b0 b1` and `b1 b2`.
    pub fn edge_lengths(&self) -> (f64, f64) {
        let corners = self.corners();
        (
            pixel_distance(corners[0], corners[1]),
            pixel_distance(corners[1], corners[2]),
        )
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn corners_follow_axis_convention() {
        let rect = OrientedBoundingBox::new(PixelPoint::new(50.0, 40.0), 20.0, 10.0, 0.0);
        let [b0, b1, b2, b3] = rect.corners();
        assert_relative_eq!(b0.0, PixelPoint::new(40.0, 35.0).0);
        assert_relative_eq!(b1.0, PixelPoint::new(60.0, 35.0).0);
        assert_relative_eq!(b2.0, PixelPoint::new(60.0, 45.0).0);
        assert_relative_eq!(b3.0, PixelPoint::new(40.0, 45.0).0);
    }

    #[test]
    fn rotated_edges_keep_lengths() {
        let rect = OrientedBoundingBox::new(PixelPoint::new(0.0, 0.0), 30.0, 12.0, 30.0);
        let (first, second) = rect.edge_lengths();
        assert_relative_eq!(first, 30.0, epsilon = 1e-9);
        assert_relative_eq!(second, 12.0, epsilon = 1e-9);
        assert_relative_eq!(rect.area(), 360.0);
    }

    #[test]
    fn angle_is_canonical() {
        let rect = OrientedBoundingBox::new(PixelPoint::new(0.0, 0.0), 30.0, 12.0, 90.0);
        assert_relative_eq!(rect.angle, 0.0);
        assert_relative_eq!(rect.width, 12.0);
        assert_relative_eq!(rect.height, 30.0);

        let rect = OrientedBoundingBox::new(PixelPoint::new(0.0, 0.0), 30.0, 12.0, -60.0);
        assert_relative_eq!(rect.angle, 30.0);
        assert_relative_eq!(rect.width, 12.0);

        let rect = OrientedBoundingBox::new(PixelPoint::new(0.0, 0.0), 30.0, 12.0, 170.0);
        assert_relative_eq!(rect.angle, -10.0, epsilon = 1e-9);
        assert_relative_eq!(rect.width, 30.0);
    }
}
