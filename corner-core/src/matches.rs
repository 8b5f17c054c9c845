use crate::PixelPoint;

/// A correspondence between a point on the marker image and a point on the
/// frame.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PointMatch(pub PixelPoint, pub PixelPoint);

/// A descriptor match between feature `marker` of the marker image and
/// feature `frame` of the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureMatch {
    pub marker: usize,
    pub frame: usize,
    /// Descriptor distance of the match.
    pub distance: u32,
}
