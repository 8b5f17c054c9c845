use crate::CornerSettings;
use corner_core::{nalgebra::Vector2, polygon_area, OrientedBoundingBox, PixelPoint};
use float_ord::FloatOrd;
use image::{DynamicImage, GrayImage};
use imageproc::{
    contours::find_contours,
    distance_transform::Norm,
    edges::canny,
    filter::gaussian_blur_f32,
    geometry::convex_hull,
    morphology::{dilate, erode},
    point::Point,
};
use log::*;

/// Finds the dominant object in a frame and its oriented bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectSegmenter {
    /// Standard deviation of the blur applied before edge detection.
    pub blur_sigma: f32,
    /// Low Canny threshold. The high threshold is three times this.
    pub canny_threshold: f32,
}

impl ObjectSegmenter {
    pub fn new(settings: &CornerSettings) -> Self {
        Self {
            blur_sigma: settings.blur_sigma,
            canny_threshold: settings.canny_threshold,
        }
    }

    /// Closed edge map of the frame: blur, Canny, then one dilation followed
    /// by one erosion to bridge small gaps in the edges.
    pub fn edges(&self, frame: &DynamicImage) -> GrayImage {
        let blurred = gaussian_blur_f32(&frame.to_luma8(), self.blur_sigma);
        let edges = canny(&blurred, self.canny_threshold, 3.0 * self.canny_threshold);
        erode(&dilate(&edges, Norm::LInf, 1), Norm::LInf, 1)
    }

    /// Oriented bounding box of the largest external contour, or `None` if
    /// the frame has no contour enclosing any area.
    pub fn segment(&self, frame: &DynamicImage) -> Option<OrientedBoundingBox> {
        if frame.width() == 0 || frame.height() == 0 {
            return None;
        }
        let contour = largest_external_contour(&self.edges(frame))?;
        let bounding_box = min_area_rect(&contour)?;
        trace!(
            "Object box {:.1}x{:.1} px at ({:.1}, {:.1}), {:.1} degrees",
            bounding_box.width,
            bounding_box.height,
            bounding_box.center.x,
            bounding_box.center.y,
            bounding_box.angle
        );
        Some(bounding_box)
    }
}

impl Default for ObjectSegmenter {
    fn default() -> Self {
        Self::new(&CornerSettings::default())
    }
}

/// Top-level contour enclosing the largest area. Contours nested inside
/// another contour are ignored.
///
/// An edge curve cut open by the frame border has no inside, so it can come
/// back as a top-level hole border; it still counts.
pub fn largest_external_contour(edges: &GrayImage) -> Option<Vec<Point<i32>>> {
    let contours = find_contours::<i32>(edges);
    debug!("Found {} contours", contours.len());
    contours
        .into_iter()
        .filter(|contour| contour.parent.is_none())
        .map(|contour| {
            let area = polygon_area(&to_pixel_points(&contour.points));
            (contour.points, area)
        })
        .max_by_key(|&(_, area)| FloatOrd(area))
        .map(|(points, _)| points)
}

fn to_pixel_points(points: &[Point<i32>]) -> Vec<PixelPoint> {
    points
        .iter()
        .map(|p| PixelPoint::new(p.x as f64, p.y as f64))
        .collect()
}

/// Minimum-area rectangle enclosing the points, found by rotating calipers
/// over the convex hull: the optimal rectangle has a side collinear with a
/// hull edge.
pub fn min_area_rect(points: &[Point<i32>]) -> Option<OrientedBoundingBox> {
    let hull: Vec<Vector2<f64>> = convex_hull(points)
        .iter()
        .map(|p| Vector2::new(p.x as f64, p.y as f64))
        .collect();
    if hull.len() < 3 {
        return None;
    }

    let mut best: Option<(f64, OrientedBoundingBox)> = None;
    for (i, &start) in hull.iter().enumerate() {
        let edge = hull[(i + 1) % hull.len()] - start;
        let length = edge.norm();
        if length == 0.0 {
            continue;
        }
        let u = edge / length;
        let v = Vector2::new(-u.y, u.x);
        let (mut u_min, mut u_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut v_min, mut v_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &hull {
            let (pu, pv) = (p.dot(&u), p.dot(&v));
            u_min = u_min.min(pu);
            u_max = u_max.max(pu);
            v_min = v_min.min(pv);
            v_max = v_max.max(pv);
        }
        let area = (u_max - u_min) * (v_max - v_min);
        if best.map_or(true, |(best_area, _)| area < best_area) {
            let center = u * (0.5 * (u_min + u_max)) + v * (0.5 * (v_min + v_max));
            let angle = u.y.atan2(u.x).to_degrees();
            let rect = OrientedBoundingBox::new(
                PixelPoint::new(center.x, center.y),
                u_max - u_min,
                v_max - v_min,
                angle,
            );
            best = Some((area, rect));
        }
    }
    best.map(|(_, rect)| rect).filter(|rect| rect.area() > 0.0)
}
