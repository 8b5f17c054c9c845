use crate::{CornerError, Result};
use corner_core::{midpoint, Measurement, OrientedBoundingBox, PhysicalSize, PixelPoint};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_cross_mut, draw_line_segment_mut, draw_text_mut};
use log::*;
use rusttype::{Font, Scale};
use std::path::Path;

const MARKER_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
const OBJECT_COLOR: Rgba<u8> = Rgba([255, 0, 255, 255]);
const RULER_COLOR: Rgba<u8> = Rgba([0, 255, 255, 255]);
const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 0, 255]);

/// Loads a TrueType font for the overlay labels.
pub fn load_font(path: impl AsRef<Path>) -> Result<Font<'static>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    Font::try_from_vec(bytes).ok_or_else(|| CornerError::Font(path.to_owned()))
}

/// Draws detections and measurements on frames.
///
/// Text needs a font. Without one, only the lines are drawn and the labels
/// go to the log instead.
pub struct Annotator {
    font: Option<Font<'static>>,
    scale: Scale,
}

impl Annotator {
    pub fn new(font: Option<Font<'static>>, label_scale: f32) -> Self {
        Self {
            font,
            scale: Scale::uniform(label_scale),
        }
    }

    /// Outline of the detected marker with its physical size on its edges.
    pub fn draw_marker(
        &self,
        canvas: &mut RgbaImage,
        corners: &[PixelPoint; 4],
        physical: &PhysicalSize,
    ) {
        draw_closed_polyline(canvas, corners, MARKER_COLOR);
        self.label(
            canvas,
            midpoint(corners[0], corners[1]),
            &format_cm(physical.width()),
        );
        self.label(
            canvas,
            midpoint(corners[1], corners[2]),
            &format_cm(physical.height()),
        );
    }

    /// Outline of the object box with the measured length of each edge.
    pub fn draw_measurement(
        &self,
        canvas: &mut RgbaImage,
        bounding_box: &OrientedBoundingBox,
        measurement: Option<&Measurement>,
    ) {
        let corners = bounding_box.corners();
        draw_closed_polyline(canvas, &corners, OBJECT_COLOR);
        let (x, y) = to_canvas(bounding_box.center);
        draw_cross_mut(canvas, OBJECT_COLOR, x as i32, y as i32);
        if let Some(measurement) = measurement {
            self.label(
                canvas,
                midpoint(corners[0], corners[1]),
                &format_cm(measurement.width),
            );
            self.label(
                canvas,
                midpoint(corners[1], corners[2]),
                &format_cm(measurement.height),
            );
        }
    }

    /// Point-to-point ruler with its length, when one could be measured.
    pub fn draw_ruler(
        &self,
        canvas: &mut RgbaImage,
        a: PixelPoint,
        b: PixelPoint,
        length: Option<f64>,
    ) {
        draw_line_segment_mut(canvas, to_canvas(a), to_canvas(b), RULER_COLOR);
        if let Some(length) = length {
            self.label(canvas, midpoint(a, b), &format_cm(length));
        }
    }

    fn label(&self, canvas: &mut RgbaImage, at: PixelPoint, text: &str) {
        match &self.font {
            Some(font) => {
                let (x, y) = label_origin(canvas, at);
                draw_text_mut(canvas, TEXT_COLOR, x, y, self.scale, font, text);
            }
            None => debug!("Label {} at ({:.0}, {:.0})", text, at.x, at.y),
        }
    }
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(None, 20.0)
    }
}

fn format_cm(length: f64) -> String {
    format!("{:.2} cm", length)
}

/// Top left corner of a label, kept inside the canvas.
fn label_origin(canvas: &RgbaImage, at: PixelPoint) -> (i32, i32) {
    let x = (at.x.round() as i32).clamp(0, canvas.width().saturating_sub(1) as i32);
    let y = (at.y.round() as i32).clamp(0, canvas.height().saturating_sub(1) as i32);
    (x, y)
}

fn to_canvas(point: PixelPoint) -> (f32, f32) {
    (point.x as f32, point.y as f32)
}

fn draw_closed_polyline(canvas: &mut RgbaImage, points: &[PixelPoint], color: Rgba<u8>) {
    for (&a, &b) in points.iter().zip(points.iter().cycle().skip(1)) {
        draw_line_segment_mut(canvas, to_canvas(a), to_canvas(b), color);
    }
}
