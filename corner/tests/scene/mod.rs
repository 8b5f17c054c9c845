//! Synthetic frames shared by the integration tests.

#![allow(dead_code)]

use image::{DynamicImage, GrayImage, Luma};
use imageproc::{
    drawing::draw_filled_rect_mut,
    geometric_transformations::{warp, Interpolation, Projection},
    rect::Rect,
};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// A marker made of randomly shaded square blocks, which gives AKAZE plenty
/// of distinctive corners.
pub fn block_marker(width: u32, height: u32, block: u32, seed: u8) -> GrayImage {
    let mut rng = Pcg64::from_seed([seed; 32]);
    let columns = (width + block - 1) / block;
    let rows = (height + block - 1) / block;
    let shades: Vec<u8> = (0..columns * rows).map(|_| rng.gen()).collect();
    GrayImage::from_fn(width, height, |x, y| {
        Luma([shades[((y / block) * columns + x / block) as usize]])
    })
}

/// A white frame with `marker` pasted at `(x, y)`.
pub fn scene(width: u32, height: u32, marker: &GrayImage, x: u32, y: u32) -> GrayImage {
    let mut frame = GrayImage::from_pixel(width, height, Luma([255]));
    for (mx, my, pixel) in marker.enumerate_pixels() {
        frame.put_pixel(x + mx, y + my, *pixel);
    }
    frame
}

/// A white frame showing `marker` moved by `projection`, which maps marker
/// pixel coordinates to frame pixel coordinates.
pub fn warped_scene(
    width: u32,
    height: u32,
    marker: &GrayImage,
    projection: &Projection,
) -> GrayImage {
    let canvas = scene(width, height, marker, 0, 0);
    warp(&canvas, projection, Interpolation::Bilinear, Luma([255]))
}

/// Where `projection` sends the corners `(0, 0)`, `(w, 0)`, `(w, h)`, `(0, h)`
/// of a `width` by `height` marker.
pub fn projected_corners(projection: &Projection, width: u32, height: u32) -> [(f32, f32); 4] {
    let (w, h) = (width as f32, height as f32);
    [
        *projection * (0.0, 0.0),
        *projection * (w, 0.0),
        *projection * (w, h),
        *projection * (0.0, h),
    ]
}

/// Draws a solid dark rectangle standing in for the measured object.
pub fn add_object(frame: &mut GrayImage, x: i32, y: i32, width: u32, height: u32) {
    draw_filled_rect_mut(frame, Rect::at(x, y).of_size(width, height), Luma([20]));
}

pub fn dynamic(image: GrayImage) -> DynamicImage {
    DynamicImage::ImageLuma8(image)
}
