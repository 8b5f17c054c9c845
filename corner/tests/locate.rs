mod scene;

use approx::assert_abs_diff_eq;
use corner::{pixel_distance, physical_size, CornerSettings, Detection, Marker, MarkerLocator};
use image::imageops;
use imageproc::geometric_transformations::Projection;
use scene::*;

const MARKER_WIDTH: u32 = 200;
const MARKER_HEIGHT: u32 = 150;

fn marker_image() -> image::GrayImage {
    block_marker(MARKER_WIDTH, MARKER_HEIGHT, 10, 7)
}

fn locator_and_marker() -> (MarkerLocator, Marker) {
    let _ = pretty_env_logger::try_init_timed();
    let settings = CornerSettings::default();
    let locator = MarkerLocator::new(&settings);
    let marker = Marker::new(
        dynamic(marker_image()),
        physical_size(3.75, 5.0).unwrap(),
        locator.akaze(),
    );
    (locator, marker)
}

/// The projected quadrilateral closes on itself and its first two edges are
/// exactly the calibration lengths.
fn assert_calibration_from_corners(detection: &Detection) {
    let [c0, c1, c2, _] = detection.corners;
    assert!(detection.calibration.x() > 0.0);
    assert!(detection.calibration.y() > 0.0);
    assert_abs_diff_eq!(pixel_distance(c0, c1), detection.calibration.x(), epsilon = 1e-9);
    assert_abs_diff_eq!(pixel_distance(c1, c2), detection.calibration.y(), epsilon = 1e-9);
}

fn assert_corners_near(detection: &Detection, expected: [(f32, f32); 4], epsilon: f64) {
    for (corner, &(x, y)) in detection.corners.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(corner.x, x as f64, epsilon = epsilon);
        assert_abs_diff_eq!(corner.y, y as f64, epsilon = epsilon);
    }
    let length = |a: (f32, f32), b: (f32, f32)| ((a.0 - b.0) as f64).hypot((a.1 - b.1) as f64);
    let x = length(expected[0], expected[1]);
    let y = length(expected[1], expected[2]);
    assert_abs_diff_eq!(detection.calibration.x(), x, epsilon = epsilon);
    assert_abs_diff_eq!(detection.calibration.y(), y, epsilon = epsilon);
}

fn locate_warped(projection: Projection) -> (Detection, [(f32, f32); 4]) {
    let (mut locator, marker) = locator_and_marker();
    let frame = warped_scene(640, 480, &marker_image(), &projection);
    let detection = locator
        .locate(&marker, &dynamic(frame))
        .expect("marker should be found");
    (detection, projected_corners(&projection, MARKER_WIDTH, MARKER_HEIGHT))
}

#[test]
fn locates_translated_marker() {
    let (mut locator, marker) = locator_and_marker();
    let frame = scene(640, 480, &marker_image(), 180, 140);

    let detection = locator
        .locate(&marker, &dynamic(frame))
        .expect("marker should be found");
    assert!(detection.inliers >= 4);
    assert!(detection.good_matches >= detection.inliers);
    assert_calibration_from_corners(&detection);
    assert_corners_near(
        &detection,
        [(180.0, 140.0), (380.0, 140.0), (380.0, 290.0), (180.0, 290.0)],
        2.0,
    );
}

#[test]
fn calibration_follows_marker_edges_when_rotated() {
    let (mut locator, marker) = locator_and_marker();
    let frame = scene(640, 480, &marker_image(), 180, 140);
    let frame = imageops::rotate90(&frame);

    let detection = locator
        .locate(&marker, &dynamic(frame))
        .expect("marker should be found");
    // The marker appears 150 px wide and 200 px tall, but x still pairs
    // with the marker's own width.
    assert_calibration_from_corners(&detection);
    assert_abs_diff_eq!(detection.calibration.x(), 200.0, epsilon = 2.0);
    assert_abs_diff_eq!(detection.calibration.y(), 150.0, epsilon = 2.0);
}

#[test]
fn locates_marker_rotated_by_arbitrary_angle() {
    let projection =
        Projection::rotate(25f32.to_radians()).and_then(Projection::translate(260.0, 90.0));
    let (detection, expected) = locate_warped(projection);
    assert_calibration_from_corners(&detection);
    assert_corners_near(&detection, expected, 3.0);
}

#[test]
fn locates_scaled_marker() {
    let projection = Projection::scale(0.7, 0.7).and_then(Projection::translate(200.0, 150.0));
    let (detection, expected) = locate_warped(projection);
    assert_calibration_from_corners(&detection);
    assert_corners_near(&detection, expected, 3.0);
    assert_abs_diff_eq!(detection.calibration.x(), 140.0, epsilon = 3.0);
    assert_abs_diff_eq!(detection.calibration.y(), 105.0, epsilon = 3.0);
}

#[test]
fn locates_marker_under_perspective() {
    let (w, h) = (MARKER_WIDTH as f32, MARKER_HEIGHT as f32);
    let projection = Projection::from_control_points(
        [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)],
        [(150.0, 110.0), (380.0, 130.0), (370.0, 320.0), (140.0, 290.0)],
    )
    .expect("control points are in general position");
    let (detection, expected) = locate_warped(projection);
    assert_calibration_from_corners(&detection);
    assert_corners_near(&detection, expected, 3.0);
}

#[test]
fn absent_marker_is_not_located() {
    let (mut locator, marker) = locator_and_marker();
    let mut frame = image::GrayImage::from_pixel(640, 480, image::Luma([255]));
    add_object(&mut frame, 200, 150, 240, 160);

    assert!(locator.locate(&marker, &dynamic(frame)).is_none());
}
