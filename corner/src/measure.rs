use corner_core::{
    pixel_distance, Calibration, Measurement, OrientedBoundingBox, PhysicalSize, PixelPoint,
};

/// Converts an object box to centimeters.
///
/// The box edge `b0 b1` is scaled by `physical.width / calibration.x` and the
/// edge `b1 b2` by `physical.height / calibration.y`. A [`Calibration`] only
/// exists once the marker has been detected and its lengths are always
/// positive, so the divisions are safe.
pub fn measure(
    bounding_box: &OrientedBoundingBox,
    calibration: &Calibration,
    physical: &PhysicalSize,
) -> Measurement {
    let (first, second) = bounding_box.edge_lengths();
    Measurement {
        width: first * physical.width() / calibration.x(),
        height: second * physical.height() / calibration.y(),
    }
}

/// Physical distance between two arbitrary points, using one calibration
/// axis and the matching physical marker dimension.
///
/// Returns `None` if `calibration_px` is not a positive length.
pub fn measure_points(
    a: PixelPoint,
    b: PixelPoint,
    calibration_px: f64,
    physical_cm: f64,
) -> Option<f64> {
    (calibration_px.is_finite() && calibration_px > 0.0)
        .then(|| pixel_distance(a, b) * physical_cm / calibration_px)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_scaling_law() {
        let physical = PhysicalSize::new(5.0, 5.0).unwrap();
        let calibration = Calibration::new(100.0, 100.0).unwrap();
        let square = OrientedBoundingBox::new(PixelPoint::new(300.0, 300.0), 200.0, 200.0, 0.0);
        let measurement = measure(&square, &calibration, &physical);
        assert_relative_eq!(measurement.width, 10.0);
        assert_relative_eq!(measurement.height, 10.0);
    }

    #[test]
    fn axes_are_paired_consistently() {
        // 3 cm wide and 4 cm tall marker, seen as 60 by 100 pixels.
        let physical = PhysicalSize::new(4.0, 3.0).unwrap();
        let calibration = Calibration::new(60.0, 100.0).unwrap();
        let rect = OrientedBoundingBox::new(PixelPoint::new(0.0, 0.0), 120.0, 50.0, 20.0);
        let measurement = measure(&rect, &calibration, &physical);
        assert_relative_eq!(measurement.width, 6.0, epsilon = 1e-9);
        assert_relative_eq!(measurement.height, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn ruler() {
        let a = PixelPoint::new(10.0, 10.0);
        let b = PixelPoint::new(40.0, 50.0);
        assert_relative_eq!(measure_points(a, b, 25.0, 2.5).unwrap(), 5.0);
    }

    #[test]
    fn ruler_without_calibration() {
        let a = PixelPoint::new(10.0, 10.0);
        let b = PixelPoint::new(40.0, 50.0);
        assert_eq!(measure_points(a, b, 0.0, 5.0), None);
        assert_eq!(measure_points(a, b, -3.0, 5.0), None);
    }
}
