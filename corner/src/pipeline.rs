use crate::{
    measure, measure_points, Annotator, CornerSettings, Detection, FixedInterval, FrameSink,
    FrameSource, Marker, MarkerLocator, MaximumDimensions, ObjectSegmenter, RecalibrationPolicy,
    Result,
};
use corner_core::{Calibration, Measurement, OrientedBoundingBox, PixelPoint};
use image::{DynamicImage, RgbaImage};
use log::*;
use std::time::Instant;

/// Everything computed for a single frame.
#[derive(Debug, Clone)]
pub struct FrameReport {
    /// The normalized frame with the overlay drawn on it.
    pub image: RgbaImage,
    /// Set only on frames where the locator ran and found the marker.
    pub detection: Option<Detection>,
    /// The calibration the frame was measured with.
    pub calibration: Option<Calibration>,
    pub bounding_box: Option<OrientedBoundingBox>,
    pub measurement: Option<Measurement>,
    /// Ruler length in centimeters.
    pub ruler: Option<f64>,
}

/// Runs the marker locator, the object segmenter and the measurement engine
/// over a stream of frames.
///
/// The calibration from the last successful detection is kept and reused
/// for the frames in between, and also when a later detection fails.
pub struct Pipeline<P = FixedInterval> {
    marker: Marker,
    bounds: MaximumDimensions,
    locator: MarkerLocator,
    segmenter: ObjectSegmenter,
    annotator: Annotator,
    policy: P,
    calibration: Option<Calibration>,
    frame: u64,
}

impl Pipeline {
    /// A pipeline recalibrating at the interval given in the settings.
    pub fn with_settings(marker: Marker, settings: &CornerSettings, annotator: Annotator) -> Self {
        let policy = FixedInterval::new(settings.recalibration_interval());
        Self::new(marker, settings, annotator, policy)
    }
}

impl<P> Pipeline<P>
where
    P: RecalibrationPolicy,
{
    /// The marker must have been built with the same AKAZE threshold as
    /// `settings`, otherwise its descriptors will not match the frame's.
    pub fn new(marker: Marker, settings: &CornerSettings, annotator: Annotator, policy: P) -> Self {
        Self {
            marker,
            bounds: settings.maximum_dimensions(),
            locator: MarkerLocator::new(settings),
            segmenter: ObjectSegmenter::new(settings),
            annotator,
            policy,
            calibration: None,
            frame: 0,
        }
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// The calibration from the most recent successful detection.
    pub fn calibration(&self) -> Option<Calibration> {
        self.calibration
    }

    pub fn frames_processed(&self) -> u64 {
        self.frame
    }

    /// Runs one frame through the pipeline.
    ///
    /// An empty frame carries nothing to detect or measure; it is reported
    /// with no detection and no object, and the calibration is kept.
    pub fn process_frame(
        &mut self,
        frame: &DynamicImage,
        now: Instant,
        ruler: Option<(PixelPoint, PixelPoint)>,
    ) -> FrameReport {
        let frame_number = self.frame;
        self.frame += 1;

        if is_empty(frame) {
            debug!("frame {}: empty", frame_number);
            return FrameReport {
                image: RgbaImage::new(frame.width(), frame.height()),
                detection: None,
                calibration: self.calibration,
                bounding_box: None,
                measurement: None,
                ruler: None,
            };
        }

        let frame = self.bounds.resize_to_fit(frame);

        let detection = if self.policy.is_due(frame_number, now) {
            let detection = self.locator.locate(&self.marker, &frame);
            self.policy.record(detection.is_some(), now);
            match &detection {
                Some(detection) => {
                    debug!(
                        "frame {}: marker found, calibration {:?}",
                        frame_number, detection.calibration
                    );
                    self.calibration = Some(detection.calibration);
                }
                None => debug!("frame {}: marker not found", frame_number),
            }
            detection
        } else {
            None
        };

        let physical = self.marker.physical_size();
        let bounding_box = self.segmenter.segment(&frame);
        let measurement = match (&bounding_box, &self.calibration) {
            (Some(bounding_box), Some(calibration)) => {
                Some(measure(bounding_box, calibration, &physical))
            }
            _ => None,
        };
        let ruler_length = match (ruler, &self.calibration) {
            (Some((a, b)), Some(calibration)) => {
                measure_points(a, b, calibration.x(), physical.width())
            }
            _ => None,
        };
        if let Some(measurement) = &measurement {
            trace!(
                "frame {}: object {:.2} x {:.2} cm",
                frame_number,
                measurement.width,
                measurement.height
            );
        }

        let mut image = frame.to_rgba8();
        if let Some(detection) = &detection {
            self.annotator.draw_marker(&mut image, &detection.corners, &physical);
        }
        if let Some(bounding_box) = &bounding_box {
            self.annotator
                .draw_measurement(&mut image, bounding_box, measurement.as_ref());
        }
        if let Some((a, b)) = ruler {
            self.annotator.draw_ruler(&mut image, a, b, ruler_length);
        }

        FrameReport {
            image,
            detection,
            calibration: self.calibration,
            bounding_box,
            measurement,
            ruler: ruler_length,
        }
    }

    /// Processes frames until the source is exhausted and returns how many
    /// frames were shown.
    ///
    /// An empty frame also ends the stream.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        sink: &mut dyn FrameSink,
        ruler: Option<(PixelPoint, PixelPoint)>,
    ) -> Result<u64> {
        let mut shown = 0;
        while let Some(frame) = source.next_frame()? {
            if is_empty(&frame) {
                debug!("Empty frame, end of stream");
                break;
            }
            let report = self.process_frame(&frame, Instant::now(), ruler);
            sink.show(&report.image)?;
            shown += 1;
        }
        info!("Processed {} frames", shown);
        Ok(shown)
    }
}

fn is_empty(frame: &DynamicImage) -> bool {
    frame.width() == 0 || frame.height() == 0
}
