use crate::{ratio_matching, CornerSettings, Descriptor, Marker};
use akaze::{Akaze, KeyPoint};
use arrsac::Arrsac;
use corner_core::{sample_consensus::Consensus, Calibration, Homography, PixelPoint, PointMatch};
use four_point::FourPoint;
use image::DynamicImage;
use log::*;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64;

/// A successful marker detection in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Maps marker image coordinates to frame coordinates.
    pub homography: Homography,
    /// The marker corners `(0, 0)`, `(w, 0)`, `(w, h)`, `(0, h)` projected into the frame.
    pub corners: [PixelPoint; 4],
    pub calibration: Calibration,
    /// Matches that survived the ratio test.
    pub good_matches: usize,
    /// Matches consistent with the homography.
    pub inliers: usize,
}

/// Finds the marker in frames by feature matching and a robust homography.
pub struct MarkerLocator<R = Pcg64> {
    akaze: Akaze,
    lowes_ratio: f32,
    minimum_good_matches: usize,
    consensus: Arrsac<R>,
    estimator: FourPoint,
}

impl MarkerLocator {
    pub fn new(settings: &CornerSettings) -> Self {
        Self::with_rng(settings, Pcg64::from_seed([5; 32]))
    }
}

impl<R> MarkerLocator<R>
where
    R: RngCore,
{
    pub fn with_rng(settings: &CornerSettings, rng: R) -> Self {
        Self {
            akaze: Akaze::new(settings.akaze_threshold),
            lowes_ratio: settings.lowes_ratio,
            minimum_good_matches: settings.minimum_good_matches,
            consensus: Arrsac::new(settings.consensus_threshold, rng),
            estimator: FourPoint::new(),
        }
    }

    /// The feature extractor, which must also be used to build the [`Marker`].
    pub fn akaze(&self) -> &Akaze {
        &self.akaze
    }

    /// Locates the marker in the frame.
    ///
    /// Returns `None` when there are too few good matches or the homography
    /// is degenerate. That is never an error: the caller keeps its previous
    /// calibration.
    pub fn locate(&mut self, marker: &Marker, frame: &DynamicImage) -> Option<Detection> {
        let (keypoints, descriptors) = self.akaze.extract(frame);
        self.locate_features(marker, &keypoints, &descriptors)
    }

    /// Same as [`MarkerLocator::locate`] with the frame features already extracted.
    pub fn locate_features(
        &mut self,
        marker: &Marker,
        keypoints: &[KeyPoint],
        descriptors: &[Descriptor],
    ) -> Option<Detection> {
        let good = ratio_matching(marker.descriptors(), descriptors, self.lowes_ratio);
        debug!(
            "{} of {} marker features passed the ratio test against {} frame features",
            good.len(),
            marker.descriptors().len(),
            descriptors.len()
        );
        if good.len() < self.minimum_good_matches {
            debug!(
                "Not enough good matches ({} < {}), marker not found",
                good.len(),
                self.minimum_good_matches
            );
            return None;
        }

        let matches: Vec<PointMatch> = good
            .iter()
            .map(|m| {
                PointMatch(
                    marker.keypoints()[m.marker].point.into(),
                    keypoints[m.frame].point.into(),
                )
            })
            .collect();

        let (model, inliers) = self
            .consensus
            .model_inliers(&self.estimator, matches.iter().copied())?;
        if inliers.len() < 4 {
            debug!("Only {} inliers, marker not found", inliers.len());
            return None;
        }
        // Least-squares refit on every inlier; the consensus model only saw four.
        let homography = self
            .estimator
            .from_matches(inliers.iter().map(|&ix| matches[ix]))
            .unwrap_or(model);

        let corners = match homography.project_corners(marker.width(), marker.height()) {
            Some(corners) => corners,
            None => {
                debug!("Degenerate homography, marker not found");
                return None;
            }
        };
        let calibration = Calibration::from_corners(&corners)?;
        trace!(
            "Marker found with {} inliers, calibration {:.2}x{:.2} px",
            inliers.len(),
            calibration.x(),
            calibration.y()
        );
        Some(Detection {
            homography,
            corners,
            calibration,
            good_matches: good.len(),
            inliers: inliers.len(),
        })
    }
}
