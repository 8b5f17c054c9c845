//! When to run the marker locator.
//!
//! Feature extraction and robust homography estimation are too slow to run
//! on every frame, so a [`RecalibrationPolicy`] decides which frames get a
//! detection. The other frames are measured against the last calibration.

use std::time::{Duration, Instant};

pub trait RecalibrationPolicy {
    /// Whether the marker locator should run on frame number `frame`
    /// (counting from zero), processed at `now`.
    fn is_due(&mut self, frame: u64, now: Instant) -> bool;

    /// Called after the locator ran, with whether it found the marker.
    fn record(&mut self, _detected: bool, _now: Instant) {}
}

/// Detects the marker in every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct EveryFrame;

impl RecalibrationPolicy for EveryFrame {
    fn is_due(&mut self, _frame: u64, _now: Instant) -> bool {
        true
    }
}

/// Detects the marker in one frame out of `n`, starting with the first.
#[derive(Debug, Clone, Copy)]
pub struct EveryNFrames(pub u64);

impl RecalibrationPolicy for EveryNFrames {
    fn is_due(&mut self, frame: u64, _now: Instant) -> bool {
        frame % self.0.max(1) == 0
    }
}

/// Detects the marker at most once per `period` of wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct FixedInterval {
    period: Duration,
    last: Option<Instant>,
}

impl FixedInterval {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }
}

impl RecalibrationPolicy for FixedInterval {
    fn is_due(&mut self, _frame: u64, now: Instant) -> bool {
        let due = self
            .last
            .map_or(true, |last| now.saturating_duration_since(last) >= self.period);
        if due {
            self.last = Some(now);
        }
        due
    }
}

/// Detects the marker every `min` until it is found, then backs off,
/// doubling the period after every success up to `max`. A failed detection
/// drops the period back to `min`.
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveInterval {
    min: Duration,
    max: Duration,
    period: Duration,
    last: Option<Instant>,
}

impl AdaptiveInterval {
    pub fn new(min: Duration, max: Duration) -> Self {
        let max = max.max(min);
        Self {
            min,
            max,
            period: min,
            last: None,
        }
    }

    /// Current time between detections.
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl RecalibrationPolicy for AdaptiveInterval {
    fn is_due(&mut self, _frame: u64, now: Instant) -> bool {
        let due = self
            .last
            .map_or(true, |last| now.saturating_duration_since(last) >= self.period);
        if due {
            self.last = Some(now);
        }
        due
    }

    fn record(&mut self, detected: bool, _now: Instant) {
        self.period = if detected {
            (self.period * 2).min(self.max)
        } else {
            self.min
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn due_frames(policy: &mut impl RecalibrationPolicy, times_ms: &[u64]) -> Vec<u64> {
        let start = Instant::now();
        times_ms
            .iter()
            .enumerate()
            .filter(|&(frame, &ms)| policy.is_due(frame as u64, start + Duration::from_millis(ms)))
            .map(|(frame, _)| frame as u64)
            .collect()
    }

    #[test]
    fn every_frame() {
        assert_eq!(due_frames(&mut EveryFrame, &[0, 1, 2]), vec![0, 1, 2]);
    }

    #[test]
    fn every_third_frame() {
        let times = [0; 7];
        assert_eq!(due_frames(&mut EveryNFrames(3), &times), vec![0, 3, 6]);
        assert_eq!(due_frames(&mut EveryNFrames(0), &times[..2]), vec![0, 1]);
    }

    #[test]
    fn once_per_second() {
        let mut policy = FixedInterval::new(Duration::from_secs(1));
        let times = [0, 400, 999, 1000, 1500, 2100, 2200];
        assert_eq!(due_frames(&mut policy, &times), vec![0, 3, 5]);
    }

    #[test]
    fn adaptive_backs_off_on_success() {
        let start = Instant::now();
        let at = |ms| start + Duration::from_millis(ms);
        let mut policy =
            AdaptiveInterval::new(Duration::from_millis(100), Duration::from_millis(400));
        assert!(policy.is_due(0, at(0)));
        policy.record(false, at(0));
        assert!(policy.is_due(1, at(100)));
        policy.record(true, at(100));
        assert_eq!(policy.period(), Duration::from_millis(200));
        assert!(!policy.is_due(2, at(250)));
        assert!(policy.is_due(3, at(300)));
        policy.record(true, at(300));
        policy.record(true, at(300));
        assert_eq!(policy.period(), Duration::from_millis(400));
        policy.record(false, at(300));
        assert_eq!(policy.period(), Duration::from_millis(100));
    }
}
