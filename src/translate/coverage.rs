use serde::{Deserialize, Serialize};

/// How many frames of a run could be calibrated, and why the others could not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationCoverage {
    pub total_frames: u32,
    /// Calibrated from the frame's own landmarks
    pub direct: u32,
    /// Calibrated from an earlier frame inside the look-back window
    pub look_back: u32,
    /// No usable landmarks inside the look-back window
    pub unavailable: u32,
    /// Landmark data violated the one-per-class invariant
    pub inconsistent: u32,
    /// Landmarks found but the homography could not be estimated
    pub degenerate: u32,
}

impl CalibrationCoverage {
    pub fn calibrated(&self) -> u32 {
        self.direct + self.look_back
    }

    pub fn uncalibrated(&self) -> u32 {
        self.total_frames - self.calibrated()
    }

    /// Share of frames without a transform, 0 for an empty run.
    pub fn uncalibrated_ratio(&self) -> f64 {
        if self.total_frames == 0 {
            return 0.0;
        }
        f64::from(self.uncalibrated()) / f64::from(self.total_frames)
    }
}
