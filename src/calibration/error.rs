use thiserror::Error;

use crate::pitch::{LandmarkClass, LandmarkLine};

/// Landmark data that contradicts the one-instance-per-class invariant.
///
/// This is an upstream data bug, not a missing calibration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LandmarkError {
    #[error("frame {frame}: {count} landmarks detected on line {line}, at most 2 expected")]
    OvercrowdedLine {
        frame: u32,
        line: LandmarkLine,
        count: usize,
    },
    #[error("frame {frame}: landmark {class:?} detected more than once")]
    DuplicateClass { frame: u32, class: LandmarkClass },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HomographyError {
    #[error("point correspondences are degenerate (collinear or repeated points)")]
    Degenerate,
    #[error("homography solution is not finite")]
    NonFinite,
}
