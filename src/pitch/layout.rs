use serde::{Deserialize, Serialize};

use super::landmark::{LandmarkClass, LandmarkLine};

/// Real-world geometry of the pitch and the reliability order of its lines.
///
/// Built once and handed to the extractor and the calibrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchLayout {
    /// Pitch coordinate of each landmark, indexed by [`LandmarkClass::index`]
    pub landmark_coords: [[f64; 2]; 8],
    /// Preference rank of each line, indexed by [`LandmarkLine::index`]; lower is preferred
    pub line_preference: [u8; 4],
}

impl PitchLayout {
    /// Ultimate pitch: 37 wide, 100 long, 18 deep end zones.
    ///
    /// Lines nearer the camera are detected more reliably and rank first.
    pub fn ultimate() -> Self {
        Self {
            landmark_coords: [
                [0.0, 0.0],
                [37.0, 0.0],
                [0.0, 18.0],
                [37.0, 18.0],
                [0.0, 82.0],
                [37.0, 82.0],
                [0.0, 100.0],
                [37.0, 100.0],
            ],
            line_preference: [3, 2, 1, 0],
        }
    }

    #[inline]
    pub fn real_coords(&self, class: LandmarkClass) -> [f64; 2] {
        self.landmark_coords[class.index()]
    }

    #[inline]
    pub fn preference(&self, line: LandmarkLine) -> u8 {
        self.line_preference[line.index()]
    }
}

impl Default for PitchLayout {
    fn default() -> Self {
        Self::ultimate()
    }
}
