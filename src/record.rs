//! Detection records produced by the upstream detector/tracker.

mod builder;

pub use builder::DetectionRecordBuilder;

use serde::{Deserialize, Serialize};

/// One detected object in one frame.
///
/// Box center and size are normalized to `[0, 1]` of the image dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Frame index, starting at 0
    pub frame: u32,
    /// Detector class id
    pub class_id: u32,
    /// Box center x
    pub x: f64,
    /// Box center y
    pub y: f64,
    /// Box width
    pub w: f64,
    /// Box height
    pub h: f64,
    /// Detection confidence in `[0, 1]`
    pub confidence: f64,
    /// Tracker identity, if the tracker assigned one
    pub track_id: Option<u32>,
    /// Human readable class name
    pub class_name: String,
}

impl DetectionRecord {
    /// Normalized box center.
    #[inline]
    pub fn center(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}
