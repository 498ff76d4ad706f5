//! Builder for creating `DetectionRecord` values.

use super::DetectionRecord;

/// Builder for creating `DetectionRecord` objects.
#[derive(Debug, Clone, Default)]
pub struct DetectionRecordBuilder {
    frame: u32,
    class_id: u32,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    confidence: f64,
    track_id: Option<u32>,
    class_name: String,
}

impl DetectionRecordBuilder {
    /// Create a new record builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame index.
    pub fn frame(mut self, frame: u32) -> Self {
        self.frame = frame;
        self
    }

    /// Set the class id and name.
    pub fn class(mut self, class_id: u32, class_name: impl Into<String>) -> Self {
        self.class_id = class_id;
        self.class_name = class_name.into();
        self
    }

    /// Set the box in XYWH format (center_x, center_y, width, height), normalized.
    pub fn xywh(mut self, cx: f64, cy: f64, w: f64, h: f64) -> Self {
        self.x = cx;
        self.y = cy;
        self.w = w;
        self.h = h;
        self
    }

    /// Set the box center only, leaving the size untouched.
    pub fn center(mut self, cx: f64, cy: f64) -> Self {
        self.x = cx;
        self.y = cy;
        self
    }

    /// Set the box in TLBR format (x1, y1, x2, y2), normalized.
    pub fn tlbr(mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        self.w = x2 - x1;
        self.h = y2 - y1;
        self.x = x1 + self.w / 2.0;
        self.y = y1 + self.h / 2.0;
        self
    }

    /// Set the confidence score.
    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set the tracker identity.
    pub fn track_id(mut self, track_id: u32) -> Self {
        self.track_id = Some(track_id);
        self
    }

    /// Build the final `DetectionRecord`.
    pub fn build(self) -> DetectionRecord {
        DetectionRecord {
            frame: self.frame,
            class_id: self.class_id,
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
            confidence: self.confidence,
            track_id: self.track_id,
            class_name: self.class_name,
        }
    }
}
