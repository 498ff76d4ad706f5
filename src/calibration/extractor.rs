//! Landmark extraction across a whole detection table, with look-back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calibration::error::LandmarkError;
use crate::calibration::quad::{KeypointQuad, Landmark, select_quad};
use crate::pitch::{LandmarkClass, LandmarkLine, PitchLayout};
use crate::record::DetectionRecord;

/// Configuration for the LandmarkExtractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Landmarks must score strictly above this confidence
    pub conf_threshold: f64,
    /// Number of frames examined per request, the requested frame included
    pub max_lookback: u32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            conf_threshold: 0.6,
            max_lookback: 15,
        }
    }
}

/// Selects four calibration landmarks per frame.
///
/// The detection table is filtered once at construction: only landmark
/// classes above the confidence threshold survive, and for every
/// (frame, class) only the detection with the lowest y is kept. Landmarks
/// higher up in the image are recognised more reliably by the detector.
#[derive(Debug, Clone)]
pub struct LandmarkExtractor {
    config: ExtractorConfig,
    layout: PitchLayout,
    frames: BTreeMap<u32, Vec<Landmark>>,
}

impl LandmarkExtractor {
    pub fn new(records: &[DetectionRecord], config: ExtractorConfig, layout: PitchLayout) -> Self {
        let mut unique: BTreeMap<(u32, LandmarkClass), Landmark> = BTreeMap::new();
        for record in records {
            let Some(class) = LandmarkClass::from_class_id(record.class_id) else {
                continue;
            };
            if record.confidence <= config.conf_threshold {
                continue;
            }
            let candidate = Landmark {
                class,
                point: record.center(),
                confidence: record.confidence,
            };
            unique
                .entry((record.frame, class))
                .and_modify(|kept| {
                    if candidate.point[1] < kept.point[1] {
                        *kept = candidate;
                    }
                })
                .or_insert(candidate);
        }

        let mut frames: BTreeMap<u32, Vec<Landmark>> = BTreeMap::new();
        for ((frame, _), landmark) in unique {
            frames.entry(frame).or_default().push(landmark);
        }

        debug!(
            frames_with_landmarks = frames.len(),
            conf_threshold = config.conf_threshold,
            "landmark table prepared"
        );

        Self {
            config,
            layout,
            frames,
        }
    }

    pub fn with_default_config(records: &[DetectionRecord]) -> Self {
        Self::new(records, ExtractorConfig::default(), PitchLayout::default())
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn layout(&self) -> &PitchLayout {
        &self.layout
    }

    /// Filtered landmarks of one frame, ordered by class.
    pub fn landmarks(&self, frame: u32) -> &[Landmark] {
        self.frames.get(&frame).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of lines with both landmarks present in `frame`.
    pub fn complete_line_count(&self, frame: u32) -> usize {
        let mut counts = [0usize; 4];
        for landmark in self.landmarks(frame) {
            counts[landmark.class.line().index()] += 1;
        }
        LandmarkLine::ALL
            .iter()
            .filter(|line| counts[line.index()] == 2)
            .count()
    }

    /// Quad for exactly `frame`, without looking back.
    pub fn select(&self, frame: u32) -> Result<Option<KeypointQuad>, LandmarkError> {
        select_quad(frame, self.landmarks(frame), &self.layout)
    }

    /// Best quad for `frame`, falling back to earlier frames.
    ///
    /// Frames `frame`, `frame - 1`, ... are tried until one yields a quad or
    /// `max_lookback` frames have been examined. A quad taken from an earlier
    /// frame is returned unchanged; `source_frame` tells where it came from.
    pub fn best_quad(&self, frame: u32) -> Result<Option<KeypointQuad>, LandmarkError> {
        for step in 0..self.config.max_lookback {
            let Some(candidate) = frame.checked_sub(step) else {
                break;
            };
            if let Some(quad) = self.select(candidate)? {
                if step > 0 {
                    debug!(frame, source_frame = candidate, "calibration recovered by look-back");
                }
                return Ok(Some(quad));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DetectionRecordBuilder;

    fn landmark(frame: u32, class_id: u32, x: f64, y: f64, conf: f64) -> DetectionRecord {
        DetectionRecordBuilder::new()
            .frame(frame)
            .class(class_id, "keypoint")
            .xywh(x, y, 0.01, 0.01)
            .confidence(conf)
            .build()
    }

    fn two_lines(frame: u32) -> Vec<DetectionRecord> {
        vec![
            landmark(frame, 34, 0.15, 0.37, 0.9),
            landmark(frame, 35, 0.82, 0.37, 0.9),
            landmark(frame, 31, 0.23, 0.29, 0.9),
            landmark(frame, 32, 0.75, 0.28, 0.9),
        ]
    }

    #[test]
    fn test_dedup_keeps_lowest_y() {
        let records = vec![
            landmark(5, 41, 0.10, 0.90, 0.9),
            landmark(5, 41, 0.11, 0.70, 0.8),
            landmark(5, 41, 0.12, 0.80, 0.95),
            landmark(5, 42, 0.90, 0.90, 0.9),
        ];
        let extractor = LandmarkExtractor::with_default_config(&records);
        let kept = extractor.landmarks(5);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].class, LandmarkClass::NearLeftCorner);
        assert_eq!(kept[0].point, [0.11, 0.70]);
    }

    #[test]
    fn test_confidence_threshold_is_strict() {
        let records = vec![
            landmark(0, 41, 0.1, 0.9, 0.6),
            landmark(0, 42, 0.9, 0.9, 0.61),
            landmark(0, 7, 0.5, 0.5, 0.99),
        ];
        let extractor = LandmarkExtractor::with_default_config(&records);
        let kept = extractor.landmarks(0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].class, LandmarkClass::NearRightCorner);
    }

    #[test]
    fn test_best_quad_current_frame() {
        let extractor = LandmarkExtractor::with_default_config(&two_lines(3));
        let quad = extractor.best_quad(3).unwrap().unwrap();
        assert_eq!(quad.source_frame, 3);
        assert_eq!(quad.class_ids(), [34, 35, 31, 32]);
        assert_eq!(extractor.complete_line_count(3), 2);
    }

    #[test]
    fn test_look_back_returns_earlier_quad_unchanged() {
        let mut records = two_lines(10);
        records.push(landmark(12, 41, 0.1, 0.9, 0.9));
        let extractor = LandmarkExtractor::with_default_config(&records);

        let direct = extractor.select(10).unwrap().unwrap();
        let recovered = extractor.best_quad(12).unwrap().unwrap();
        assert_eq!(recovered, direct);
        assert_eq!(recovered.source_frame, 10);
    }

    #[test]
    fn test_look_back_window_is_bounded() {
        let config = ExtractorConfig {
            max_lookback: 3,
            ..ExtractorConfig::default()
        };
        let extractor = LandmarkExtractor::new(&two_lines(10), config, PitchLayout::ultimate());

        // Frames 12, 11, 10 are examined
        assert!(extractor.best_quad(12).unwrap().is_some());
        // Frames 13, 12, 11 are examined
        assert!(extractor.best_quad(13).unwrap().is_none());
    }

    #[test]
    fn test_look_back_stops_at_frame_zero() {
        let extractor = LandmarkExtractor::with_default_config(&two_lines(5));
        assert!(extractor.best_quad(2).unwrap().is_none());
    }

    #[test]
    fn test_zero_lookback_examines_nothing() {
        let config = ExtractorConfig {
            max_lookback: 0,
            ..ExtractorConfig::default()
        };
        let extractor = LandmarkExtractor::new(&two_lines(0), config, PitchLayout::ultimate());
        assert!(extractor.best_quad(0).unwrap().is_none());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ExtractorConfig = serde_json::from_str(r#"{"max_lookback": 30}"#).unwrap();
        assert_eq!(config.max_lookback, 30);
        assert_eq!(config.conf_threshold, 0.6);
    }
}
