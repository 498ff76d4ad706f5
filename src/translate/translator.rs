use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::coverage::CalibrationCoverage;
use super::teams::TeamAssignments;
use crate::calibration::{ExtractorConfig, Homography, LandmarkExtractor};
use crate::pitch::PitchLayout;
use crate::record::DetectionRecord;
use crate::team::Team;

/// Configuration for the Translator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub extractor: ExtractorConfig,
    /// Detector class id of players
    pub person_class_id: u32,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            extractor: ExtractorConfig::default(),
            person_class_id: 0,
        }
    }
}

/// A detection translated into pitch space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatedRecord {
    pub frame: u32,
    pub class_id: u32,
    pub class_name: String,
    pub track_id: Option<u32>,
    /// Normalized image coordinate of the box center
    pub image: [f64; 2],
    /// Pitch coordinate, `None` when the frame has no calibration
    pub pitch: Option<[f64; 2]>,
    /// `None` for non-players and players that could not be labelled
    pub team: Option<Team>,
}

/// Output of a translation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    /// One row per input detection, in input order
    pub records: Vec<TranslatedRecord>,
    pub coverage: CalibrationCoverage,
}

/// Per-frame homographies of a run; written once per frame, then read only.
#[derive(Debug, Clone)]
pub struct FrameCalibrations {
    homographies: Vec<Option<Homography>>,
    coverage: CalibrationCoverage,
}

impl FrameCalibrations {
    pub fn get(&self, frame: u32) -> Option<&Homography> {
        self.homographies.get(frame as usize)?.as_ref()
    }

    pub fn coverage(&self) -> &CalibrationCoverage {
        &self.coverage
    }
}

/// Translates a detection table into pitch coordinates.
///
/// A frame that cannot be calibrated only loses its own coordinates; it
/// never stops the run.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslatorConfig,
    layout: PitchLayout,
}

impl Translator {
    pub fn new(config: TranslatorConfig, layout: PitchLayout) -> Self {
        Self { config, layout }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn layout(&self) -> &PitchLayout {
        &self.layout
    }

    pub fn is_person(&self, record: &DetectionRecord) -> bool {
        record.class_id == self.config.person_class_id
    }

    /// Homography for each frame in `0..total_frames`.
    pub fn calibrate(&self, records: &[DetectionRecord], total_frames: u32) -> FrameCalibrations {
        let extractor = LandmarkExtractor::new(records, self.config.extractor.clone(), self.layout);
        let mut coverage = CalibrationCoverage {
            total_frames,
            ..CalibrationCoverage::default()
        };

        let homographies = (0..total_frames)
            .map(|frame| match extractor.best_quad(frame) {
                Ok(Some(quad)) => match Homography::from_quad(&quad, &self.layout) {
                    Ok(h) => {
                        if quad.source_frame == frame {
                            coverage.direct += 1;
                        } else {
                            coverage.look_back += 1;
                        }
                        Some(h)
                    }
                    Err(err) => {
                        warn!(frame, source_frame = quad.source_frame, %err, "homography estimation failed");
                        coverage.degenerate += 1;
                        None
                    }
                },
                Ok(None) => {
                    debug!(frame, "no calibration landmarks within look-back window");
                    coverage.unavailable += 1;
                    None
                }
                Err(err) => {
                    error!(frame, %err, "inconsistent landmark data");
                    coverage.inconsistent += 1;
                    None
                }
            })
            .collect();

        FrameCalibrations {
            homographies,
            coverage,
        }
    }

    /// Project every record into pitch space and attach its team label.
    ///
    /// Records whose frame has no homography (or lies outside
    /// `0..total_frames`) keep `pitch: None`.
    pub fn translate(
        &self,
        records: &[DetectionRecord],
        total_frames: u32,
        teams: &TeamAssignments,
    ) -> Translation {
        let calibrations = self.calibrate(records, total_frames);

        let records: Vec<TranslatedRecord> = records
            .iter()
            .map(|record| {
                let pitch = calibrations
                    .get(record.frame)
                    .map(|h| h.project(record.center()))
                    .filter(|p| p.iter().all(|v| v.is_finite()));
                let team = if self.is_person(record) {
                    record.track_id.and_then(|id| teams.get(record.frame, id))
                } else {
                    None
                };
                TranslatedRecord {
                    frame: record.frame,
                    class_id: record.class_id,
                    class_name: record.class_name.clone(),
                    track_id: record.track_id,
                    image: record.center(),
                    pitch,
                    team,
                }
            })
            .collect();

        let coverage = calibrations.coverage;
        info!(
            records = records.len(),
            total_frames,
            direct = coverage.direct,
            look_back = coverage.look_back,
            uncalibrated = coverage.uncalibrated(),
            "translation finished"
        );
        if coverage.uncalibrated() > 0 {
            warn!(
                uncalibrated_ratio = coverage.uncalibrated_ratio(),
                "some frames have no pitch coordinates"
            );
        }

        Translation { records, coverage }
    }
}
