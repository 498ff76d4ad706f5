//! Pitch-space translation of per-frame sports detections.
//!
//! Raw detector output (normalized image boxes per frame) is turned into
//! real-world pitch coordinates with team labels:
//!
//! 1. [`LandmarkExtractor`] picks four calibration landmarks per frame,
//!    looking back over earlier frames when the current one is incomplete.
//! 2. [`Homography`] maps normalized image points onto the pitch.
//! 3. [`TeamClassifier`] splits the frame's players into two teams by
//!    appearance, capped at the roster size.
//! 4. [`Translator`] joins everything into one [`TranslatedRecord`] per
//!    detection.

pub mod calibration;
pub mod integration;
pub mod pitch;
pub mod record;
pub mod team;
pub mod translate;

pub use calibration::{
    ExtractorConfig, Homography, HomographyError, KeypointQuad, Landmark, LandmarkError,
    LandmarkExtractor, select_quad,
};
pub use integration::{FrameSource, InMemoryFrames, TranslationPipeline};
pub use pitch::{LandmarkClass, LandmarkLine, PitchLayout, Side};
pub use record::{DetectionRecord, DetectionRecordBuilder};
pub use team::{Team, TeamClassifier, TeamClassifierConfig, TeamLabel};
pub use translate::{
    CalibrationCoverage, FrameCalibrations, TeamAssignments, TranslatedRecord, Translation,
    Translator, TranslatorConfig,
};
