//! Frame translation: calibrate every frame, project every detection, join team labels.

mod coverage;
mod teams;
mod translator;

pub use coverage::CalibrationCoverage;
pub use teams::TeamAssignments;
pub use translator::{FrameCalibrations, TranslatedRecord, Translation, Translator, TranslatorConfig};
