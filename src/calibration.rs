//! Landmark selection and image-to-pitch calibration.

mod error;
mod extractor;
mod homography;
mod quad;

pub use error::{HomographyError, LandmarkError};
pub use extractor::{ExtractorConfig, LandmarkExtractor};
pub use homography::Homography;
pub use quad::{KeypointQuad, Landmark, select_quad};
