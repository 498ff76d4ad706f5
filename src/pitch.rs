//! Pitch landmarks and their real-world layout.

mod landmark;
mod layout;

pub use landmark::{LandmarkClass, LandmarkLine, Side};
pub use layout::PitchLayout;
