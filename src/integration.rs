//! Integration module for connecting frame image sources with the translator.
//!
//! Team labelling needs the decoded frame images; this module provides the
//! trait video backends implement and a pipeline that drives labelling and
//! translation from it.

mod pipeline;
mod source;

pub use pipeline::TranslationPipeline;
pub use source::{FrameSource, InMemoryFrames};
