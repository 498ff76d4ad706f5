//! Trait for frame image backends.

use std::convert::Infallible;

use image::RgbImage;

/// Trait for anything that can hand out decoded video frames.
///
/// Implement this trait to connect a video decoder to the pipeline.
///
/// # Example
///
/// ```ignore
/// use pitchcal::FrameSource;
/// use image::RgbImage;
///
/// struct MyDecoder {
///     // Your decoder here
/// }
///
/// impl FrameSource for MyDecoder {
///     type Error = std::io::Error;
///
///     fn frame(&mut self, frame: u32) -> Result<Option<RgbImage>, Self::Error> {
///         // Seek and decode
///         Ok(None)
///     }
/// }
/// ```
pub trait FrameSource {
    /// Error type for decoding failures.
    type Error;

    /// Decoded RGB image of `frame`, or `None` if the source has no such frame.
    fn frame(&mut self, frame: u32) -> Result<Option<RgbImage>, Self::Error>;
}

/// Frames held in memory, indexed by frame number.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFrames {
    frames: Vec<RgbImage>,
}

impl InMemoryFrames {
    pub fn new(frames: Vec<RgbImage>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl From<Vec<RgbImage>> for InMemoryFrames {
    fn from(frames: Vec<RgbImage>) -> Self {
        Self::new(frames)
    }
}

impl FrameSource for InMemoryFrames {
    type Error = Infallible;

    fn frame(&mut self, frame: u32) -> Result<Option<RgbImage>, Self::Error> {
        Ok(self.frames.get(frame as usize).cloned())
    }
}
