//! Player crops cut out of a frame image.

use image::RgbImage;
use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};

use super::bbox::NormalizedBox;
use crate::record::DetectionRecord;

/// Sub-rectangle of a resized crop, in pixels of the canonical crop size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One player's appearance in one frame.
#[derive(Debug, Clone)]
pub struct PlayerCrop {
    pub track_id: u32,
    /// Resized (and windowed) RGB pixels
    pub image: RgbImage,
    /// Source box in normalized TLBR format
    pub bounding_box: [f64; 4],
}

impl PlayerCrop {
    /// Cut the record's box out of `frame`, resize it to `width` × `height`
    /// and keep only `window` of the result when given.
    ///
    /// Returns `None` for records without a track id or whose box does not
    /// cover any pixel of the frame.
    pub fn extract(
        frame: &RgbImage,
        record: &DetectionRecord,
        width: u32,
        height: u32,
        window: Option<CropWindow>,
    ) -> Option<Self> {
        let track_id = record.track_id?;
        let bbox = NormalizedBox::from_xywh(record.x, record.y, record.w, record.h);
        let rect = bbox.to_pixel_rect(frame.width(), frame.height())?;

        let cut = imageops::crop_imm(frame, rect.x, rect.y, rect.width, rect.height).to_image();
        let resized = imageops::resize(&cut, width, height, FilterType::Triangle);
        let image = match window {
            Some(w) => imageops::crop_imm(&resized, w.x, w.y, w.width, w.height).to_image(),
            None => resized,
        };

        Some(Self {
            track_id,
            image,
            bounding_box: bbox.to_tlbr(),
        })
    }

    /// Raw pixel values, row-major RGB.
    pub fn features(&self) -> &[u8] {
        self.image.as_raw()
    }
}
