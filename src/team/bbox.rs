/// Bounding box in normalized image coordinates, stored as center and size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizedBox {
    /// Center x in `[0, 1]`
    pub cx: f64,
    /// Center y in `[0, 1]`
    pub cy: f64,
    /// Width as a fraction of the image width
    pub width: f64,
    /// Height as a fraction of the image height
    pub height: f64,
}

/// Integer pixel rectangle: top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl NormalizedBox {
    /// Create a box from XYWH format (center x, center y, width, height).
    #[inline]
    pub fn from_xywh(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self {
            cx,
            cy,
            width,
            height,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f64; 4] {
        [
            self.cx - self.width / 2.0,
            self.cy - self.height / 2.0,
            self.cx + self.width / 2.0,
            self.cy + self.height / 2.0,
        ]
    }

    /// Pixel rectangle inside an image of the given size.
    ///
    /// The box is clipped to the image. Returns `None` when nothing is left.
    pub fn to_pixel_rect(&self, image_width: u32, image_height: u32) -> Option<PixelRect> {
        let [x1, y1, x2, y2] = self.to_tlbr();
        let clamp_x = |v: f64| (v * image_width as f64).round().clamp(0.0, image_width as f64) as u32;
        let clamp_y = |v: f64| (v * image_height as f64).round().clamp(0.0, image_height as f64) as u32;

        let (left, right) = (clamp_x(x1), clamp_x(x2));
        let (top, bottom) = (clamp_y(y1), clamp_y(y2));
        if right <= left || bottom <= top {
            return None;
        }

        Some(PixelRect {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        })
    }
}
