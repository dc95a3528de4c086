use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::Path;

use crate::error::{Result, ViewerError};

// ---------------------------------------------------------------------------
// Decoded image data (CPU side)
// ---------------------------------------------------------------------------

pub struct DecodedImage {
    pub pixels: RgbaImage,
    pub width: u32,
    pub height: u32,
}

/// An RGBA copy of a decoded image resampled to a target size.
pub struct FittedImage {
    pub rgba_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl DecodedImage {
    /// Resample to exactly `width` x `height` with Lanczos3.
    ///
    /// Asking for the source size returns an unfiltered copy.
    pub fn fitted(&self, width: u32, height: u32) -> FittedImage {
        if width == self.width && height == self.height {
            return FittedImage {
                rgba_bytes: self.pixels.as_raw().clone(),
                width,
                height,
            };
        }
        let resized = imageops::resize(&self.pixels, width, height, FilterType::Lanczos3);
        FittedImage {
            rgba_bytes: resized.into_raw(),
            width,
            height,
        }
    }

    /// Unscaled copy, used when the fit computation yields no usable size.
    pub fn original(&self) -> FittedImage {
        self.fitted(self.width, self.height)
    }
}

pub fn decode_image(path: &Path) -> Result<DecodedImage> {
    let img = image::open(path).map_err(|source| ViewerError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let pixels = img.to_rgba8();
    let (width, height) = pixels.dimensions();
    log::debug!("decoded {:?} ({}x{})", path, width, height);
    Ok(DecodedImage {
        pixels,
        width,
        height,
    })
}
