use std::io::Cursor;

use anyhow::Context;

use crate::{
    foundation::{
        core::Canvas,
        error::{DevframeError, DevframeResult},
    },
    raster::premul::PremulImage,
};

/// Read width/height from the image header without decoding pixels.
pub fn probe_dimensions(bytes: &[u8]) -> DevframeResult<Canvas> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DevframeError::metadata(format!("guess image format: {e}")))?;
    if reader.format().is_none() {
        return Err(DevframeError::metadata("unrecognized image format"));
    }
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| DevframeError::metadata(format!("read image dimensions: {e}")))?;
    Canvas::new(width, height)
        .map_err(|_| DevframeError::metadata(format!("image has empty dimensions {width}x{height}")))
}

/// Decode encoded image bytes into premultiplied RGBA8.
pub fn decode_premul(bytes: &[u8]) -> DevframeResult<PremulImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(PremulImage::from_straight(dyn_img.to_rgba8()))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
