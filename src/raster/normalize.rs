use image::RgbaImage;

use crate::{
    assets::decode,
    foundation::{
        core::{Canvas, cover_scale},
        error::{DevframeError, DevframeResult},
    },
    raster::premul::PremulImage,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Which part of an oversized source survives a cover crop.
pub enum Anchor {
    /// Keep the top edge; horizontal excess is trimmed evenly from both sides.
    #[default]
    Top,
    /// Keep the center on both axes.
    Center,
}

#[derive(Clone, Debug)]
/// Raster handed over by the capture collaborator, of any size.
pub enum RawCapture {
    /// Encoded image bytes (PNG, JPEG, ...).
    Encoded(Vec<u8>),
    /// Already decoded straight-alpha raster.
    Rgba(RgbaImage),
}

impl RawCapture {
    /// Decode into premultiplied form without resizing.
    pub fn decode(&self) -> DevframeResult<PremulImage> {
        match self {
            Self::Encoded(bytes) => {
                decode::probe_dimensions(bytes)?;
                decode::decode_premul(bytes)
            }
            Self::Rgba(img) => {
                if img.width() == 0 || img.height() == 0 {
                    return Err(DevframeError::metadata(format!(
                        "capture has empty dimensions {}x{}",
                        img.width(),
                        img.height()
                    )));
                }
                Ok(PremulImage::from_straight(img.clone()))
            }
        }
    }
}

/// Force `src` onto exactly `target`, keeping the top of the source visible.
pub fn normalize(src: &PremulImage, target: Canvas) -> DevframeResult<PremulImage> {
    normalize_anchored(src, target, Anchor::Top)
}

/// Decode `capture` and force it onto exactly `target` (top-anchored).
pub fn normalize_capture(capture: &RawCapture, target: Canvas) -> DevframeResult<PremulImage> {
    normalize(&capture.decode()?, target)
}

/// Scale `src` uniformly until it covers `target`, then crop the excess away from `anchor`.
///
/// The crop happens in source space before resampling, so only the surviving region is
/// resized and the output is always exactly `target`.
pub fn normalize_anchored(
    src: &PremulImage,
    target: Canvas,
    anchor: Anchor,
) -> DevframeResult<PremulImage> {
    let size = src.canvas();
    if size.width == 0 || size.height == 0 {
        return Err(DevframeError::metadata(format!(
            "source has empty dimensions {}x{}",
            size.width, size.height
        )));
    }
    if target.width == 0 || target.height == 0 {
        return Err(DevframeError::validation(format!(
            "target canvas must be non-empty, got {}x{}",
            target.width, target.height
        )));
    }

    let s = cover_scale(size, target);
    let region = Canvas {
        width: ((f64::from(target.width) / s).round() as u32).clamp(1, size.width),
        height: ((f64::from(target.height) / s).round() as u32).clamp(1, size.height),
    };
    let x = (size.width - region.width) / 2;
    let y = match anchor {
        Anchor::Top => 0,
        Anchor::Center => (size.height - region.height) / 2,
    };

    let cropped = src.crop(x, y, region)?;
    Ok(cropped.resize_exact(target))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/normalize.rs"]
mod tests;
