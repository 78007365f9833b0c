use crate::{
    assets::store::FrameAsset,
    config::model::OverlaySpec,
    foundation::{
        core::{Canvas, Rect, ScreenRect},
        error::{DevframeError, DevframeResult},
    },
    raster::premul::PremulImage,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Where a scaled screenshot lands inside a frame.
pub struct Placement {
    /// Scaled screenshot size.
    pub size: Canvas,
    /// Left edge in frame pixels.
    pub left: u32,
    /// Top edge in frame pixels.
    pub top: u32,
}

impl Placement {
    /// Bounding box in frame pixels.
    pub fn rect(self) -> Rect {
        Rect::from_origin_size(
            (f64::from(self.left), f64::from(self.top)),
            self.size.size(),
        )
    }
}

/// Fit `src` uniformly inside `cutout` and center it there.
pub fn place_in_cutout(src: Canvas, cutout: ScreenRect) -> Placement {
    let size = src.fit_within(cutout.canvas());
    let (dx, dy) = cutout.canvas().center_offset(size);
    Placement {
        size,
        left: cutout.x + dx,
        top: cutout.y + dy,
    }
}

/// Windowed overlay: background, then the fitted screenshot, then the whole bezel on top.
///
/// The output has the frame's native size. Screenshot pixels are only visible where the
/// bezel is transparent.
pub(crate) fn compose_overlay(
    screenshot: &PremulImage,
    frame: &FrameAsset,
    spec: &OverlaySpec,
) -> DevframeResult<PremulImage> {
    let cutout = spec.screen_cutout;
    if !cutout.fits_within(frame.size) {
        return Err(DevframeError::validation(format!(
            "screen cutout {}x{}+{}+{} exceeds frame '{}' ({}x{})",
            cutout.width,
            cutout.height,
            cutout.x,
            cutout.y,
            frame.path.display(),
            frame.size.width,
            frame.size.height
        )));
    }

    let placement = place_in_cutout(screenshot.canvas(), cutout);
    let scaled = screenshot.resize_exact(placement.size);

    let mut canvas = PremulImage::solid(frame.size, spec.background_rgba);
    canvas.draw_over(&scaled, i64::from(placement.left), i64::from(placement.top));
    canvas.draw_over(&frame.image, 0, 0);
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/overlay.rs"]
mod tests;
