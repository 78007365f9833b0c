use image::GrayImage;

use crate::foundation::{
    core::Canvas,
    error::{DevframeError, DevframeResult},
};

/// Rasterize an alpha mask of `size` that is opaque inside a rounded rectangle of `radius`
/// and transparent outside it.
///
/// The shape is described as an SVG `<rect rx ry>` and rendered with `resvg`, so edges along
/// the arcs are anti-aliased. Radii larger than half the shorter side are clamped.
pub fn rounded_mask(size: Canvas, radius: f64) -> DevframeResult<GrayImage> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(DevframeError::validation(format!(
            "corner radius must be finite and >= 0, got {radius}"
        )));
    }
    let Canvas { width, height } = size;
    let r = radius
        .min(f64::from(width) / 2.0)
        .min(f64::from(height) / 2.0);

    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><rect x="0" y="0" width="{width}" height="{height}" rx="{r}" ry="{r}" fill="#fff"/></svg>"##
    );
    let tree = usvg::Tree::from_data(svg.as_bytes(), &usvg::Options::default()).map_err(|e| {
        DevframeError::composition("parse rounded mask svg", format!("{e}"))
    })?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        DevframeError::composition(
            "allocate rounded mask",
            format!("invalid pixmap size {width}x{height}"),
        )
    })?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    let alpha: Vec<u8> = pixmap.data().chunks_exact(4).map(|px| px[3]).collect();
    GrayImage::from_raw(width, height, alpha).ok_or_else(|| {
        DevframeError::composition("build rounded mask", "mask buffer has the wrong length")
    })
}

#[cfg(test)]
#[path = "../../tests/unit/raster/mask.rs"]
mod tests;
