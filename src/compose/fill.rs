use crate::{
    assets::store::FrameAsset,
    config::model::{FillSpec, FrameFit},
    foundation::{
        core::Canvas,
        error::{DevframeError, DevframeResult},
    },
    raster::{
        mask::rounded_mask,
        normalize::{Anchor, normalize_anchored},
        premul::PremulImage,
    },
};

/// Full-canvas fill: transparent canvas, centered rounded thumbnail, resized bezel on top.
///
/// The output is always exactly `target`.
pub(crate) fn compose_fill(
    normalized: &PremulImage,
    frame: &FrameAsset,
    spec: &FillSpec,
    target: Canvas,
) -> DevframeResult<PremulImage> {
    let thumb = rounded_thumbnail(normalized, spec, target)?;
    let bezel = fit_bezel(frame, spec, target)?;

    let mut canvas = PremulImage::transparent(target);
    let (left, top) = target.center_offset(thumb.canvas());
    canvas.draw_over(&thumb, i64::from(left), i64::from(top));
    let (left, top) = target.center_offset(bezel.canvas());
    canvas.draw_over(&bezel, i64::from(left), i64::from(top));
    Ok(canvas)
}

/// Shrink `normalized` to `scale` of the target and cut its corners round.
pub(crate) fn rounded_thumbnail(
    normalized: &PremulImage,
    spec: &FillSpec,
    target: Canvas,
) -> DevframeResult<PremulImage> {
    let size = target.scaled(spec.scale)?;
    let mut thumb = normalize_anchored(normalized, size, Anchor::Center)?;
    let mask = rounded_mask(size, spec.corner_radius.resolve(target))?;
    thumb.mask_dest_in(&mask)?;
    Ok(thumb)
}

/// Resize the bezel into `target` minus the height inset.
fn fit_bezel(frame: &FrameAsset, spec: &FillSpec, target: Canvas) -> DevframeResult<PremulImage> {
    let height = target
        .height
        .checked_sub(spec.height_inset)
        .filter(|h| *h > 0)
        .ok_or_else(|| {
            DevframeError::validation(format!(
                "height inset {} leaves no room in a {}px tall canvas",
                spec.height_inset, target.height
            ))
        })?;
    let bounds = Canvas {
        width: target.width,
        height,
    };

    match spec.frame_fit {
        FrameFit::Fill => Ok(frame.image.resize_exact(bounds)),
        FrameFit::Contain => {
            let fitted = frame.size.fit_within(bounds);
            let resized = frame.image.resize_exact(fitted);
            let mut padded = PremulImage::transparent(bounds);
            let (left, top) = bounds.center_offset(fitted);
            padded.draw_over(&resized, i64::from(left), i64::from(top));
            Ok(padded)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/fill.rs"]
mod tests;
