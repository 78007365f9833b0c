use std::sync::Arc;

use image::RgbaImage;

use crate::{
    assets::store::FrameAssetCache,
    compose::{fill::compose_fill, overlay::compose_overlay},
    config::model::{DeviceVariant, EngineConfig, Strategy, StrategyKind},
    foundation::{core::Canvas, error::DevframeResult},
    output::png::encode_png,
    raster::premul::PremulImage,
};

#[derive(Clone, Debug)]
/// Final framed raster. Ownership passes to the caller.
pub struct CompositeResult {
    /// Straight-alpha pixels.
    pub image: RgbaImage,
    /// Variant that was applied.
    pub variant: DeviceVariant,
    /// Layering strategy that produced the image.
    pub strategy: StrategyKind,
}

impl CompositeResult {
    /// Output dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> DevframeResult<Vec<u8>> {
        encode_png(&self.image)
    }
}

/// Layers a normalized screenshot and a device bezel according to the variant's strategy.
pub struct FrameCompositor {
    config: Arc<EngineConfig>,
    frames: Arc<FrameAssetCache>,
}

impl FrameCompositor {
    /// Compositor reading profiles from `config` and bezels from `frames`.
    pub fn new(config: Arc<EngineConfig>, frames: Arc<FrameAssetCache>) -> Self {
        Self { config, frames }
    }

    /// Shared frame cache.
    pub fn frames(&self) -> &Arc<FrameAssetCache> {
        &self.frames
    }

    /// Frame `normalized` (already sized to `target`) for `variant`.
    ///
    /// Overlay output has the bezel's native size; fill output is exactly `target`.
    #[tracing::instrument(skip(self, normalized), fields(src_w = normalized.canvas().width, src_h = normalized.canvas().height))]
    pub fn compose(
        &self,
        normalized: &PremulImage,
        variant: DeviceVariant,
        target: Canvas,
    ) -> DevframeResult<CompositeResult> {
        let profile = self.config.profile(variant)?;
        profile.validate()?;
        let frame = self.frames.get(variant)?;

        let composed = match &profile.strategy {
            Strategy::Overlay(spec) => compose_overlay(normalized, &frame, spec)?,
            Strategy::Fill(spec) => compose_fill(normalized, &frame, spec, target)?,
        };

        Ok(CompositeResult {
            image: composed.into_straight(),
            variant,
            strategy: profile.strategy.kind(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
