use std::{path::Path, sync::Arc};

use image::RgbaImage;

use crate::{
    assets::store::FrameAssetCache,
    compose::compositor::FrameCompositor,
    config::model::{DeviceVariant, EngineConfig, StrategyKind},
    foundation::{core::Canvas, error::DevframeResult},
    output::png::{encode_png, write_png_atomic},
    raster::{
        normalize::{RawCapture, normalize_capture},
        premul::PremulImage,
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Per-request overrides; unset fields fall back to configuration.
pub struct RenderRequest {
    /// Device variant to frame into.
    pub device: Option<DeviceVariant>,
    /// Canonical canvas for this request.
    pub target: Option<Canvas>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Whether the bezel was applied.
pub enum RenderOutcome {
    /// Framed with the given strategy.
    Framed {
        /// Strategy that produced the image.
        strategy: StrategyKind,
    },
    /// Framing failed; the image is the normalized capture without a bezel.
    Degraded {
        /// Display form of the framing error.
        reason: String,
    },
}

#[derive(Clone, Debug)]
/// Result handed to the transport layer.
pub struct Rendered {
    /// Straight-alpha pixels.
    pub image: RgbaImage,
    /// Variant that was requested.
    pub device: DeviceVariant,
    /// Canonical canvas the capture was normalized to.
    pub target: Canvas,
    /// Framed or degraded.
    pub outcome: RenderOutcome,
}

impl Rendered {
    /// Output dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    /// Whether the bezel was applied.
    pub fn is_framed(&self) -> bool {
        matches!(self.outcome, RenderOutcome::Framed { .. })
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> DevframeResult<Vec<u8>> {
        encode_png(&self.image)
    }

    /// Persist as PNG at `path`; nothing appears at `path` unless the write completes.
    pub fn write_png(&self, path: &Path) -> DevframeResult<()> {
        write_png_atomic(path, &self.image)
    }
}

/// Normalize-then-frame pipeline with graceful degrade.
///
/// Normalization failures are fatal because no usable image exists. Any failure after that
/// (asset loading, metadata, blending) is logged and answered with the unframed, normalized
/// image, so cosmetic framing never fails a request.
pub struct RenderEngine {
    config: Arc<EngineConfig>,
    compositor: FrameCompositor,
}

impl RenderEngine {
    /// Validate `config` and build an engine with an empty frame cache.
    pub fn new(config: EngineConfig) -> DevframeResult<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let frames = Arc::new(FrameAssetCache::new(Arc::clone(&config)));
        let compositor = FrameCompositor::new(Arc::clone(&config), frames);
        Ok(Self { config, compositor })
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared frame cache.
    pub fn frames(&self) -> &FrameAssetCache {
        self.compositor.frames()
    }

    /// Underlying compositor, without the degrade policy.
    pub fn compositor(&self) -> &FrameCompositor {
        &self.compositor
    }

    /// Normalize `capture` and frame it, degrading to the unframed image on framing failure.
    #[tracing::instrument(skip(self, capture))]
    pub fn render(&self, capture: &RawCapture, request: &RenderRequest) -> DevframeResult<Rendered> {
        let device = request.device.unwrap_or(self.config.default_device);
        let target = match request.target {
            Some(target) => target,
            None => self.config.target()?,
        };

        let normalized = normalize_capture(capture, target)?;
        Ok(self.frame_or_degrade(normalized, device, target))
    }

    /// Frame an already normalized image, degrading to it on failure.
    pub fn frame_or_degrade(
        &self,
        normalized: PremulImage,
        device: DeviceVariant,
        target: Canvas,
    ) -> Rendered {
        match self.compositor.compose(&normalized, device, target) {
            Ok(composite) => Rendered {
                image: composite.image,
                device,
                target,
                outcome: RenderOutcome::Framed {
                    strategy: composite.strategy,
                },
            },
            Err(err) => {
                tracing::warn!(%device, error = %err, "framing failed, returning unframed image");
                Rendered {
                    image: normalized.resize_exact(target).into_straight(),
                    device,
                    target,
                    outcome: RenderOutcome::Degraded {
                        reason: err.to_string(),
                    },
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
