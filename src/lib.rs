//! Devframe turns raw page screenshots into device-framed marketing images.
//!
//! A capture is first normalized to a canonical canvas (cover-resized, top-anchored), then
//! layered with a device bezel according to the variant's strategy:
//!
//! - overlay: the screenshot is fitted into the bezel's screen cutout and the bezel is drawn
//!   on top, at the bezel's native size
//! - fill: the screenshot is shrunk into a rounded thumbnail and the bezel is drawn over it,
//!   at the canonical canvas size
//!
//! Framing is cosmetic: [`RenderEngine::render`] returns the unframed, normalized image when
//! anything after normalization fails.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod compose;
pub(crate) mod config;
pub(crate) mod output;
pub(crate) mod raster;
pub(crate) mod render;

pub use crate::foundation::core::{Canvas, Rect, ScreenRect, Size, cover_scale, fit_scale};
pub use crate::foundation::error::{BoxedCause, DevframeError, DevframeResult};

pub use crate::assets::decode::{decode_premul, probe_dimensions};
pub use crate::assets::store::{FrameAsset, FrameAssetCache};
pub use crate::compose::compositor::{CompositeResult, FrameCompositor};
pub use crate::compose::overlay::{Placement, place_in_cutout};
pub use crate::config::model::{
    CornerRadius, DeviceProfile, DeviceVariant, EngineConfig, FillSpec, FrameFit, OverlaySpec,
    REFERENCE_WIDTH, Strategy, StrategyKind,
};
pub use crate::output::naming::{DEFAULT_STEM, domain_stem, output_file_name};
pub use crate::output::png::{encode_png, ensure_parent_dir, write_png_atomic};
pub use crate::raster::mask::rounded_mask;
pub use crate::raster::normalize::{
    Anchor, RawCapture, normalize, normalize_anchored, normalize_capture,
};
pub use crate::raster::premul::{PremulImage, PremulRgba8, over};
pub use crate::render::pipeline::{RenderEngine, RenderOutcome, RenderRequest, Rendered};
