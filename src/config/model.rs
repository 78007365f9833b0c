use std::{
    collections::BTreeMap,
    fmt,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::foundation::{
    core::{Canvas, ScreenRect},
    error::{DevframeError, DevframeResult},
};

/// Reference canvas width the stock corner radius was designed for.
pub const REFERENCE_WIDTH: u32 = 1080;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
/// Device family a capture can be framed into.
pub enum DeviceVariant {
    /// Vertical phone bezel drawn over a rounded, shrunk screenshot.
    #[serde(alias = "iphone")]
    Phone,
    /// Android bezel drawn over a rounded, shrunk screenshot.
    Android,
    /// Phone bezel with a transparent screen window the screenshot shows through.
    #[serde(alias = "phone-overlay")]
    PhoneOverlay,
}

impl DeviceVariant {
    /// All known variants, in declaration order.
    pub const ALL: [DeviceVariant; 3] = [Self::Phone, Self::Android, Self::PhoneOverlay];

    /// Stable configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Android => "android",
            Self::PhoneOverlay => "phoneOverlay",
        }
    }
}

impl fmt::Display for DeviceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceVariant {
    type Err = DevframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phone" | "iphone" => Ok(Self::Phone),
            "android" => Ok(Self::Android),
            "phoneoverlay" | "phone-overlay" | "phone_overlay" => Ok(Self::PhoneOverlay),
            other => Err(DevframeError::validation(format!(
                "unknown device variant '{other}' (expected phone, android or phoneOverlay)"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Per-variant framing configuration.
pub struct DeviceProfile {
    /// Bezel artwork (PNG with alpha), relative to the assets root unless absolute.
    pub frame_path: PathBuf,
    /// Layering strategy and its constants.
    pub strategy: Strategy,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// How the screenshot and the bezel are layered.
pub enum Strategy {
    /// Screenshot fitted into a cutout, bezel drawn on top; output has the frame's size.
    Overlay(OverlaySpec),
    /// Rounded thumbnail centered on the target canvas, resized bezel drawn on top.
    Fill(FillSpec),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Strategy tag without its constants.
pub enum StrategyKind {
    /// See [`Strategy::Overlay`].
    Overlay,
    /// See [`Strategy::Fill`].
    Fill,
}

impl Strategy {
    /// Tag of this strategy.
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Overlay(_) => StrategyKind::Overlay,
            Self::Fill(_) => StrategyKind::Fill,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Constants for [`Strategy::Overlay`].
pub struct OverlaySpec {
    /// Window in frame pixel space where the screenshot shows through.
    pub screen_cutout: ScreenRect,
    /// Straight-alpha RGBA fill behind the screenshot.
    #[serde(default = "default_overlay_background")]
    pub background_rgba: [u8; 4],
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Constants for [`Strategy::Fill`].
pub struct FillSpec {
    /// Thumbnail size as a fraction of the target canvas, in `(0, 1]`.
    #[serde(default = "default_fill_scale")]
    pub scale: f64,
    /// Corner radius of the rounded thumbnail.
    #[serde(default)]
    pub corner_radius: CornerRadius,
    /// Pixels subtracted from the target height before resizing the bezel.
    #[serde(default)]
    pub height_inset: u32,
    /// How the bezel is resized to the target canvas.
    #[serde(default)]
    pub frame_fit: FrameFit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Resize mode for the bezel in [`Strategy::Fill`].
pub enum FrameFit {
    /// Uniform scale to fit, padded with transparency and centered.
    #[default]
    Contain,
    /// Non-uniform stretch to exactly the (inset) target size.
    Fill,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Corner radius, optionally proportional to the target width.
pub struct CornerRadius {
    /// Radius in pixels at `reference_width` (or absolute when no reference is set).
    pub px: f64,
    /// Canvas width `px` was designed for.
    #[serde(default)]
    pub reference_width: Option<u32>,
}

impl Default for CornerRadius {
    fn default() -> Self {
        Self {
            px: 60.0,
            reference_width: Some(REFERENCE_WIDTH),
        }
    }
}

impl CornerRadius {
    /// Effective radius in pixels for a target canvas.
    pub fn resolve(self, target: Canvas) -> f64 {
        match self.reference_width {
            Some(reference) if reference > 0 => {
                self.px * f64::from(target.width) / f64::from(reference)
            }
            _ => self.px,
        }
    }
}

fn default_overlay_background() -> [u8; 4] {
    [255, 255, 255, 255]
}

fn default_fill_scale() -> f64 {
    0.9
}

impl DeviceProfile {
    /// Check the profile's constants.
    pub fn validate(&self) -> DevframeResult<()> {
        if self.frame_path.as_os_str().is_empty() {
            return Err(DevframeError::validation("framePath must be non-empty"));
        }
        match &self.strategy {
            Strategy::Overlay(spec) => {
                if spec.screen_cutout.is_empty() {
                    return Err(DevframeError::validation(
                        "overlay screenCutout must have non-zero width and height",
                    ));
                }
            }
            Strategy::Fill(spec) => {
                if !spec.scale.is_finite() || spec.scale <= 0.0 || spec.scale > 1.0 {
                    return Err(DevframeError::validation(format!(
                        "fill scale must be in (0, 1], got {}",
                        spec.scale
                    )));
                }
                if !spec.corner_radius.px.is_finite() || spec.corner_radius.px < 0.0 {
                    return Err(DevframeError::validation(format!(
                        "cornerRadius must be finite and >= 0, got {}",
                        spec.corner_radius.px
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Immutable engine configuration.
///
/// Built once (usually from JSON) and shared by every component; no component mutates it.
pub struct EngineConfig {
    /// Canonical canvas width.
    pub target_width: u32,
    /// Canonical canvas height.
    pub target_height: u32,
    /// Variant used when a request names none.
    pub default_device: DeviceVariant,
    /// Framing profile per variant.
    pub devices: BTreeMap<DeviceVariant, DeviceProfile>,
    /// Directory relative frame paths resolve against.
    #[serde(skip)]
    pub assets_root: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let rounded_fill = |height_inset, frame_fit| {
            Strategy::Fill(FillSpec {
                scale: default_fill_scale(),
                corner_radius: CornerRadius::default(),
                height_inset,
                frame_fit,
            })
        };

        let mut devices = BTreeMap::new();
        devices.insert(
            DeviceVariant::Phone,
            DeviceProfile {
                frame_path: PathBuf::from("iphone-frame.png"),
                strategy: rounded_fill(110, FrameFit::Fill),
            },
        );
        devices.insert(
            DeviceVariant::Android,
            DeviceProfile {
                frame_path: PathBuf::from("android-frame.png"),
                strategy: rounded_fill(0, FrameFit::Contain),
            },
        );
        devices.insert(
            DeviceVariant::PhoneOverlay,
            DeviceProfile {
                frame_path: PathBuf::from("iphone-frame.png"),
                strategy: Strategy::Overlay(OverlaySpec {
                    screen_cutout: ScreenRect {
                        x: 50,
                        y: 120,
                        width: 980,
                        height: 2160,
                    },
                    background_rgba: default_overlay_background(),
                }),
            },
        );

        Self {
            target_width: 1080,
            target_height: 2400,
            default_device: DeviceVariant::Phone,
            devices,
            assets_root: PathBuf::from("."),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a JSON reader. Frame paths resolve against the working
    /// directory.
    pub fn from_reader<R: std::io::Read>(r: R) -> DevframeResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| DevframeError::validation(format!("parse config JSON: {e}")))?;
        Ok(cfg.with_assets_root("."))
    }

    /// Parse a configuration from a JSON file. Frame paths resolve against the file's
    /// directory.
    pub fn from_path(path: impl AsRef<Path>) -> DevframeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            DevframeError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_reader(BufReader::new(f))?;
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Ok(cfg.with_assets_root(root))
    }

    /// Replace the directory relative frame paths resolve against.
    pub fn with_assets_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.assets_root = root.into();
        self
    }

    /// Configured canonical canvas.
    pub fn target(&self) -> DevframeResult<Canvas> {
        Canvas::new(self.target_width, self.target_height)
    }

    /// Framing profile for `variant`.
    pub fn profile(&self, variant: DeviceVariant) -> DevframeResult<&DeviceProfile> {
        self.devices.get(&variant).ok_or_else(|| {
            DevframeError::validation(format!("no device profile configured for '{variant}'"))
        })
    }

    /// Resolved on-disk location of the bezel for `variant`.
    pub fn frame_path(&self, variant: DeviceVariant) -> DevframeResult<PathBuf> {
        let profile = self.profile(variant)?;
        Ok(if profile.frame_path.is_absolute() {
            profile.frame_path.clone()
        } else {
            self.assets_root.join(&profile.frame_path)
        })
    }

    /// Check the whole configuration.
    pub fn validate(&self) -> DevframeResult<()> {
        self.target()?;
        self.profile(self.default_device)?;
        for (variant, profile) in &self.devices {
            profile.validate().map_err(|e| {
                DevframeError::validation(format!("device '{variant}': {e}"))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
