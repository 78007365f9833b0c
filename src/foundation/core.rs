use crate::foundation::error::{DevframeError, DevframeResult};

pub use kurbo::{Rect, Size};

/// Pixel dimensions of a raster or output canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting zero-sized dimensions.
    pub fn new(width: u32, height: u32) -> DevframeResult<Self> {
        if width == 0 || height == 0 {
            return Err(DevframeError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Canvas size as a `kurbo` size.
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Canvas bounds anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.size())
    }

    /// Scale both axes by `factor`, flooring to whole pixels.
    pub fn scaled(self, factor: f64) -> DevframeResult<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(DevframeError::validation(format!(
                "scale factor must be finite and > 0, got {factor}"
            )));
        }
        let size = self.size() * factor;
        Self::new(size.width.floor() as u32, size.height.floor() as u32)
    }

    /// Largest size with this canvas' aspect ratio that fits inside `bounds`.
    ///
    /// Dimensions are floored so the result never exceeds `bounds`, and never drop below one
    /// pixel unless `bounds` itself is empty on that axis.
    pub fn fit_within(self, bounds: Canvas) -> Canvas {
        let s = fit_scale(self, bounds);
        let size = self.size() * s;
        Canvas {
            width: (size.width.floor() as u32).max(1).min(bounds.width),
            height: (size.height.floor() as u32).max(1).min(bounds.height),
        }
    }

    /// Offset that centers `inner` inside this canvas (floor division, clamped at zero).
    pub fn center_offset(self, inner: Canvas) -> (u32, u32) {
        (
            self.width.saturating_sub(inner.width) / 2,
            self.height.saturating_sub(inner.height) / 2,
        )
    }
}

/// Rectangle within a frame asset where the live screenshot shows through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ScreenRect {
    /// Left edge in frame pixels.
    pub x: u32,
    /// Top edge in frame pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ScreenRect {
    /// Rectangle bounds in frame pixel space.
    pub fn rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x) + f64::from(self.width),
            f64::from(self.y) + f64::from(self.height),
        )
    }

    /// Cutout size as a canvas.
    pub fn canvas(self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Whether the rectangle has zero area.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether this rectangle lies entirely inside `canvas`.
    pub fn fits_within(self, canvas: Canvas) -> bool {
        let bounds = canvas.rect();
        bounds.union(self.rect()) == bounds
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn contains_rect(self, other: Rect) -> bool {
        let r = self.rect();
        r.union(other) == r
    }
}

/// Uniform scale that makes `inner` fit entirely inside `outer`.
pub fn fit_scale(inner: Canvas, outer: Canvas) -> f64 {
    let (i, o) = (inner.size(), outer.size());
    (o.width / i.width).min(o.height / i.height)
}

/// Uniform scale that makes `inner` cover `outer` on both axes.
pub fn cover_scale(inner: Canvas, outer: Canvas) -> f64 {
    let (i, o) = (inner.size(), outer.size());
    (o.width / i.width).max(o.height / i.height)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
