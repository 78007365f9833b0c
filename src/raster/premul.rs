use image::{GrayImage, RgbaImage, imageops::FilterType};
use rayon::prelude::*;

use crate::foundation::{
    core::Canvas,
    error::{DevframeError, DevframeResult},
};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Resampling filter used for every resize in the engine.
pub(crate) const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Raster in premultiplied RGBA8, row-major, tightly packed.
///
/// All intermediate compositing happens in premultiplied space; conversion back to straight
/// alpha only happens at the PNG boundary.
pub struct PremulImage {
    buf: RgbaImage,
}

impl PremulImage {
    /// Premultiply a straight-alpha raster.
    pub fn from_straight(mut img: RgbaImage) -> Self {
        premultiply_rgba8_in_place(&mut img);
        Self { buf: img }
    }

    /// Convert back to straight alpha.
    pub fn into_straight(self) -> RgbaImage {
        let mut img = self.buf;
        unpremultiply_rgba8_in_place(&mut img);
        img
    }

    /// Canvas filled with one straight-alpha color.
    pub fn solid(canvas: Canvas, rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba;
        let px = [mul_div255(r, a), mul_div255(g, a), mul_div255(b, a), a];
        Self {
            buf: RgbaImage::from_pixel(canvas.width, canvas.height, image::Rgba(px)),
        }
    }

    /// Fully transparent canvas.
    pub fn transparent(canvas: Canvas) -> Self {
        Self::solid(canvas, [0, 0, 0, 0])
    }

    /// Pixel dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.buf.width(),
            height: self.buf.height(),
        }
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> PremulRgba8 {
        self.buf.get_pixel(x, y).0
    }

    /// Raw premultiplied bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.buf.as_raw()
    }

    /// Resample to exactly `size`.
    pub fn resize_exact(&self, size: Canvas) -> Self {
        if self.canvas() == size {
            return self.clone();
        }
        let mut buf = image::imageops::resize(&self.buf, size.width, size.height, RESIZE_FILTER);
        // Lanczos ringing can push color above alpha.
        clamp_premul_in_place(&mut buf);
        Self { buf }
    }

    /// Copy out the `size` region whose top-left corner is `(x, y)`.
    pub fn crop(&self, x: u32, y: u32, size: Canvas) -> DevframeResult<Self> {
        let c = self.canvas();
        if u64::from(x) + u64::from(size.width) > u64::from(c.width)
            || u64::from(y) + u64::from(size.height) > u64::from(c.height)
        {
            return Err(DevframeError::validation(format!(
                "crop {}x{}+{x}+{y} exceeds raster {}x{}",
                size.width, size.height, c.width, c.height
            )));
        }
        let buf = image::imageops::crop_imm(&self.buf, x, y, size.width, size.height).to_image();
        Ok(Self { buf })
    }

    /// Draw `src` with its top-left corner at `(left, top)` using source-over blending.
    ///
    /// Parts of `src` outside this raster are clipped.
    pub fn draw_over(&mut self, src: &PremulImage, left: i64, top: i64) {
        let dst = self.canvas();
        let s = src.canvas();

        let x0 = left.max(0);
        let y0 = top.max(0);
        let x1 = (left + i64::from(s.width)).min(i64::from(dst.width));
        let y1 = (top + i64::from(s.height)).min(i64::from(dst.height));
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let dst_stride = dst.width as usize * 4;
        let src_stride = s.width as usize * 4;
        let span = (x1 - x0) as usize * 4;
        let dst_x = x0 as usize * 4;
        let src_x = (x0 - left) as usize * 4;
        let src_raw = src.buf.as_raw();

        self.buf
            .par_chunks_exact_mut(dst_stride)
            .enumerate()
            .skip(y0 as usize)
            .take((y1 - y0) as usize)
            .for_each(|(y, row)| {
                let sy = (y as i64 - top) as usize;
                let src_row = &src_raw[sy * src_stride + src_x..sy * src_stride + src_x + span];
                for (d, s) in row[dst_x..dst_x + span]
                    .chunks_exact_mut(4)
                    .zip(src_row.chunks_exact(4))
                {
                    let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
                    d.copy_from_slice(&out);
                }
            });
    }

    /// Keep this raster only where `mask` is opaque (destination-in).
    pub fn mask_dest_in(&mut self, mask: &GrayImage) -> DevframeResult<()> {
        let c = self.canvas();
        if mask.dimensions() != (c.width, c.height) {
            return Err(DevframeError::composition(
                "apply corner mask",
                format!(
                    "mask is {}x{}, raster is {}x{}",
                    mask.width(),
                    mask.height(),
                    c.width,
                    c.height
                ),
            ));
        }
        self.buf
            .par_chunks_exact_mut(4)
            .zip(mask.as_raw().par_iter())
            .for_each(|(px, &m)| {
                for v in px.iter_mut() {
                    *v = mul_div255(*v, m);
                }
            });
        Ok(())
    }
}

/// Porter-Duff source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }
    let inv = 255 - src[3];
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(dst[i], inv));
    }
    out
}

fn mul_div255(x: u8, y: u8) -> u8 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u8
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    rgba.par_chunks_exact_mut(4).for_each(|px| {
        let a = px[3];
        px[0] = mul_div255(px[0], a);
        px[1] = mul_div255(px[1], a);
        px[2] = mul_div255(px[2], a);
    });
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    rgba.par_chunks_exact_mut(4).for_each(|px| {
        let a = u32::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            return;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    });
}

fn clamp_premul_in_place(rgba: &mut [u8]) {
    rgba.par_chunks_exact_mut(4).for_each(|px| {
        let a = px[3];
        for c in &mut px[..3] {
            *c = (*c).min(a);
        }
    });
}

#[cfg(test)]
#[path = "../../tests/unit/raster/premul.rs"]
mod tests;
