use std::{
    fs,
    io::{Cursor, Write as _},
    path::Path,
};

use anyhow::Context as _;
use image::RgbaImage;

use crate::foundation::error::DevframeResult;

/// Encode a straight-alpha raster as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> DevframeResult<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> DevframeResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write `image` to `path` as PNG without ever exposing a partial file at `path`.
///
/// Bytes go to a uniquely named hidden sibling first and are renamed into place once
/// complete, so concurrent writers of the same path never share a temporary file. The
/// sibling is removed on failure.
pub fn write_png_atomic(path: &Path, image: &RgbaImage) -> DevframeResult<()> {
    let bytes = encode_png(image)?;
    ensure_parent_dir(path)?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.png".to_string());

    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{name}."))
        .suffix(".partial")
        .tempfile_in(dir)
        .with_context(|| format!("create temporary file in '{}'", dir.display()))?;
    tmp.write_all(&bytes)
        .with_context(|| format!("write '{}'", tmp.path().display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("sync '{}'", tmp.path().display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("move temporary file into place at '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/output/png.rs"]
mod tests;
