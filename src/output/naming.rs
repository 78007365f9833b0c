use url::Url;

use crate::config::model::DeviceVariant;

/// Fallback stem when a page URL has no usable host.
pub const DEFAULT_STEM: &str = "screenshot";

/// Filesystem-safe stem derived from a page URL's host.
///
/// `www.` is dropped, anything outside `[a-z0-9]` becomes `-`, and the result is lowercased.
/// Scheme-less input is treated as `https://`.
pub fn domain_stem(page_url: &str) -> String {
    let trimmed = page_url.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let Some(host) = Url::parse(&with_scheme)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
    else {
        return DEFAULT_STEM.to_string();
    };

    let host = host.strip_prefix("www.").unwrap_or(&host);
    let stem: String = host
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    if stem.is_empty() {
        DEFAULT_STEM.to_string()
    } else {
        stem
    }
}

/// `<domain>-<device>.png` for a capture of `page_url` framed as `device`.
pub fn output_file_name(page_url: Option<&str>, device: DeviceVariant) -> String {
    let stem = page_url.map_or_else(|| DEFAULT_STEM.to_string(), domain_stem);
    format!("{stem}-{device}.png")
}

#[cfg(test)]
#[path = "../../tests/unit/output/naming.rs"]
mod tests;
