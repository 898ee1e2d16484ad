//! Asset photos: image file to `data:` URL for `PUT /assets/{id}/image`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use base64::Engine;

/// Default upper bound for an uploaded photo.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Sniff the image type from its leading bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else {
        None
    }
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Read `path` and encode it as a data URL, refusing files over `max_bytes`.
pub fn load_data_url(path: &Path, max_bytes: u64) -> Result<String> {
    let meta = std::fs::metadata(path)
        .with_context(|| format!("stat image: {}", path.display()))?;
    if !meta.is_file() {
        bail!("not a file: {}", path.display());
    }
    if meta.len() > max_bytes {
        bail!(
            "image too large: {} is {} bytes (limit {})",
            path.display(),
            meta.len(),
            max_bytes
        );
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("read image: {}", path.display()))?;
    let Some(mime) = sniff_mime(&bytes).or_else(|| mime_from_extension(path)) else {
        bail!("unsupported image type: {}", path.display());
    };
    tracing::debug!(mime, bytes = bytes.len(), "encoded photo");
    Ok(to_data_url(mime, &bytes))
}
