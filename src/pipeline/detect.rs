//! Format detection: classify an input by filename extension and MIME type.
//!
//! The `.heic`/`.heif` extension wins over any declared MIME type because
//! browsers and file pickers routinely report HEIC files as
//! `application/octet-stream` or an empty string — the extension is the
//! only reliable signal. Everything else goes by MIME.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Classification of one input file. Pure function of name + MIME, so
/// classifying the same file twice always yields the same category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    /// HEIC/HEIF container; needs the external decoder.
    Heic,
    /// PDF document; first page gets rendered.
    Pdf,
    /// JPEG or PNG; passed through untouched.
    DirectImage,
    /// Any other `image/*`; re-encoded to JPEG.
    ConvertibleImage,
    /// Not an accepted input; terminal error before any conversion.
    Unsupported,
}

/// Classify a file by its name and declared MIME type.
pub fn classify(name: &str, mime: &str) -> InputKind {
    if has_heic_extension(name) {
        return InputKind::Heic;
    }
    if mime == "application/pdf" {
        return InputKind::Pdf;
    }
    if mime == "image/jpeg" || mime == "image/png" {
        return InputKind::DirectImage;
    }
    if mime.starts_with("image/") {
        return InputKind::ConvertibleImage;
    }
    InputKind::Unsupported
}

/// True for `.heic`/`.heif` filenames, case-insensitive.
pub fn has_heic_extension(name: &str) -> bool {
    matches!(
        extension_of(name).as_deref(),
        Some("heic") | Some("heif")
    )
}

/// Lowercased extension of a filename, if any.
fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

static EXTENSION_MIME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("jpg", "image/jpeg"),
        ("jpeg", "image/jpeg"),
        ("png", "image/png"),
        ("gif", "image/gif"),
        ("bmp", "image/bmp"),
        ("webp", "image/webp"),
        ("tif", "image/tiff"),
        ("tiff", "image/tiff"),
        ("heic", "image/heic"),
        ("heif", "image/heif"),
        ("pdf", "application/pdf"),
    ])
});

/// Guess a MIME type from a filename, for callers (the CLI) that only have
/// a path. The detector itself never trusts this for HEIC.
pub fn guess_mime(name: &str) -> Option<&'static str> {
    extension_of(name).and_then(|ext| EXTENSION_MIME.get(ext.as_str()).copied())
}
