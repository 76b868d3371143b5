//! Error types for the picfunnel library.
//!
//! One enum covers the whole intake attempt. Every variant maps to exactly
//! one stage of the pipeline, so a failing attempt always surfaces a single,
//! short, user-readable message — the `Display` text is what an end user
//! sees, while the underlying cause (a decoder's internal error, an HTTP
//! body) goes to the `tracing` log only.
//!
//! The conversion variants deliberately carry **no** payload: libheif,
//! pdfium, and the image crate produce error strings full of library
//! internals that mean nothing to the person who just dropped a photo.
//! Those strings are logged at `warn` level where the failure happens.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the picfunnel library.
#[derive(Debug, Error)]
pub enum IntakeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exceeds the configured size limit; nothing was converted.
    #[error("File is too large: {size} bytes exceeds the {limit}-byte limit.\nPick a smaller file or raise max_input_bytes.")]
    Oversize { size: u64, limit: u64 },

    /// Neither an image, a HEIC/HEIF photo, nor a PDF.
    #[error("Unsupported file type '{mime}' for '{name}'.\nAccepted: images (image/*), HEIC/HEIF photos, and PDF documents.")]
    Unsupported { name: String, mime: String },

    // ── Conversion errors ─────────────────────────────────────────────────
    /// The HEIC decoder failed; the cause is in the log.
    #[error("Could not convert the HEIC photo. The file may be damaged or use an unsupported variant.")]
    HeicConversionFailed,

    /// PDF load, page fetch, render, or encode failed; the cause is in the log.
    #[error("Could not convert the PDF. The file may be damaged or password-protected.")]
    PdfConversionFailed,

    /// Decoding or re-encoding a raster image failed; the cause is in the log.
    #[error("Could not convert the image. The file may be damaged or use an unsupported encoding.")]
    ImageConversionFailed,

    /// The normalized file produced no displayable preview.
    #[error("Could not build a preview for '{name}'")]
    PreviewFailed { name: String },

    // ── Upload errors ─────────────────────────────────────────────────────
    /// No endpoint in the config and no environment fallback.
    #[error("No upload endpoint is configured.\nSet IntakeConfig::endpoint or the PICFUNNEL_UPLOAD_URL environment variable.")]
    EndpointNotConfigured,

    /// The endpoint answered with a non-2xx status.
    #[error("Upload rejected by the endpoint: HTTP {status}")]
    UploadRejected { status: u16 },

    /// The request never completed (DNS, connect, timeout, TLS, ...).
    #[error("Upload failed: {reason}\nCheck your network connection and the endpoint URL.")]
    UploadFailed { reason: String },

    // ── Session errors ────────────────────────────────────────────────────
    /// A second submit arrived while the previous attempt was still running.
    #[error("An intake attempt is already in progress; wait for it to finish")]
    AttemptInProgress,

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversize_display_names_both_sizes() {
        let e = IntakeError::Oversize {
            size: 15_728_640,
            limit: 10_485_760,
        };
        let msg = e.to_string();
        assert!(msg.contains("15728640"), "got: {msg}");
        assert!(msg.contains("10485760"), "got: {msg}");
    }

    #[test]
    fn unsupported_display_names_file_and_mime() {
        let e = IntakeError::Unsupported {
            name: "notes.txt".into(),
            mime: "text/plain".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.txt"));
        assert!(msg.contains("text/plain"));
    }

    #[test]
    fn conversion_errors_leak_no_internals() {
        for e in [
            IntakeError::HeicConversionFailed,
            IntakeError::PdfConversionFailed,
            IntakeError::ImageConversionFailed,
        ] {
            let msg = e.to_string();
            assert!(!msg.contains("libheif"), "got: {msg}");
            assert!(!msg.contains("pdfium"), "got: {msg}");
            assert!(msg.starts_with("Could not convert"), "got: {msg}");
        }
    }

    #[test]
    fn endpoint_not_configured_mentions_env_var() {
        let msg = IntakeError::EndpointNotConfigured.to_string();
        assert!(msg.contains("PICFUNNEL_UPLOAD_URL"));
    }

    #[test]
    fn upload_rejected_display() {
        let e = IntakeError::UploadRejected { status: 500 };
        assert!(e.to_string().contains("500"));
    }
}
