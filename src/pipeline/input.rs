//! Input resolution: turn a local path into an [`IntakeFile`].
//!
//! The library itself works on in-memory bytes (a dropped file in the
//! widget this models never touches disk), so this module only exists for
//! callers that start from a filesystem path — primarily the CLI. The MIME
//! type is guessed from the extension; the detector re-validates it and
//! never trusts it for HEIC.

use crate::error::IntakeError;
use crate::pipeline::detect;
use std::path::Path;
use tracing::debug;

/// One file handed to the intake pipeline: a display name, the MIME type
/// the picker declared, and the raw bytes.
#[derive(Debug, Clone)]
pub struct IntakeFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl IntakeFile {
    /// Build an intake file from in-memory parts.
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a local file, guessing the MIME type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(IntakeError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                IntakeError::PermissionDenied {
                    path: path.to_path_buf(),
                }
            } else {
                IntakeError::FileNotFound {
                    path: path.to_path_buf(),
                }
            }
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());

        let mime = detect::guess_mime(&name)
            .unwrap_or("application/octet-stream")
            .to_string();

        debug!("Resolved local file: {} ({}, {} bytes)", name, mime, bytes.len());

        Ok(Self { name, mime, bytes })
    }

    /// Size in bytes, as reported to the size guard and the endpoint.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
