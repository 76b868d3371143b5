//! Pipeline stages for one intake attempt.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different HEIC decoder) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ detect ──▶ normalize ──▶ preview ──▶ upload
//! (path/bytes) (kind)  (JPEG bytes)  (data URI)  (multipart POST)
//! ```
//!
//! 1. [`input`]     — resolve a local path into an [`input::IntakeFile`]
//! 2. [`detect`]    — classify by extension and MIME; extension wins for HEIC
//! 3. [`normalize`] — produce JPEG bytes via [`heic`], [`pdf`], or [`raster`];
//!    runs under `spawn_blocking` because decoding is CPU-bound
//! 4. [`preview`]   — base64 data URI for inline display
//! 5. [`upload`]    — the only stage with network I/O

pub mod detect;
pub mod heic;
pub mod input;
pub mod normalize;
pub mod pdf;
pub mod preview;
pub mod raster;
pub mod upload;

use thiserror::Error;

/// Failure detail from a codec implementation.
///
/// Carries the library-internal cause for the log; the user-facing message
/// is always one of the generic conversion variants in
/// [`crate::error::IntakeError`].
#[derive(Debug, Error)]
#[error("{0}")]
pub struct CodecError(pub String);
