//! # picfunnel
//!
//! Normalise images, HEIC photos, and PDF scans to JPEG and forward them to
//! an upload endpoint.
//!
//! ## Why this crate?
//!
//! Upload endpoints want one predictable format; users drop whatever their
//! phone or scanner produced. HEIC needs an external decoder, PDFs need a
//! renderer, and everything else needs a re-encode — picfunnel funnels all
//! of it through one pipeline that ends in a JPEG, a displayable preview,
//! and a multipart POST, with a small state machine tracking the attempt.
//!
//! ## Pipeline Overview
//!
//! ```text
//! file
//!  │
//!  ├─ 1. Detect     extension/MIME classification (HEIC wins by extension)
//!  ├─ 2. Normalize  HEIC → libheif · PDF page 1 → pdfium · raster → re-encode
//!  ├─ 3. Preview    JPEG → base64 data URI
//!  ├─ 4. Upload     multipart POST (file + original metadata fields)
//!  └─ 5. Record     prepend a history entry on success
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use picfunnel::{IntakeConfig, IntakeFile, IntakeSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = IntakeConfig::builder()
//!         .endpoint("https://uploads.example.com/intake")
//!         .build()?;
//!     let mut session = IntakeSession::new(config)?;
//!
//!     let entry = session.submit(IntakeFile::from_path("photo.heic")?).await?;
//!     println!("uploaded {} at {}", entry.file_name, entry.created_at);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `picfunnel` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! picfunnel = { version = "0.3", default-features = false }
//! ```
//!
//! ## Scope
//!
//! One attempt at a time, no retries, no resume, no cancellation: the
//! session rejects a second submit while one is running, and a failed
//! attempt is reported and forgotten. Multi-page PDFs are reduced to their
//! first page by design. Nothing is persisted — history lives as long as
//! the session does.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod history;
pub mod observer;
pub mod pipeline;
pub mod session;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{IntakeConfig, IntakeConfigBuilder, DEFAULT_MAX_INPUT_BYTES};
pub use error::IntakeError;
pub use history::{HistoryEntry, PreviewRecord};
pub use observer::{IntakeObserver, NoopObserver, Observer};
pub use pipeline::detect::InputKind;
pub use pipeline::heic::{HeicDecoder, LibheifDecoder};
pub use pipeline::input::IntakeFile;
pub use pipeline::normalize::NormalizedFile;
pub use pipeline::pdf::{PageRenderer, PdfiumRenderer};
pub use session::{IntakeSession, IntakeStatus};
