//! The intake state machine: one session, strictly sequential attempts.
//!
//! A session owns the status, the latest preview, the retained error
//! message, and the upload history, and exposes them through read-only
//! accessors — child views project this state, they never mutate it.
//!
//! ## The state walk
//!
//! ```text
//!        ┌────────────────────────────────────────────┐
//!        ▼                                            │
//!      Idle ──▶ Processing ──▶ Uploading ──▶ Success ─┘ (after linger)
//!                   │              │
//!                   └──▶ Error ◀──┘   (message retained until next attempt)
//! ```
//!
//! Transitions within one `submit` call are strictly sequential; each stage
//! awaits the previous stage's output. There is no queue across attempts —
//! `submit` takes `&mut self`, and a session shared behind a lock gets
//! [`IntakeError::AttemptInProgress`] instead of queuing. No cancellation:
//! once an attempt starts it runs to success or failure.

use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::history::{HistoryEntry, PreviewRecord};
use crate::pipeline::input::IntakeFile;
use crate::pipeline::{detect, normalize, preview, upload};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// The session's single active status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeStatus {
    Idle,
    Processing,
    Uploading,
    Success,
    Error,
}

/// One intake session: state machine plus history, living for the lifetime
/// of the owning surface (a page session in the widget this models).
pub struct IntakeSession {
    config: IntakeConfig,
    client: reqwest::Client,
    status: IntakeStatus,
    preview: Option<PreviewRecord>,
    last_error: Option<String>,
    history: Vec<HistoryEntry>,
}

impl IntakeSession {
    /// Create a session. The HTTP client is built once and reused across
    /// attempts for connection pooling.
    pub fn new(config: IntakeConfig) -> Result<Self, IntakeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upload_timeout_secs))
            .build()
            .map_err(|e| IntakeError::Internal(format!("http client: {e}")))?;

        Ok(Self {
            config,
            client,
            status: IntakeStatus::Idle,
            preview: None,
            last_error: None,
            history: Vec::new(),
        })
    }

    /// Current status.
    pub fn status(&self) -> IntakeStatus {
        self.status
    }

    /// Preview of the most recent processed file, independent of upload
    /// outcome.
    pub fn preview(&self) -> Option<&PreviewRecord> {
        self.preview.as_ref()
    }

    /// Human-readable message of the last failed attempt, retained until
    /// the next attempt starts.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Successful uploads, newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Run one intake attempt: detect → normalize → preview → upload.
    ///
    /// On success the returned entry is also at the front of
    /// [`history`](Self::history) and the session lingers in `Success` for
    /// the configured delay before returning to `Idle`. On any failure the
    /// session moves to `Error`, retains the message, and the remainder of
    /// the attempt is abandoned immediately.
    pub async fn submit(&mut self, file: IntakeFile) -> Result<HistoryEntry, IntakeError> {
        if matches!(
            self.status,
            IntakeStatus::Processing | IntakeStatus::Uploading
        ) {
            return Err(IntakeError::AttemptInProgress);
        }

        // A new attempt owns the slate: previous error and preview go away
        // so nothing stale gets attributed to this attempt.
        self.last_error = None;
        self.preview = None;
        self.set_status(IntakeStatus::Processing);
        info!("Intake attempt started: '{}' ({})", file.name, file.mime);

        match self.run_attempt(file).await {
            Ok(entry) => {
                if let Some(ref obs) = self.config.observer {
                    obs.on_history_recorded(&entry);
                }
                self.set_status(IntakeStatus::Success);
                if self.config.success_linger_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(self.config.success_linger_ms)).await;
                }
                self.set_status(IntakeStatus::Idle);
                Ok(entry)
            }
            Err(e) => {
                warn!("Intake attempt failed: {e}");
                self.last_error = Some(e.to_string());
                self.set_status(IntakeStatus::Error);
                Err(e)
            }
        }
    }

    async fn run_attempt(&mut self, file: IntakeFile) -> Result<HistoryEntry, IntakeError> {
        // Size guard comes first: nothing over the limit is worth decoding.
        if file.size() > self.config.max_input_bytes {
            return Err(IntakeError::Oversize {
                size: file.size(),
                limit: self.config.max_input_bytes,
            });
        }

        let kind = detect::classify(&file.name, &file.mime);
        if kind == detect::InputKind::Unsupported {
            return Err(IntakeError::Unsupported {
                name: file.name.clone(),
                mime: file.mime.clone(),
            });
        }

        let normalized = normalize::normalize(&file, kind, &self.config).await?;

        // The preview must exist before the upload starts; it stays around
        // whatever the upload outcome.
        let data_uri = preview::build(&normalized).map_err(|e| {
            warn!("Preview build failed for '{}': {}", normalized.name, e);
            IntakeError::PreviewFailed {
                name: normalized.name.clone(),
            }
        })?;
        self.preview = Some(PreviewRecord {
            file_name: normalized.name.clone(),
            mime: normalized.mime.clone(),
            data_uri: data_uri.clone(),
        });

        self.set_status(IntakeStatus::Uploading);
        let endpoint = upload::resolve_endpoint(&self.config)?;
        upload::submit(&self.client, &endpoint, &normalized, &file).await?;

        let entry = HistoryEntry::new(normalized.name, data_uri);
        self.history.insert(0, entry.clone());
        info!("Intake attempt succeeded: '{}'", entry.file_name);
        Ok(entry)
    }

    /// Manually return the session to `Idle`, dropping the retained error
    /// and preview. History is kept — entries only exist for uploads that
    /// actually succeeded. Does nothing while an attempt is running.
    pub fn reset(&mut self) {
        if matches!(
            self.status,
            IntakeStatus::Processing | IntakeStatus::Uploading
        ) {
            return;
        }
        self.last_error = None;
        self.preview = None;
        self.set_status(IntakeStatus::Idle);
    }

    fn set_status(&mut self, status: IntakeStatus) {
        self.status = status;
        if let Some(ref obs) = self.config.observer {
            obs.on_status(status);
        }
    }
}
