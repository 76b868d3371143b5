//! Session-lifetime records: the preview of the latest processed file and
//! the history of successful uploads.
//!
//! A [`HistoryEntry`] is created if and only if an upload attempt reached
//! the success transition, and is never mutated afterwards. Nothing here is
//! persisted — the history lives and dies with the session, matching the
//! page-session lifetime of the widget this models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One successfully uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique per entry; two uploads of the same file get distinct ids.
    pub id: Uuid,
    /// Display filename of the normalized file, e.g. `photo.jpg`.
    pub file_name: String,
    /// Inline-displayable `data:` URI of the uploaded JPEG.
    pub preview: String,
    /// When the upload succeeded.
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub(crate) fn new(file_name: impl Into<String>, preview: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            preview: preview.into(),
            created_at: Utc::now(),
        }
    }
}

/// The most recent processed file, independent of upload outcome.
///
/// Replaced or cleared at the start of every new intake attempt, so a
/// failed attempt can never show a stale preview from an earlier run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRecord {
    /// Filename of the normalized file.
    pub file_name: String,
    /// MIME type of the normalized file (`image/jpeg` unless passthrough).
    pub mime: String,
    /// `data:{mime};base64,...` representation for inline display.
    pub data_uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_get_unique_ids() {
        let a = HistoryEntry::new("a.jpg", "data:image/jpeg;base64,AA==");
        let b = HistoryEntry::new("a.jpg", "data:image/jpeg;base64,AA==");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn entry_serialises_with_all_fields() {
        let e = HistoryEntry::new("photo.jpg", "data:image/jpeg;base64,AA==");
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("photo.jpg"));
        assert!(json.contains("created_at"));
        assert!(json.contains(&e.id.to_string()));
    }
}
