//! Upload submission: one multipart POST to the configured endpoint.
//!
//! The body carries the normalized file as the binary `file` part plus four
//! companion text fields describing the original. A 2xx response is
//! success; anything else — or a transport failure — fails the attempt.
//! There is no retry, no chunking, and no progress reporting: the session's
//! `Uploading` state is the whole progress story.

use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::pipeline::input::IntakeFile;
use crate::pipeline::normalize::NormalizedFile;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

/// Environment fallback consulted when the config carries no endpoint.
pub const ENDPOINT_ENV_VAR: &str = "PICFUNNEL_UPLOAD_URL";

/// Resolve the upload endpoint, most-specific first: the config value,
/// then the `PICFUNNEL_UPLOAD_URL` environment variable.
pub fn resolve_endpoint(config: &IntakeConfig) -> Result<String, IntakeError> {
    if let Some(ref url) = config.endpoint {
        return Ok(url.clone());
    }
    if let Ok(url) = std::env::var(ENDPOINT_ENV_VAR) {
        if !url.is_empty() {
            return Ok(url);
        }
    }
    Err(IntakeError::EndpointNotConfigured)
}

/// POST the normalized file to the endpoint.
pub async fn submit(
    client: &reqwest::Client,
    endpoint: &str,
    normalized: &NormalizedFile,
    original: &IntakeFile,
) -> Result<(), IntakeError> {
    let part = Part::bytes(normalized.bytes.clone())
        .file_name(normalized.name.clone())
        .mime_str(&normalized.mime)
        .map_err(|e| IntakeError::Internal(format!("multipart mime: {e}")))?;

    let form = Form::new()
        .part("file", part)
        .text("originalFileName", original.name.clone())
        .text("processedFileName", normalized.name.clone())
        .text("fileType", normalized.mime.clone())
        .text("fileSize", normalized.bytes.len().to_string());

    info!(
        "Uploading '{}' ({} bytes) to {}",
        normalized.name,
        normalized.bytes.len(),
        endpoint
    );

    let response = client
        .post(endpoint)
        .multipart(form)
        .send()
        .await
        .map_err(|e| {
            warn!("Upload transport failure for '{}': {}", normalized.name, e);
            IntakeError::UploadFailed {
                reason: e.to_string(),
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        // The body is diagnostics only; it never changes the error shown.
        let body = response.text().await.unwrap_or_default();
        let snippet: String = body.chars().take(200).collect();
        debug!("Endpoint rejected '{}': {} — {}", normalized.name, status, snippet);
        return Err(IntakeError::UploadRejected {
            status: status.as_u16(),
        });
    }

    debug!("Endpoint accepted '{}': {}", normalized.name, status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_endpoint_wins() {
        let config = IntakeConfig::builder()
            .endpoint("https://uploads.example.com/intake")
            .build()
            .unwrap();
        assert_eq!(
            resolve_endpoint(&config).unwrap(),
            "https://uploads.example.com/intake"
        );
    }

    #[test]
    fn missing_endpoint_is_a_config_error() {
        // Assumes PICFUNNEL_UPLOAD_URL is not set in the test environment.
        let config = IntakeConfig::default();
        let err = resolve_endpoint(&config).unwrap_err();
        assert!(matches!(err, IntakeError::EndpointNotConfigured));
    }
}
