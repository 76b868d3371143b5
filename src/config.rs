//! Configuration for an intake session.
//!
//! Every knob lives in [`IntakeConfig`], built via its
//! [`IntakeConfigBuilder`]. Keeping the whole behaviour of a session in one
//! struct makes it trivial to log, to share with a spawned blocking task,
//! and to diff two runs to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! Callers set only what they care about and rely on documented defaults
//! for the rest. The builder also gives the codec seams a home: tests (and
//! embedders with their own decoders) inject a [`HeicDecoder`] or
//! [`PageRenderer`] here instead of linking libheif/pdfium.

use crate::error::IntakeError;
use crate::observer::IntakeObserver;
use crate::pipeline::heic::HeicDecoder;
use crate::pipeline::pdf::PageRenderer;
use std::fmt;
use std::sync::Arc;

/// Default size guard: 10 MiB, checked before any conversion stage runs.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

/// Configuration for an [`crate::session::IntakeSession`].
///
/// Built via [`IntakeConfig::builder()`] or [`IntakeConfig::default()`].
///
/// # Example
/// ```rust
/// use picfunnel::IntakeConfig;
///
/// let config = IntakeConfig::builder()
///     .endpoint("https://uploads.example.com/intake")
///     .jpeg_quality(80)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct IntakeConfig {
    /// Maximum accepted input size in bytes. Default: 10 MiB.
    ///
    /// Checked before any decode work starts. HEIC and PDF decoding hold
    /// the fully decoded raster in memory, so an unbounded input would let
    /// a single drop exhaust the process; 10 MiB covers every phone photo
    /// and typical scanned document while keeping decode latency sane.
    pub max_input_bytes: u64,

    /// JPEG quality (1–100) for HEIC and convertible-image output. Default: 80.
    pub jpeg_quality: u8,

    /// JPEG quality (1–100) for rendered PDF pages. Default: 95.
    ///
    /// Rendered text tolerates JPEG artefacts far worse than photographs,
    /// so PDF pages are encoded at a higher quality than camera input.
    pub pdf_jpeg_quality: u8,

    /// Scale factor applied when rendering the first PDF page. Default: 2.0.
    ///
    /// 2× of the page's native point size keeps small print legible in the
    /// preview without producing posters: an A4 page lands around
    /// 1190 × 1684 px.
    pub pdf_scale: f32,

    /// Upload endpoint URL. If `None`, the `PICFUNNEL_UPLOAD_URL`
    /// environment variable is consulted at upload time.
    pub endpoint: Option<String>,

    /// Timeout for the upload POST in seconds. Default: 60.
    pub upload_timeout_secs: u64,

    /// How long the session lingers in `Success` before returning to
    /// `Idle`, in milliseconds. Default: 1500. Tests set 0.
    pub success_linger_ms: u64,

    /// Pluggable HEIC decoder. `None` uses the built-in libheif decoder.
    pub heic_decoder: Option<Arc<dyn HeicDecoder>>,

    /// Pluggable PDF page renderer. `None` uses the built-in pdfium renderer.
    pub page_renderer: Option<Arc<dyn PageRenderer>>,

    /// Status observer notified on every state transition. `None` is a no-op.
    pub observer: Option<Arc<dyn IntakeObserver>>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            jpeg_quality: 80,
            pdf_jpeg_quality: 95,
            pdf_scale: 2.0,
            endpoint: None,
            upload_timeout_secs: 60,
            success_linger_ms: 1500,
            heic_decoder: None,
            page_renderer: None,
            observer: None,
        }
    }
}

impl fmt::Debug for IntakeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntakeConfig")
            .field("max_input_bytes", &self.max_input_bytes)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("pdf_jpeg_quality", &self.pdf_jpeg_quality)
            .field("pdf_scale", &self.pdf_scale)
            .field("endpoint", &self.endpoint)
            .field("upload_timeout_secs", &self.upload_timeout_secs)
            .field("success_linger_ms", &self.success_linger_ms)
            .field(
                "heic_decoder",
                &self.heic_decoder.as_ref().map(|_| "<dyn HeicDecoder>"),
            )
            .field(
                "page_renderer",
                &self.page_renderer.as_ref().map(|_| "<dyn PageRenderer>"),
            )
            .field("observer", &self.observer.as_ref().map(|_| "<dyn IntakeObserver>"))
            .finish()
    }
}

impl IntakeConfig {
    /// Create a new builder for `IntakeConfig`.
    pub fn builder() -> IntakeConfigBuilder {
        IntakeConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`IntakeConfig`].
#[derive(Debug)]
pub struct IntakeConfigBuilder {
    config: IntakeConfig,
}

impl IntakeConfigBuilder {
    pub fn max_input_bytes(mut self, bytes: u64) -> Self {
        self.config.max_input_bytes = bytes.max(1);
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn pdf_jpeg_quality(mut self, quality: u8) -> Self {
        self.config.pdf_jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn pdf_scale(mut self, scale: f32) -> Self {
        self.config.pdf_scale = scale.clamp(0.25, 8.0);
        self
    }

    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = Some(url.into());
        self
    }

    pub fn upload_timeout_secs(mut self, secs: u64) -> Self {
        self.config.upload_timeout_secs = secs.max(1);
        self
    }

    pub fn success_linger_ms(mut self, ms: u64) -> Self {
        self.config.success_linger_ms = ms;
        self
    }

    pub fn heic_decoder(mut self, decoder: Arc<dyn HeicDecoder>) -> Self {
        self.config.heic_decoder = Some(decoder);
        self
    }

    pub fn page_renderer(mut self, renderer: Arc<dyn PageRenderer>) -> Self {
        self.config.page_renderer = Some(renderer);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn IntakeObserver>) -> Self {
        self.config.observer = Some(observer);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<IntakeConfig, IntakeError> {
        let c = &self.config;
        if c.jpeg_quality == 0 || c.jpeg_quality > 100 {
            return Err(IntakeError::InvalidConfig(format!(
                "jpeg_quality must be 1–100, got {}",
                c.jpeg_quality
            )));
        }
        if c.pdf_jpeg_quality == 0 || c.pdf_jpeg_quality > 100 {
            return Err(IntakeError::InvalidConfig(format!(
                "pdf_jpeg_quality must be 1–100, got {}",
                c.pdf_jpeg_quality
            )));
        }
        if !c.pdf_scale.is_finite() || c.pdf_scale <= 0.0 {
            return Err(IntakeError::InvalidConfig(format!(
                "pdf_scale must be a positive number, got {}",
                c.pdf_scale
            )));
        }
        if let Some(ref url) = c.endpoint {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(IntakeError::InvalidConfig(format!(
                    "endpoint must be an HTTP/HTTPS URL, got '{url}'"
                )));
            }
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = IntakeConfig::default();
        assert_eq!(c.max_input_bytes, 10 * 1024 * 1024);
        assert_eq!(c.jpeg_quality, 80);
        assert_eq!(c.pdf_jpeg_quality, 95);
        assert_eq!(c.pdf_scale, 2.0);
        assert_eq!(c.success_linger_ms, 1500);
        assert!(c.endpoint.is_none());
    }

    #[test]
    fn builder_clamps_quality_and_scale() {
        let c = IntakeConfig::builder()
            .jpeg_quality(0)
            .pdf_jpeg_quality(250)
            .pdf_scale(100.0)
            .build()
            .unwrap();
        assert_eq!(c.jpeg_quality, 1);
        assert_eq!(c.pdf_jpeg_quality, 100);
        assert_eq!(c.pdf_scale, 8.0);
    }

    #[test]
    fn builder_rejects_non_http_endpoint() {
        let err = IntakeConfig::builder()
            .endpoint("ftp://example.com/up")
            .build()
            .unwrap_err();
        assert!(matches!(err, IntakeError::InvalidConfig(_)));
    }

    #[test]
    fn debug_impl_skips_dyn_fields() {
        let dbg = format!("{:?}", IntakeConfig::default());
        assert!(dbg.contains("max_input_bytes"));
        assert!(!dbg.contains("panicked"));
    }
}
