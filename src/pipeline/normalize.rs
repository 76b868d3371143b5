//! Format normalization: any accepted input becomes a JPEG file.
//!
//! Dispatches on the detector's [`InputKind`]:
//!
//! * HEIC — external decoder, first image of the container, JPEG at the
//!   configured photo quality
//! * PDF — first page only at the configured scale, flattened onto white,
//!   JPEG at the (higher) document quality
//! * convertible image — decode at native dimensions, re-encode as JPEG
//! * direct JPEG/PNG — byte-identical passthrough
//!
//! Decoding is CPU-bound, so each converting path runs its codec work under
//! `tokio::task::spawn_blocking`. Codec failures are logged with their full
//! internal detail and surfaced as one generic per-stage error.

use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::pipeline::detect::InputKind;
use crate::pipeline::heic::{HeicDecoder, LibheifDecoder};
use crate::pipeline::input::IntakeFile;
use crate::pipeline::pdf::{PageRenderer, PdfiumRenderer};
use crate::pipeline::raster;
use std::sync::Arc;
use tracing::{debug, warn};

/// The outcome of normalization: what gets previewed and uploaded.
#[derive(Debug, Clone)]
pub struct NormalizedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Normalize a classified file to JPEG (or pass it through untouched).
pub async fn normalize(
    file: &IntakeFile,
    kind: InputKind,
    config: &IntakeConfig,
) -> Result<NormalizedFile, IntakeError> {
    match kind {
        InputKind::DirectImage => {
            debug!("'{}' is already {}, passing through", file.name, file.mime);
            Ok(NormalizedFile {
                name: file.name.clone(),
                mime: file.mime.clone(),
                bytes: file.bytes.clone(),
            })
        }
        InputKind::Heic => normalize_heic(file, config).await,
        InputKind::Pdf => normalize_pdf(file, config).await,
        InputKind::ConvertibleImage => normalize_convertible(file, config).await,
        InputKind::Unsupported => Err(IntakeError::Unsupported {
            name: file.name.clone(),
            mime: file.mime.clone(),
        }),
    }
}

async fn normalize_heic(
    file: &IntakeFile,
    config: &IntakeConfig,
) -> Result<NormalizedFile, IntakeError> {
    let decoder: Arc<dyn HeicDecoder> = config
        .heic_decoder
        .clone()
        .unwrap_or_else(|| Arc::new(LibheifDecoder));
    let bytes = file.bytes.clone();
    let quality = config.jpeg_quality;

    let result = tokio::task::spawn_blocking(move || {
        let rasters = decoder.decode_to_rasters(&bytes)?;
        if rasters.len() > 1 {
            debug!(
                "HEIC container holds {} images; keeping only the first",
                rasters.len()
            );
        }
        let first = rasters
            .into_iter()
            .next()
            .ok_or_else(|| super::CodecError("decoder returned no images".into()))?;
        raster::encode_jpeg(&first, quality)
    })
    .await
    .map_err(|e| IntakeError::Internal(format!("HEIC task panicked: {e}")))?;

    let jpeg = result.map_err(|e| {
        warn!("HEIC conversion failed for '{}': {}", file.name, e);
        IntakeError::HeicConversionFailed
    })?;

    Ok(jpeg_output(&file.name, jpeg))
}

async fn normalize_pdf(
    file: &IntakeFile,
    config: &IntakeConfig,
) -> Result<NormalizedFile, IntakeError> {
    let renderer: Arc<dyn PageRenderer> = config
        .page_renderer
        .clone()
        .unwrap_or_else(|| Arc::new(PdfiumRenderer));
    let bytes = file.bytes.clone();
    let scale = config.pdf_scale;
    let quality = config.pdf_jpeg_quality;

    let result = tokio::task::spawn_blocking(move || {
        // First page only; multi-page documents are reduced by design.
        let page = renderer.render_page(&bytes, 0, scale)?;
        let flattened = raster::flatten_onto_white(&page);
        raster::encode_jpeg(&flattened, quality)
    })
    .await
    .map_err(|e| IntakeError::Internal(format!("PDF task panicked: {e}")))?;

    let jpeg = result.map_err(|e| {
        warn!("PDF conversion failed for '{}': {}", file.name, e);
        IntakeError::PdfConversionFailed
    })?;

    Ok(jpeg_output(&file.name, jpeg))
}

async fn normalize_convertible(
    file: &IntakeFile,
    config: &IntakeConfig,
) -> Result<NormalizedFile, IntakeError> {
    let bytes = file.bytes.clone();
    let quality = config.jpeg_quality;

    let result = tokio::task::spawn_blocking(move || {
        let img = raster::decode(&bytes)?;
        raster::encode_jpeg(&img, quality)
    })
    .await
    .map_err(|e| IntakeError::Internal(format!("Image task panicked: {e}")))?;

    let jpeg = result.map_err(|e| {
        warn!("Image conversion failed for '{}': {}", file.name, e);
        IntakeError::ImageConversionFailed
    })?;

    Ok(jpeg_output(&file.name, jpeg))
}

fn jpeg_output(original_name: &str, bytes: Vec<u8>) -> NormalizedFile {
    NormalizedFile {
        name: jpg_name(original_name),
        mime: "image/jpeg".to_string(),
        bytes,
    }
}

/// Rewrite a filename's extension to `.jpg`, keeping the base name.
fn jpg_name(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => format!("{stem}.jpg"),
        _ => format!("{name}.jpg"),
    }
}
