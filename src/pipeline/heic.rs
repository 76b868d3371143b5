//! HEIC/HEIF decoding behind a narrow capability seam.
//!
//! The pipeline only needs "decode this container to raster images", so
//! that is the whole trait. The default implementation wraps libheif; tests
//! and embedders with their own decoder inject an alternative through
//! [`crate::config::IntakeConfigBuilder::heic_decoder`].
//!
//! A HEIC container can hold several images (burst shots, live photos), so
//! the trait returns a list; the normalizer uses exactly the first. The
//! built-in decoder yields the container's primary image.

use super::CodecError;
use image::{DynamicImage, RgbImage};
use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};
use tracing::debug;

/// Decode a HEIC/HEIF container into one or more raster images.
pub trait HeicDecoder: Send + Sync {
    fn decode_to_rasters(&self, bytes: &[u8]) -> Result<Vec<DynamicImage>, CodecError>;
}

/// The built-in decoder, backed by libheif.
pub struct LibheifDecoder;

impl HeicDecoder for LibheifDecoder {
    fn decode_to_rasters(&self, bytes: &[u8]) -> Result<Vec<DynamicImage>, CodecError> {
        let lib_heif = LibHeif::new();
        let ctx = HeifContext::read_from_bytes(bytes)
            .map_err(|e| CodecError(format!("heif container read: {e}")))?;

        let count = ctx.number_of_top_level_images();
        if count > 1 {
            debug!("HEIC container holds {count} top-level images; decoding the primary");
        }

        let handle = ctx
            .primary_image_handle()
            .map_err(|e| CodecError(format!("heif primary handle: {e}")))?;
        let decoded = lib_heif
            .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
            .map_err(|e| CodecError(format!("heif decode: {e}")))?;

        Ok(vec![raster_from_interleaved(&decoded)?])
    }
}

/// Copy libheif's interleaved RGB plane into an owned `RgbImage`.
///
/// The plane stride is in bytes and may exceed `width * 3` (row padding),
/// so rows are copied individually rather than in one memcpy.
fn raster_from_interleaved(img: &libheif_rs::Image) -> Result<DynamicImage, CodecError> {
    let planes = img.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| CodecError("heif decode produced no interleaved plane".into()))?;

    let width = plane.width;
    let height = plane.height;
    let stride = plane.stride;
    let row_bytes = width as usize * 3;

    let mut rgb = RgbImage::new(width, height);
    for y in 0..height as usize {
        let start = y * stride;
        let row = plane
            .data
            .get(start..start + row_bytes)
            .ok_or_else(|| CodecError("heif plane shorter than stride layout".into()))?;
        for x in 0..width as usize {
            rgb.put_pixel(
                x as u32,
                y as u32,
                image::Rgb([row[3 * x], row[3 * x + 1], row[3 * x + 2]]),
            );
        }
    }

    Ok(DynamicImage::ImageRgb8(rgb))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_a_codec_error() {
        let err = LibheifDecoder
            .decode_to_rasters(b"definitely not a heif container")
            .unwrap_err();
        assert!(err.0.contains("heif"), "got: {}", err.0);
    }
}
