//! PDF page rendering behind a narrow capability seam.
//!
//! The pipeline only needs "render page N of these bytes to a raster at a
//! scale factor". The default implementation wraps pdfium; the seam exists
//! for the same reason as [`crate::pipeline::heic::HeicDecoder`] — tests
//! inject a fake so the suite never depends on a pdfium binary.
//!
//! pdfium uses thread-local state internally and is not safe to call from
//! async contexts, so the normalizer always invokes a `PageRenderer` from
//! inside `tokio::task::spawn_blocking`.

use super::CodecError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::debug;

/// Render a single page of a PDF document to a raster image.
pub trait PageRenderer: Send + Sync {
    fn render_page(
        &self,
        bytes: &[u8],
        page_index: usize,
        scale: f32,
    ) -> Result<DynamicImage, CodecError>;
}

/// The built-in renderer, backed by pdfium.
pub struct PdfiumRenderer;

impl PageRenderer for PdfiumRenderer {
    fn render_page(
        &self,
        bytes: &[u8],
        page_index: usize,
        scale: f32,
    ) -> Result<DynamicImage, CodecError> {
        let pdfium = Pdfium::default();

        let document = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| CodecError(format!("pdf load: {e:?}")))?;

        let pages = document.pages();
        let total = pages.len() as usize;
        if page_index >= total {
            return Err(CodecError(format!(
                "page {page_index} out of range (document has {total} pages)"
            )));
        }
        debug!("PDF loaded: {} pages, rendering page {}", total, page_index + 1);

        let page = pages
            .get(page_index as u16)
            .map_err(|e| CodecError(format!("pdf page fetch: {e:?}")))?;

        let render_config = PdfRenderConfig::new().scale_page_by_factor(scale);

        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| CodecError(format!("pdf render: {e:?}")))?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} → {}x{} px",
            page_index + 1,
            image.width(),
            image.height()
        );

        Ok(image)
    }
}
