//! Preview construction: normalized bytes → base64 data URI.
//!
//! The preview must exist before the upload stage starts (the widget shows
//! it pre-upload), so this runs between normalization and submission. One
//! preview per attempt, no caching.

use super::CodecError;
use crate::pipeline::normalize::NormalizedFile;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

/// Build a `data:` URI for inline display of a normalized file.
///
/// An empty payload is refused: once decoding has succeeded the only way to
/// end up here with zero bytes is a broken codec, and a blank preview would
/// silently paper over that.
pub fn build(file: &NormalizedFile) -> Result<String, CodecError> {
    if file.bytes.is_empty() {
        return Err(CodecError(format!(
            "normalized file '{}' is empty",
            file.name
        )));
    }

    let b64 = STANDARD.encode(&file.bytes);
    debug!("Encoded preview for '{}' → {} bytes base64", file.name, b64.len());

    Ok(format!("data:{};base64,{}", file.mime, b64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_has_mime_and_payload() {
        let file = NormalizedFile {
            name: "a.jpg".into(),
            mime: "image/jpeg".into(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        };
        let uri = build(&file).unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        let payload = uri.split_once(',').unwrap().1;
        assert_eq!(STANDARD.decode(payload).unwrap(), file.bytes);
    }

    #[test]
    fn empty_payload_is_refused() {
        let file = NormalizedFile {
            name: "a.jpg".into(),
            mime: "image/jpeg".into(),
            bytes: Vec::new(),
        };
        assert!(build(&file).is_err());
    }
}
