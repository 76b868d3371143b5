//! Raster helpers shared by every conversion path: decode arbitrary image
//! bytes, flatten transparency onto white, and JPEG-encode at a quality.

use super::CodecError;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgb, RgbImage};
use tracing::debug;

/// Decode image bytes at their native pixel dimensions.
///
/// Format is sniffed from the bytes, not the filename — a mislabelled
/// extension doesn't matter here. No EXIF-orientation or color-profile
/// correction is applied.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, CodecError> {
    image::load_from_memory(bytes).map_err(|e| CodecError(format!("image decode: {e}")))
}

/// Flatten any transparency onto a solid white background.
///
/// JPEG has no alpha channel; naive conversion of a transparent raster
/// turns see-through regions black. Alpha-blending each pixel against
/// white matches what the page would look like printed on paper.
pub fn flatten_onto_white(img: &DynamicImage) -> DynamicImage {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut out = RgbImage::new(width, height);
    for (x, y, px) in rgba.enumerate_pixels() {
        let a = px[3] as u32;
        let blend = |c: u8| (((c as u32) * a + 255 * (255 - a)) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(px[0]), blend(px[1]), blend(px[2])]));
    }

    DynamicImage::ImageRgb8(out)
}

/// Encode a raster as JPEG at the given quality (1–100).
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, CodecError> {
    // JPEG cannot carry alpha; to_rgb8 drops it (callers that care about
    // the background flatten first).
    let rgb = img.to_rgb8();

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder
        .encode_image(&rgb)
        .map_err(|e| CodecError(format!("jpeg encode: {e}")))?;

    debug!(
        "Encoded {}x{} raster → {} JPEG bytes (q{})",
        rgb.width(),
        rgb.height(),
        buf.len(),
        quality
    );
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn encode_produces_jpeg_magic_bytes() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([200, 10, 10, 255])));
        let bytes = encode_jpeg(&img, 80).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8], "missing JPEG SOI marker");
        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[test]
    fn fully_transparent_flattens_to_white() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0])));
        let flat = flatten_onto_white(&img).to_rgb8();
        for px in flat.pixels() {
            assert_eq!(px.0, [255, 255, 255]);
        }
    }

    #[test]
    fn half_transparent_red_blends_toward_white() {
        let img =
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 128])));
        let flat = flatten_onto_white(&img).to_rgb8();
        let px = flat.get_pixel(0, 0);
        assert_eq!(px[0], 255);
        // Green/blue channels pick up the white background.
        assert!(px[1] > 100 && px[1] < 150, "got: {:?}", px);
    }

    #[test]
    fn opaque_pixels_survive_flattening_unchanged() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([12, 34, 56, 255])));
        let flat = flatten_onto_white(&img).to_rgb8();
        assert_eq!(flat.get_pixel(0, 0).0, [12, 34, 56]);
    }

    #[test]
    fn decode_sniffs_format_from_bytes() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(6, 3, Rgba([1, 2, 3, 255])));
        let mut png = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode(&png).unwrap();
        assert_eq!(decoded.width(), 6);
        assert_eq!(decoded.height(), 3);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode(b"not an image at all").is_err());
    }
}
