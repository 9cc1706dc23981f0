//! QR image rendering
//!
//! Encodes a URL as a QR symbol and rasterizes it onto a fixed-size PNG
//! canvas, ready to be served as a download.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Luma, imageops};
use qrcode::{EcLevel, QrCode};

use crate::errors::{Result, ScangateError};

/// Output canvas is a fixed square.
pub const QR_IMAGE_SIZE: u32 = 400;

/// Render `data` as a QR symbol on a 400x400 PNG canvas.
///
/// Error correction level H, so the printed code survives partial damage.
pub fn render_png(data: &str) -> Result<Vec<u8>> {
    let symbol = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H)
        .map_err(|e| ScangateError::qr_render(format!("Failed to encode QR symbol: {}", e)))?;

    let modules = symbol.render::<Luma<u8>>().build();
    let canvas = imageops::resize(
        &modules,
        QR_IMAGE_SIZE,
        QR_IMAGE_SIZE,
        imageops::FilterType::Nearest,
    );

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(
            canvas.as_raw(),
            QR_IMAGE_SIZE,
            QR_IMAGE_SIZE,
            ExtendedColorType::L8,
        )
        .map_err(|e| ScangateError::qr_render(format!("Failed to encode PNG: {}", e)))?;

    Ok(buffer)
}

/// Deterministic download filename for a code's image.
pub fn image_filename(code: &str) -> String {
    format!("{}.png", code)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn test_render_png_produces_png_bytes() {
        let bytes = render_png("https://go.example.com/register/qr_1_abcdefg").unwrap();
        assert!(bytes.len() > PNG_MAGIC.len());
        assert_eq!(&bytes[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_render_png_same_input_same_output() {
        let a = render_png("https://go.example.com/register/x").unwrap();
        let b = render_png("https://go.example.com/register/x").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_image_filename() {
        assert_eq!(image_filename("qr_1_abc"), "qr_1_abc.png");
    }
}
