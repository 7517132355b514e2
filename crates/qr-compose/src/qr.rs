//! QR symbol encoding and rasterization.

use image::{GrayImage, Luma, imageops::FilterType};
use qrcode::{Color, EcLevel, QrCode};
use tracing::debug;

use crate::ComposeError;

/// Encode `payload` and rasterize it black-on-white.
///
/// The smallest symbol version that fits the payload at the `H`
/// error-correction tier is selected automatically; encoding mode
/// (numeric/alphanumeric/byte) is picked by the encoder. An empty payload
/// is accepted and yields a minimal version-1 symbol.
///
/// The result is `module_px` pixels per module plus a `quiet_zone`-module
/// white border on every side.
pub fn rasterize(
    payload: &str,
    module_px: u32,
    quiet_zone: u32,
) -> Result<GrayImage, ComposeError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    let module_px = module_px.max(1);
    let side = (module_count + 2 * quiet_zone) * module_px;
    let mut img = GrayImage::from_pixel(side, side, Luma([255u8]));

    debug!(
        version = ?code.version(),
        module_count,
        side,
        "Rasterized QR symbol"
    );

    for (i, color) in modules.iter().enumerate() {
        if *color == Color::Dark {
            let x0 = ((i as u32) % module_count + quiet_zone) * module_px;
            let y0 = ((i as u32) / module_count + quiet_zone) * module_px;
            for dy in 0..module_px {
                for dx in 0..module_px {
                    img.put_pixel(x0 + dx, y0 + dy, Luma([0u8]));
                }
            }
        }
    }

    Ok(img)
}

/// Rasterize `payload` and resample the symbol to exactly `size`×`size`.
pub fn rasterize_sized(
    payload: &str,
    size: u32,
    module_px: u32,
    quiet_zone: u32,
) -> Result<GrayImage, ComposeError> {
    let img = rasterize(payload, module_px, quiet_zone)?;
    Ok(image::imageops::resize(
        &img,
        size,
        size,
        FilterType::Lanczos3,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rasterize_is_square() {
        let img = rasterize("https://example.com", 10, 4).unwrap();
        assert_eq!(img.width(), img.height());
        // Version 1 is 21 modules; any version side is (modules + 8) * 10.
        assert_eq!(img.width() % 10, 0);
    }

    #[test]
    fn rasterize_has_quiet_zone() {
        let img = rasterize("https://example.com", 10, 4).unwrap();
        // The first 40px in from every edge are quiet zone, all white.
        for i in 0..40 {
            assert_eq!(img.get_pixel(i, 0).0[0], 255);
            assert_eq!(img.get_pixel(0, i).0[0], 255);
            assert_eq!(img.get_pixel(img.width() - 1 - i, img.height() - 1).0[0], 255);
        }
    }

    #[test]
    fn rasterize_contains_dark_modules() {
        let img = rasterize("hello", 10, 4).unwrap();
        assert!(img.pixels().any(|p| p.0[0] == 0));
    }

    #[test]
    fn rasterize_sized_hits_exact_dimensions() {
        let img = rasterize_sized("https://example.com/a", 500, 10, 4).unwrap();
        assert_eq!((img.width(), img.height()), (500, 500));
    }

    #[test]
    fn empty_payload_yields_minimal_symbol() {
        let img = rasterize("", 10, 4).unwrap();
        // Version 1: 21 modules plus 8 quiet-zone modules.
        assert_eq!(img.width(), (21 + 8) * 10);
    }

    #[test]
    fn zero_module_px_is_clamped() {
        let img = rasterize("x", 0, 4).unwrap();
        assert!(img.width() > 0);
    }

    #[test]
    fn long_payload_upgrades_version() {
        let short = rasterize("a", 10, 4).unwrap();
        let long = rasterize(&"a".repeat(200), 10, 4).unwrap();
        assert!(long.width() > short.width());
    }
}
