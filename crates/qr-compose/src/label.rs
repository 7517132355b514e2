//! Label text rendering and font resolution.

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::{info, warn};

use crate::ComposeError;
use crate::options::LabelOptions;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Vertical space reserved below the QR canvas for the label strip.
pub fn reserved_height(opts: &LabelOptions) -> u32 {
    opts.frame_thickness + opts.font_size.ceil() as u32 + 10
}

/// Load the label font.
///
/// An explicit path wins; when it is missing or not a valid TTF/OTF,
/// platform system fonts are tried before giving up.
pub fn load_font(path: Option<&Path>) -> Result<FontVec, ComposeError> {
    if let Some(path) = path {
        match std::fs::read(path) {
            Ok(data) => match FontVec::try_from_vec(data) {
                Ok(font) => return Ok(font),
                Err(_) => {
                    warn!(path = %path.display(), "Font file is not valid TTF/OTF, falling back")
                }
            },
            Err(e) => {
                warn!(path = %path.display(), "Failed to read font file: {e}, falling back")
            }
        }
    }

    for candidate in system_font_candidates() {
        if let Ok(data) = std::fs::read(candidate) {
            if let Ok(font) = FontVec::try_from_vec(data) {
                info!(path = %candidate, "Using system font for label");
                return Ok(font);
            }
        }
    }

    Err(ComposeError::FontUnavailable(
        "no usable label font found (pass a font path or install system fonts)".to_string(),
    ))
}

fn system_font_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &[
            "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/System/Library/Fonts/Supplemental/Helvetica.ttf",
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &[
            "C:\\Windows\\Fonts\\arialbd.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        ]
    }
}

/// Measure the pixel width of a string at the given scale, kerning included.
pub fn measure_text_width(font: &impl Font, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

/// Line height (ascent to descent) at the given scale.
pub fn text_height(font: &impl Font, scale: PxScale) -> u32 {
    let scaled = font.as_scaled(scale);
    (scaled.ascent() - scaled.descent()).ceil() as u32
}

/// Draw the framed label centered in the strip below `qr_side`.
///
/// The background rectangle is sized from measured glyph metrics, not
/// fixed placeholder constants, so any label text stays centered.
pub fn draw_label(img: &mut RgbaImage, qr_side: u32, opts: &LabelOptions, font: &FontVec) {
    if opts.text.is_empty() {
        return;
    }

    let scale = PxScale::from(opts.font_size);
    let text_w = measure_text_width(font, scale, &opts.text);
    let text_h = text_height(font, scale);
    let pad = opts.padding;

    let strip = reserved_height(opts);
    let x0 = img.width().saturating_sub(text_w + 2 * pad) / 2;
    let y0 = qr_side + strip.saturating_sub(text_h + 2 * pad) / 2;

    draw_filled_rect_mut(
        img,
        Rect::at(x0 as i32, y0 as i32).of_size(text_w + 2 * pad, text_h + 2 * pad),
        BLACK,
    );
    draw_text_mut(
        img,
        WHITE,
        (x0 + pad) as i32,
        (y0 + pad) as i32,
        scale,
        font,
        &opts.text,
    );
}
