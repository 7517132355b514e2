//! Image composition utilities — overlay, canvas extension, borders.

use image::{DynamicImage, Rgba, RgbaImage};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Overlay `top` image onto `base` at the given position.
///
/// The `top` image is alpha-composited over the base: fully opaque pixels
/// overwrite, fully transparent pixels leave the base intact, partial
/// alpha blends. A logo without an alpha channel therefore pastes
/// opaquely over its whole rectangle.
pub fn overlay(base: &mut RgbaImage, top: &DynamicImage, x: u32, y: u32) {
    let top_rgba = top.to_rgba8();
    for (dx, dy, pixel) in top_rgba.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x < base.width() && target_y < base.height() {
            let alpha = pixel[3] as f32 / 255.0;
            if alpha > 0.99 {
                base.put_pixel(target_x, target_y, *pixel);
            } else if alpha > 0.01 {
                let bg = base.get_pixel(target_x, target_y);
                let blended = blend_pixel(bg, pixel, alpha);
                base.put_pixel(target_x, target_y, blended);
            }
        }
    }
}

/// Position that centers a `(w, h)` rectangle on `canvas`.
pub fn centered(canvas: &RgbaImage, w: u32, h: u32) -> (u32, u32) {
    (
        canvas.width().saturating_sub(w) / 2,
        canvas.height().saturating_sub(h) / 2,
    )
}

/// Extend the canvas downward by `extra` rows of white.
///
/// The original image sits at the top-left origin of the new canvas.
pub fn extend_below(img: &RgbaImage, extra: u32) -> RgbaImage {
    let mut out = RgbaImage::from_pixel(img.width(), img.height() + extra, WHITE);
    for (x, y, pixel) in img.enumerate_pixels() {
        out.put_pixel(x, y, *pixel);
    }
    out
}

/// Surround the image with a solid border of `thickness` pixels.
pub fn expand_border(img: &RgbaImage, thickness: u32, color: Rgba<u8>) -> RgbaImage {
    let mut out = RgbaImage::from_pixel(
        img.width() + 2 * thickness,
        img.height() + 2 * thickness,
        color,
    );
    for (x, y, pixel) in img.enumerate_pixels() {
        out.put_pixel(x + thickness, y + thickness, *pixel);
    }
    out
}

fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let inv = 1.0 - alpha;
    Rgba([
        (fg[0] as f32 * alpha + bg[0] as f32 * inv) as u8,
        (fg[1] as f32 * alpha + bg[1] as f32 * inv) as u8,
        (fg[2] as f32 * alpha + bg[2] as f32 * inv) as u8,
        255,
    ])
}
