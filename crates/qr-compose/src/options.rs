//! Composition options.
//!
//! All rendering knobs live here so the composer has no implicit
//! dependency on process-wide state.

use std::path::PathBuf;

/// Output raster format. Explicit by configuration, never inferred from
/// the output filename. Both variants are lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Bmp,
}

impl OutputFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Bmp => "bmp",
        }
    }

    pub(crate) fn as_image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Bmp => image::ImageFormat::Bmp,
        }
    }
}

/// Options for the framed text label drawn below the QR code.
#[derive(Debug, Clone)]
pub struct LabelOptions {
    /// Text to stamp under the code. Callers typically override this per
    /// row with the row identifier.
    pub text: String,

    /// TTF/OTF font file. When missing or unreadable, platform system
    /// fonts are tried as a fallback.
    pub font_path: Option<PathBuf>,

    /// Label font size in pixels.
    pub font_size: f32,

    /// Thickness of the border frame drawn around the whole canvas.
    pub frame_thickness: u32,

    /// Padding between the label text and its background rectangle.
    pub padding: u32,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_path: None,
            font_size: 48.0,
            frame_thickness: 10,
            padding: 2,
        }
    }
}

/// Configuration bundle for QR composition.
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// Final square canvas side in pixels, before any label extension.
    pub size: u32,

    /// Logo side length as a fraction of `size`. Must be in (0, 1).
    pub logo_ratio: f32,

    /// Pixels per QR module at rasterization time, before resampling.
    pub module_px: u32,

    /// Quiet-zone width in modules around the symbol (QR spec minimum is 4).
    pub quiet_zone: u32,

    /// Label rendering. `None` (the default) leaves the canvas bare: a
    /// plain QR code with a centered logo and nothing below it.
    pub label: Option<LabelOptions>,

    /// Output raster format.
    pub format: OutputFormat,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            size: 500,
            logo_ratio: 0.2,
            module_px: 10,
            quiet_zone: 4,
            label: None,
            format: OutputFormat::Png,
        }
    }
}

impl ComposeOptions {
    /// Create options with the named defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the output canvas side in pixels.
    pub fn with_size(mut self, val: u32) -> Self {
        self.size = val;
        self
    }

    /// Builder: set the logo-to-canvas size ratio.
    ///
    /// # Panics
    /// Panics if value is not in the exclusive (0, 1) range.
    pub fn with_logo_ratio(mut self, val: f32) -> Self {
        assert!(
            val > 0.0 && val < 1.0,
            "Logo ratio must be in (0, 1), got {val}"
        );
        self.logo_ratio = val;
        self
    }

    /// Builder: set pixels per module.
    pub fn with_module_px(mut self, val: u32) -> Self {
        self.module_px = val;
        self
    }

    /// Builder: set the quiet-zone width in modules.
    pub fn with_quiet_zone(mut self, val: u32) -> Self {
        self.quiet_zone = val;
        self
    }

    /// Builder: enable label rendering.
    pub fn with_label(mut self, val: LabelOptions) -> Self {
        self.label = Some(val);
        self
    }

    /// Builder: set the output format.
    pub fn with_format(mut self, val: OutputFormat) -> Self {
        self.format = val;
        self
    }
}
