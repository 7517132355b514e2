//! Batch-reusable composer.
//!
//! Decodes and resizes the logo once and resolves the label font once,
//! then renders any number of payloads against those cached assets.

use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use image::{DynamicImage, RgbaImage, imageops::FilterType};
use tracing::debug;

use crate::options::ComposeOptions;
use crate::{ComposeError, compose, label, qr};

/// Renders labeled QR images against a fixed logo and option bundle.
///
/// Immutable after construction, so one composer can serve a whole batch
/// of independent rows.
pub struct Composer {
    options: ComposeOptions,
    logo: DynamicImage,
    font: Option<FontVec>,
}

impl Composer {
    /// Decode the logo, pre-size it to `size * logo_ratio`, and load the
    /// label font when labels are enabled.
    pub fn new(logo_path: &Path, options: ComposeOptions) -> Result<Self, ComposeError> {
        let logo = image::open(logo_path).map_err(|source| ComposeError::LogoDecode {
            path: logo_path.to_path_buf(),
            source,
        })?;
        let logo_side = ((options.size as f32) * options.logo_ratio) as u32;
        let logo = logo.resize_exact(logo_side.max(1), logo_side.max(1), FilterType::Lanczos3);

        let font = match &options.label {
            Some(l) => Some(label::load_font(l.font_path.as_deref())?),
            None => None,
        };

        debug!(
            logo = %logo_path.display(),
            logo_side,
            label = options.label.is_some(),
            "Prepared composer"
        );

        Ok(Self {
            options,
            logo,
            font,
        })
    }

    /// The options this composer was built with.
    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Render one QR image for `link`.
    ///
    /// `label_text` overrides the configured label text when set, so a
    /// batch can stamp each row's identifier. With labels disabled the
    /// result is exactly `size`×`size`; with labels enabled the canvas
    /// grows by the label strip plus the surrounding frame.
    pub fn render(&self, link: &str, label_text: Option<&str>) -> Result<RgbaImage, ComposeError> {
        let opts = &self.options;

        let symbol = qr::rasterize_sized(link, opts.size, opts.module_px, opts.quiet_zone)?;
        let mut canvas = DynamicImage::ImageLuma8(symbol).to_rgba8();

        let (x, y) = compose::centered(&canvas, self.logo.width(), self.logo.height());
        compose::overlay(&mut canvas, &self.logo, x, y);

        if let Some(label_opts) = &opts.label {
            let mut label_opts = label_opts.clone();
            if let Some(text) = label_text {
                label_opts.text = text.to_string();
            }

            canvas = compose::extend_below(&canvas, label::reserved_height(&label_opts));
            let font = self
                .font
                .as_ref()
                .ok_or_else(|| ComposeError::FontUnavailable("label font not loaded".into()))?;
            label::draw_label(&mut canvas, opts.size, &label_opts, font);
            canvas = compose::expand_border(
                &canvas,
                label_opts.frame_thickness,
                image::Rgba([0, 0, 0, 255]),
            );
        }

        Ok(canvas)
    }

    /// Render `link` and persist the image at `path`.
    ///
    /// The file is written to a temporary sibling first and renamed into
    /// place, so an interrupted save never leaves a truncated image at
    /// the final path. The format comes from the options, never from the
    /// path's extension.
    pub fn render_to_file(
        &self,
        link: &str,
        label_text: Option<&str>,
        path: &Path,
    ) -> Result<(), ComposeError> {
        let img = self.render(link, label_text)?;

        let tmp = tmp_path(path);
        img.save_with_format(&tmp, self.options.format.as_image_format())
            .map_err(|source| ComposeError::Save {
                path: tmp.clone(),
                source,
            })?;
        if let Err(e) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(ComposeError::Io(e));
        }

        debug!(path = %path.display(), "Wrote QR image");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "out".into());
    name.push(".tmp");
    path.with_file_name(name)
}
