//! Command-line surface for `qrtag`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use qr_compose::{ComposeOptions, LabelOptions, OutputFormat};

/// Batch-generate logo-overlaid QR images from a delimited row file.
#[derive(Parser, Debug)]
#[command(
    name = "qrtag",
    version,
    about = "Batch QR-code generator with logo overlay",
    long_about = None
)]
pub struct Cli {
    /// Semicolon-delimited input file with TAG;PREFIX;LINK columns
    #[arg(long, env = "QRTAG_INPUT")]
    pub input: PathBuf,

    /// Logo image pasted over the center of every QR code
    #[arg(long, env = "QRTAG_LOGO")]
    pub logo: PathBuf,

    /// Directory the output images are written to (created if absent)
    #[arg(long, default_value = "URLS")]
    pub out_dir: PathBuf,

    /// Output canvas side in pixels
    #[arg(long, default_value_t = 500)]
    pub size: u32,

    /// Logo side as a fraction of the canvas side, exclusive (0, 1)
    #[arg(long, default_value_t = 0.2)]
    pub logo_ratio: f32,

    /// Draw each row's identifier as a framed label below its QR code
    #[arg(long)]
    pub label: bool,

    /// TTF/OTF font for the label (system fonts are tried as fallback)
    #[arg(long)]
    pub label_font: Option<PathBuf>,

    /// Label font size in pixels
    #[arg(long, default_value_t = 48.0)]
    pub label_size: f32,

    /// Thickness of the frame drawn around labeled output
    #[arg(long, default_value_t = 10)]
    pub frame_thickness: u32,

    /// Output raster format
    #[arg(long, value_enum, default_value_t = FormatArg::Png)]
    pub format: FormatArg,

    /// Skip rows that fail to render instead of aborting the batch
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    Png,
    Bmp,
}

impl From<FormatArg> for OutputFormat {
    fn from(val: FormatArg) -> Self {
        match val {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Bmp => OutputFormat::Bmp,
        }
    }
}

impl Cli {
    /// Translate the CLI flags into a composer option bundle.
    pub fn compose_options(&self) -> ComposeOptions {
        let mut options = ComposeOptions::default()
            .with_size(self.size)
            .with_logo_ratio(self.logo_ratio)
            .with_format(self.format.into());

        if self.label {
            options = options.with_label(LabelOptions {
                // Overridden per row with the row identifier.
                text: String::new(),
                font_path: self.label_font.clone(),
                font_size: self.label_size,
                frame_thickness: self.frame_thickness,
                ..Default::default()
            });
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn minimal_invocation_uses_defaults() {
        let cli = parse(&["qrtag", "--input", "TAGS.csv", "--logo", "logo.png"]);
        assert_eq!(cli.out_dir, PathBuf::from("URLS"));
        assert_eq!(cli.size, 500);
        assert_eq!(cli.logo_ratio, 0.2);
        assert!(!cli.label);
        assert!(!cli.keep_going);

        let options = cli.compose_options();
        assert!(options.label.is_none());
        assert_eq!(options.format, OutputFormat::Png);
    }

    #[test]
    fn label_flag_enables_label_options() {
        let cli = parse(&[
            "qrtag",
            "--input",
            "a.csv",
            "--logo",
            "l.png",
            "--label",
            "--label-size",
            "32",
            "--frame-thickness",
            "4",
        ]);
        let options = cli.compose_options();
        let label = options.label.unwrap();
        assert_eq!(label.font_size, 32.0);
        assert_eq!(label.frame_thickness, 4);
    }

    #[test]
    fn format_flag_maps_to_output_format() {
        let cli = parse(&[
            "qrtag", "--input", "a.csv", "--logo", "l.png", "--format", "bmp",
        ]);
        assert_eq!(cli.compose_options().format, OutputFormat::Bmp);
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["qrtag", "--logo", "l.png"]).is_err());
    }
}
