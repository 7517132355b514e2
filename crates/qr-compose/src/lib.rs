//! Labeled QR-code composition.
//!
//! Encodes a payload as a QR symbol at the highest error-correction tier,
//! overlays a centered logo, and optionally stamps a framed text label
//! below the code. The high EC tier tolerates roughly 30% module damage,
//! which is what keeps the symbol scannable under the logo.

use std::path::PathBuf;

pub mod compose;
pub mod composer;
pub mod label;
pub mod options;
pub mod qr;

// Re-exports for convenience
pub use composer::Composer;
pub use options::{ComposeOptions, LabelOptions, OutputFormat};

/// Errors that can occur while composing or persisting a QR image.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("Failed to decode logo {path}: {source}")]
    LogoDecode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("No usable label font: {0}")]
    FontUnavailable(String),

    #[error("Failed to write image {path}: {source}")]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
