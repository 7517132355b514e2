//! Batch driver: one output image per input row.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use tracing::{error, info, warn};

use qr_compose::{ComposeOptions, Composer};

use crate::rows::RowSource;

/// Outcome of a batch run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Rows read from the input file.
    pub processed: usize,
    /// Images written successfully.
    pub written: usize,
    /// Rows skipped after a render failure (keep-going mode only).
    pub failed: usize,
}

/// Render every input row into `out_dir`.
///
/// The header is validated and the composer prepared before any output
/// side effect, so input and asset errors abort with nothing written.
/// Rows are independent; with `keep_going` a failing row is reported and
/// skipped instead of aborting the rest of the batch.
pub fn run(
    input: &Path,
    logo: &Path,
    out_dir: &Path,
    options: ComposeOptions,
    keep_going: bool,
) -> anyhow::Result<BatchSummary> {
    let mut source = RowSource::open(input)?;

    let composer = Composer::new(logo, options)
        .with_context(|| format!("failed to prepare composer with logo {}", logo.display()))?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let extension = composer.options().format.extension();
    let mut summary = BatchSummary::default();
    let mut seen = HashSet::new();

    for (index, row) in source.rows().enumerate() {
        let row = row.with_context(|| format!("failed to read row {}", index + 1))?;
        summary.processed += 1;

        if !seen.insert(row.identifier.clone()) {
            warn!(
                identifier = %row.identifier,
                "Duplicate identifier, previous output will be overwritten"
            );
        }

        let output = out_dir.join(format!("{}.{extension}", row.identifier));
        match composer.render_to_file(&row.link, Some(&row.identifier), &output) {
            Ok(()) => {
                summary.written += 1;
                info!(
                    row = index + 1,
                    identifier = %row.identifier,
                    path = %output.display(),
                    "Wrote QR image"
                );
            }
            Err(e) if keep_going => {
                summary.failed += 1;
                error!(
                    row = index + 1,
                    identifier = %row.identifier,
                    "Skipping row: {e}"
                );
            }
            Err(e) => {
                return Err(anyhow::Error::new(e))
                    .with_context(|| format!("row {} ({}) failed", index + 1, row.identifier));
            }
        }
    }

    info!(
        processed = summary.processed,
        written = summary.written,
        failed = summary.failed,
        "Batch complete"
    );
    Ok(summary)
}
