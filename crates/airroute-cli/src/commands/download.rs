//! Download command handler for fetching the OpenFlights dataset.

use std::path::Path;

use anyhow::{Context, Result};

use airroute_lib::ensure_dataset;

use crate::output::OutputFormat;

/// Ensure both dataset files exist locally and report where they live.
pub fn handle_download(target_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let paths = ensure_dataset(target_path)
        .context("failed to locate or download the OpenFlights dataset")?;
    format.render_download(&paths)
}
