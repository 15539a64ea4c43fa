use std::path::PathBuf;
use std::process::ExitCode;

use dsg_lib::{collect_page, load_document, DsgError, DsgOutput, ScanOutput, DSG_OUTPUT_VERSION};
use tracing::info;

use super::select_page;
use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::settings::{format_effective_config, load_config};

/// Run the scan command.
pub async fn run_scan(
    config_path: Option<PathBuf>,
    verbose: bool,
    document: PathBuf,
    page: Option<String>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, None),
    };
    if verbose {
        info!(
            "{}",
            format_effective_config(&config, &config.viewport, config_path.as_deref())
        );
    }

    let mut doc = match load_document(&document).await {
        Ok(doc) => doc,
        Err(err) => return render_error(err, format, None),
    };
    let page = match select_page(&mut doc, page.as_deref()) {
        Ok(page) => page,
        Err(err) => return render_error(err, format, None),
    };

    let inventory = collect_page(&doc, &page, &config.collect_options());
    let body = DsgOutput::Scan(ScanOutput {
        version: DSG_OUTPUT_VERSION.to_string(),
        document: doc.name().to_string(),
        page,
        stats: inventory.stats(),
        inventory,
    });

    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(DsgError::Unknown(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}
