use std::path::PathBuf;
use std::process::ExitCode;

use dsg_lib::{
    load_document, save_document, DsgError, DsgOutput, FontCatalog, GenerateOutput,
    PluginMessage, Session, Viewport, DSG_OUTPUT_VERSION,
};
use tracing::info;

use super::{notifications, select_page};
use crate::cli::OutputFormat;
use crate::formatting::{exit_code_for_generate, render_error, write_output};
use crate::settings::{format_effective_config, load_config, resolve_viewport};

/// Run the generate command.
#[allow(clippy::too_many_arguments)]
pub async fn run_generate(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    document: PathBuf,
    page: Option<String>,
    save: Option<PathBuf>,
    viewport: Viewport,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, None),
    };
    let viewport = resolve_viewport(raw_args, viewport, &config);
    if verbose {
        info!(
            "{}",
            format_effective_config(&config, &viewport, config_path.as_deref())
        );
    }

    let fonts = match FontCatalog::from_config(&config.fonts).await {
        Ok(fonts) => fonts,
        Err(err) => return render_error(err.into(), format, None),
    };
    let mut doc = match load_document(&document).await {
        Ok(doc) => doc,
        Err(err) => return render_error(err, format, None),
    };
    doc.set_screen(viewport);
    let source_page = match select_page(&mut doc, page.as_deref()) {
        Ok(page) => page,
        Err(err) => return render_error(err, format, None),
    };

    let mut session = Session::new(&config, &fonts);
    let replies = session
        .handle(&mut doc, PluginMessage::GenerateDesignSystem)
        .await;
    let outcome = session.last_outcome().cloned();

    let saved_to = match save {
        Some(path) => {
            if let Err(err) = save_document(&doc, &path).await {
                return render_error(err, format, None);
            }
            info!(path = %path.display(), "document saved");
            Some(path)
        }
        None => None,
    };

    let body = GenerateOutput {
        version: DSG_OUTPUT_VERSION.to_string(),
        document: doc.name().to_string(),
        source_page,
        page: outcome.as_ref().map(|o| o.page.clone()),
        container: outcome.as_ref().map(|o| o.container.clone()),
        stats: outcome.as_ref().map(|o| o.stats),
        skipped_styles: outcome.map(|o| o.skipped_styles).unwrap_or_default(),
        notifications: notifications(replies),
        saved_to,
    };
    let succeeded = body.succeeded();

    if let Err(err) = write_output(&DsgOutput::Generate(body), format, output.clone()) {
        return render_error(DsgError::Unknown(err.to_string()), format, output);
    }
    exit_code_for_generate(succeeded)
}
