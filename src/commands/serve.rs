use std::path::PathBuf;
use std::process::ExitCode;

use dsg_lib::messages::Notification;
use dsg_lib::{
    load_document, save_document, DsgError, FontCatalog, PluginMessage, Session, UiMessage,
    Viewport,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::OutputFormat;
use crate::formatting::render_error;
use crate::settings::{load_config, resolve_viewport};

/// Run the serve command: one JSON message per stdin line, replies as JSON lines.
pub async fn run_serve(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    document: PathBuf,
    save: Option<PathBuf>,
    viewport: Viewport,
) -> ExitCode {
    let format = OutputFormat::Json;
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, None),
    };
    let fonts = match FontCatalog::from_config(&config.fonts).await {
        Ok(fonts) => fonts,
        Err(err) => return render_error(err.into(), format, None),
    };
    let mut doc = match load_document(&document).await {
        Ok(doc) => doc,
        Err(err) => return render_error(err, format, None),
    };
    doc.set_screen(resolve_viewport(raw_args, viewport, &config));

    // Lines are queued as they arrive and handled strictly in order.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    warn!(error = %err, "stopped reading stdin");
                    break;
                }
            }
        }
    });

    let mut stdout = tokio::io::stdout();
    let mut session = Session::new(&config, &fonts);
    let mut handled = 0usize;
    while let Some(line) = rx.recv().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let replies = match serde_json::from_str::<PluginMessage>(line) {
            Ok(message) => session.handle(&mut doc, message).await,
            Err(err) => {
                warn!(error = %err, "ignoring malformed message");
                vec![Notification::error(format!("Error: invalid message: {err}")).into()]
            }
        };
        handled += 1;
        for reply in &replies {
            if let Err(err) = write_line(&mut stdout, reply).await {
                return render_error(err, format, None);
            }
        }
    }
    if let Err(err) = reader.await {
        debug!(error = %err, "stdin reader ended abnormally");
    }
    info!(messages = handled, "input closed");

    if let Some(path) = save {
        if let Err(err) = save_document(&doc, &path).await {
            return render_error(err, format, None);
        }
        info!(path = %path.display(), "document saved");
    }
    ExitCode::SUCCESS
}

async fn write_line(stdout: &mut Stdout, message: &UiMessage) -> Result<(), DsgError> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
