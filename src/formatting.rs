use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dsg_lib::messages::NotificationLevel;
use dsg_lib::{DsgError, DsgOutput, ErrorOutput, DSG_OUTPUT_VERSION};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &DsgOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: DsgError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = DsgOutput::Error(ErrorOutput {
        version: DSG_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    // Exit code 2 is fatal; a handled generation failure uses 1.
    ExitCode::from(2)
}

/// Write JSON output to file or stdout.
fn write_json_output(body: &DsgOutput, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &DsgOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &DsgOutput, colorize: bool) -> String {
    match body {
        DsgOutput::Scan(out) => {
            let mut buf = String::new();
            let header = color("[SCAN]", "36", colorize);
            writeln!(buf, "{} {} (page {})", header, out.document, out.page).ok();
            writeln!(
                buf,
                "Found {} colors, {} text styles, {} components",
                out.stats.colors, out.stats.text_styles, out.stats.components
            )
            .ok();

            if !out.inventory.colors.is_empty() {
                writeln!(buf, "Colors:").ok();
                for entry in &out.inventory.colors {
                    writeln!(buf, "- {:8} {} uses", entry.hex, entry.count).ok();
                }
            }
            if !out.inventory.text_styles.is_empty() {
                writeln!(buf, "Text styles:").ok();
                for style in &out.inventory.text_styles {
                    writeln!(
                        buf,
                        "- {} {} {} ({} uses)",
                        style.family,
                        style.weight,
                        style.size_label(),
                        style.count
                    )
                    .ok();
                }
            }
            if !out.inventory.components.is_empty() {
                writeln!(buf, "Components:").ok();
                for component in &out.inventory.components {
                    writeln!(
                        buf,
                        "- {} ({}x{})",
                        component.name, component.width, component.height
                    )
                    .ok();
                }
            }
            buf
        }
        DsgOutput::Generate(out) => {
            let mut buf = String::new();
            let (status, code) = if out.succeeded() {
                ("DONE", "32")
            } else {
                ("FAIL", "31")
            };
            let header = color(status, code, colorize);
            writeln!(buf, "{} Design system generation", header).ok();
            writeln!(buf, "Document: {} (scanned page {})", out.document, out.source_page).ok();
            if let Some(page) = &out.page {
                writeln!(buf, "Report page: {}", page).ok();
            }
            if let Some(stats) = &out.stats {
                writeln!(
                    buf,
                    "Stats: {} colors, {} text styles, {} components",
                    stats.colors, stats.text_styles, stats.components
                )
                .ok();
            }
            if !out.skipped_styles.is_empty() {
                writeln!(buf, "Skipped styles (font unavailable):").ok();
                for font in &out.skipped_styles {
                    writeln!(buf, "- {}", font).ok();
                }
            }
            for note in &out.notifications {
                let code = match note.level {
                    NotificationLevel::Success => "32",
                    NotificationLevel::Warning => "33",
                    NotificationLevel::Error => "31",
                };
                let tag = color(&format!("[{:?}]", note.level).to_uppercase(), code, colorize);
                writeln!(buf, "{} {}", tag, note.message).ok();
            }
            if let Some(path) = &out.saved_to {
                writeln!(buf, "Saved to {}", path.display()).ok();
            }
            buf
        }
        DsgOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Determine exit code for the generate command.
pub fn exit_code_for_generate(succeeded: bool) -> ExitCode {
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
