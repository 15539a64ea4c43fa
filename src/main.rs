mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_generate, run_scan, run_serve};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // stdout carries JSON output; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Scan {
            document,
            page,
            format,
            output,
        } => run_scan(args.config, args.verbose, document, page, format, output).await,
        Commands::Generate {
            document,
            page,
            save,
            viewport,
            format,
            output,
        } => {
            run_generate(
                &raw_args,
                args.config,
                args.verbose,
                document,
                page,
                save,
                viewport,
                format,
                output,
            )
            .await
        }
        Commands::Serve {
            document,
            save,
            viewport,
        } => run_serve(&raw_args, args.config, document, save, viewport).await,
    }
}
