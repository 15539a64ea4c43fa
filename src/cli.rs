use clap::{Parser, Subcommand, ValueEnum};
use dsg_lib::Viewport;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dsg")]
#[command(
    version,
    about = "Design System Generator - Scan a design canvas and synthesize a design system page",
    long_about = "Design System Generator (DSG)\n\nModes:\n- scan: collect colors, text styles and components from a page and print them.\n- generate: build an \"Auto Design System\" page from the current page.\n- serve: answer plugin messages (JSON lines on stdin) against a document.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) to set defaults for fonts/report/viewport; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect design attributes from a page and print them
    Scan {
        #[arg(long, help = "Document file (JSON node tree)")]
        document: PathBuf,

        #[arg(long, help = "Page id or name to scan (defaults to the current page)")]
        page: Option<String>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// Generate a design system page from the current page
    Generate {
        #[arg(long, help = "Document file (JSON node tree)")]
        document: PathBuf,

        #[arg(long, help = "Page id or name to scan (defaults to the current page)")]
        page: Option<String>,

        #[arg(
            long,
            value_name = "PATH",
            help = "Write the updated document here (the input is never modified)"
        )]
        save: Option<PathBuf>,

        #[arg(
            long,
            default_value = "1440x900",
            help = "Screen size used to frame the generated page (WIDTHxHEIGHT)"
        )]
        viewport: Viewport,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// Handle plugin messages read as JSON lines from stdin
    Serve {
        #[arg(long, help = "Document file (JSON node tree)")]
        document: PathBuf,

        #[arg(long, value_name = "PATH", help = "Write the document here at end of input")]
        save: Option<PathBuf>,

        #[arg(
            long,
            default_value = "1440x900",
            help = "Screen size used to frame the generated page (WIDTHxHEIGHT)"
        )]
        viewport: Viewport,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
