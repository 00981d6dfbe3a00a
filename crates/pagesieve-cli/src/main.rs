mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pagesieve",
    version,
    about = "Find PDF pages containing all keywords and export their data tables to xlsx"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where keywords come from. Command-line keywords replace config keywords.
#[derive(Args, Clone, Default)]
pub struct KeywordArgs {
    /// Keyword that must appear on a page (repeatable)
    #[arg(short, long = "keyword", value_name = "TEXT")]
    pub keyword: Vec<String>,

    /// File with keywords, one per line
    #[arg(long, value_name = "FILE")]
    pub keywords_file: Option<PathBuf>,

    /// JSON config file with keywords, detector settings and output path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract data tables from keyword pages into an xlsx workbook
    Extract {
        /// Path to PDF file
        input_file: PathBuf,

        #[command(flatten)]
        keywords: KeywordArgs,

        /// Workbook to write (default: extracted_tables.xlsx)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Preview format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Do not print the extracted tables (table or json) to stdout
        #[arg(long)]
        no_preview: bool,

        /// Minimum run of spaces between columns
        #[arg(long, value_name = "N")]
        column_gap: Option<usize>,

        /// Minimum consecutive rows for a table
        #[arg(long, value_name = "N")]
        min_rows: Option<usize>,

        /// Minimum columns for a table row
        #[arg(long, value_name = "N")]
        min_columns: Option<usize>,
    },
    /// List the pages that contain all keywords
    Pages {
        /// Path to PDF file
        input_file: PathBuf,

        #[command(flatten)]
        keywords: KeywordArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            input_file,
            keywords,
            out,
            output,
            no_preview,
            column_gap,
            min_rows,
            min_columns,
        } => commands::extract::run(
            input_file,
            &keywords,
            out,
            &output,
            !no_preview,
            commands::extract::DetectorOverrides {
                column_gap,
                min_rows,
                min_columns,
            },
        ),
        Commands::Pages {
            input_file,
            keywords,
            output,
        } => commands::pages::run(input_file, &keywords, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
