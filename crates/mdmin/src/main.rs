//! mdmin CLI - converts a markdown file into a single HTML page with a
//! navigation menu built from one heading level.

mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::ConvertArgs;
use output::Output;

/// mdmin - markdown to single-page HTML.
#[derive(Parser)]
#[command(name = "mdmin", version, about)]
struct Cli {
    #[command(flatten)]
    convert: ConvertArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.convert.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.convert.execute(&output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
