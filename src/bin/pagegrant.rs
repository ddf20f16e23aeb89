//! Pagegrant CLI
//!
//! Run with: cargo run --features cli --bin pagegrant -- access.json
//!
//! Loads a widget's access data, replays recorded interactions, and prints
//! the result:
//!   --format html   - rendered widget fragment (default)
//!   --format json   - submission payload
//!   --format form   - name=value lines as the page form would post them
//!
//! Events are JSON lines, e.g. `{"type": "grant_new_group", "group": "3"}`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use pagegrant::replay::{replay, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "pagegrant", about = "Replay access widget interactions and print the result")]
struct Args {
    /// Access data JSON (bare, or a page config with an `AccessData` key)
    config: PathBuf,

    /// File of JSON-lines events to apply in order
    #[arg(long)]
    events: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "html")]
    format: OutputFormat,
}

// ============================================================================
// Main
// ============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match replay(&args.config, args.events.as_deref(), args.format) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("pagegrant: {}", e);
            ExitCode::FAILURE
        }
    }
}
