//! # Beshob Desk Entry Point
//!
//! Terminal preview of the invoice builder.
//!
//! ## Usage
//! ```bash
//! beshob-desk
//! beshob-desk "Rahim, 01712345678, Agrabad Chattogram, 2 organic honey"
//! beshob-desk --config ./desk.toml "..."
//! ```
//!
//! With text, a magic fill runs first; the receipt is then printed using
//! the configured width and currency symbol.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};

use beshob_desk::commands::assist::{magic_fill, MagicFillOutcome};
use beshob_desk::commands::invoice::{export_file_name, invoice_text};
use beshob_desk::config::DeskConfig;
use beshob_desk::DeskApp;

#[tokio::main]
async fn main() -> ExitCode {
    beshob_desk::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, text) = match parse_args(&args) {
        Some(parsed) => parsed,
        None => {
            print_help();
            return ExitCode::SUCCESS;
        }
    };

    info!("Starting Beshob Invoice desk");

    let config = DeskConfig::load_or_default(config_path);
    let app = match DeskApp::bootstrap(config).await {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Startup failed");
            return ExitCode::FAILURE;
        }
    };

    if !text.is_empty() {
        match magic_fill(&app.assist, &app.catalog, &app.settings, &app.invoice, &text).await {
            Ok(MagicFillOutcome::Applied { warnings, .. }) => {
                for warning in warnings {
                    println!("⚠ {}", warning);
                }
            }
            Ok(MagicFillOutcome::NothingParsed) => println!("Nothing could be read from the text."),
            Ok(_) => {}
            Err(e) => error!(error = %e, "Magic fill failed"),
        }
    }

    let display = &app.config.display;
    let receipt = invoice_text(&app.settings, &app.invoice, display.receipt_width);
    println!("{}", display.localize(&receipt));
    println!("Export as: {}", export_file_name(&app.invoice));

    app.shutdown().await;
    ExitCode::SUCCESS
}

/// Returns `None` when help was requested.
fn parse_args(args: &[String]) -> Option<(Option<PathBuf>, String)> {
    let mut config_path = None;
    let mut words = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => return None,
            word => words.push(word.to_string()),
        }
        i += 1;
    }

    Some((config_path, words.join(" ")))
}

fn print_help() {
    println!("Beshob Invoice desk preview");
    println!();
    println!("Usage: beshob-desk [OPTIONS] [TEXT...]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Config file (default: platform config dir)");
    println!("  -h, --help           Show this help");
    println!();
    println!("Environment:");
    println!("  BESHOB_DB_PATH          Database file");
    println!("  BESHOB_GEMINI_API_KEY   Enables remote assist");
    println!("  BESHOB_ASSIST_MODEL     Model name");
    println!("  BESHOB_ASSIST_ENABLED   true/false");
}
