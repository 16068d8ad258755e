//! # Seed Data Writer
//!
//! Writes the first-run Settings and Catalog into a database file.
//!
//! ## Usage
//! ```bash
//! # Seed ./beshob_dev.db (skips documents that already exist)
//! cargo run -p beshob-db --bin seed
//!
//! # Specify database path
//! cargo run -p beshob-db --bin seed -- --db ./data/beshob.db
//!
//! # Overwrite existing documents
//! cargo run -p beshob-db --bin seed -- --force
//! ```
//!
//! ## Seeded Documents
//! - `beshob_settings`: default business identity, fees 60/120, INV-1001
//! - `beshob_products`: Organic Honey (500gm, 1kg), Pure Mustard Oil (1L, 5L)

use std::env;

use beshob_core::{Catalog, Settings};
use beshob_db::{Database, DbConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,beshob_db=info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./beshob_dev.db");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Beshob Invoice Seed Data Writer");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./beshob_dev.db)");
                println!("  -f, --force        Overwrite stored settings and catalog");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Beshob Invoice Seed Data Writer");
    println!("==================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");
    println!();

    let settings_exist = db.settings().load().await.map(|s| s.is_some()).unwrap_or(true);
    if settings_exist && !force {
        println!("⚠ Settings already stored, skipping (use --force to overwrite)");
    } else {
        let settings = Settings::default();
        db.settings().save(&settings).await?;
        println!(
            "✓ Settings written: {} / next invoice {}{}",
            settings.name, settings.invoice_prefix, settings.next_invoice_number
        );
    }

    let catalog_exists = db.catalog().load().await.map(|c| c.is_some()).unwrap_or(true);
    if catalog_exists && !force {
        println!("⚠ Catalog already stored, skipping (use --force to overwrite)");
    } else {
        let catalog = Catalog::default();
        db.catalog().save(&catalog).await?;
        println!("✓ Catalog written: {} products", catalog.len());
        for product in catalog.products() {
            let sizes: Vec<String> = product
                .sizes
                .iter()
                .map(|s| format!("{} {}", s.label, s.price))
                .collect();
            println!("  - {} ({})", product.name, sizes.join(", "));
        }
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
