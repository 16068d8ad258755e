//! # beshob-db: Local Storage for Beshob Invoice
//!
//! Persists the two long-lived documents of the invoice builder, business
//! Settings and the product Catalog, in a local SQLite file via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Beshob Invoice Data Flow                           │
//! │                                                                         │
//! │  Desk command (update_settings, save_product_draft, commit_invoice)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    beshob-db (THIS CRATE)                       │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐   │    │
//! │  │   │   Database    │    │   Repositories     │  │ Migrations │   │    │
//! │  │   │   (pool.rs)   │◄───│ SettingsRepository │  │ (embedded) │   │    │
//! │  │   │  SqlitePool   │    │ CatalogRepository  │  │ 001_app_   │   │    │
//! │  │   │               │    │ KvRepository       │  │  storage   │   │    │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘   │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  app_storage(key, value, updated_at)                                    │
//! │    beshob_settings → {"name":"Beshob","nextInvoiceNumber":1001,...}     │
//! │    beshob_products → [{"id":"…","name":"Organic Honey","sizes":[…]}]    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each document is rewritten whole on every save. There is no versioning.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use beshob_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/beshob.db")).await?;
//!
//! let settings = db.settings().load_or_default().await?;
//! let catalog = db.catalog().load_or_default().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::catalog::CatalogRepository;
pub use repository::kv::KvRepository;
pub use repository::settings::SettingsRepository;

// =============================================================================
// Storage Keys
// =============================================================================

/// Key holding the Settings document.
pub const SETTINGS_KEY: &str = "beshob_settings";

/// Key holding the product list.
pub const PRODUCTS_KEY: &str = "beshob_products";
