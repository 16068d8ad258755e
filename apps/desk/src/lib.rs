//! # Beshob Desk Library
//!
//! Application layer for Beshob Invoice: managed state, commands and the
//! assist adapter, wired together by [`DeskApp`].
//!
//! ## Module Organization
//! ```text
//! beshob_desk/
//! ├── lib.rs          ◄─── You are here (startup & wiring)
//! ├── config.rs       ◄─── desk.toml + BESHOB_* overrides
//! ├── assist/
//! │   ├── mod.rs      ◄─── AssistService trait
//! │   ├── gemini.rs   ◄─── Remote model over HTTP
//! │   ├── offline.rs  ◄─── No-op fallback
//! │   └── sequencer.rs◄─── Stale response detection
//! ├── state/
//! │   ├── db.rs       ◄─── Database wrapper
//! │   ├── settings.rs ◄─── Business settings
//! │   ├── catalog.rs  ◄─── Products + admin draft
//! │   ├── invoice.rs  ◄─── Working invoice session
//! │   └── assist.rs   ◄─── Active assist service
//! ├── commands/
//! │   ├── invoice.rs  ◄─── Edit, commit, reset, view
//! │   ├── assist.rs   ◄─── Magic fill, location, review
//! │   ├── catalog.rs  ◄─── Products and draft
//! │   └── settings.rs ◄─── Settings and size vocabulary
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐ ┌──────────────┐ ┌──────────────┐ ┌───────────────────┐   │
//! │  │ DbState  │ │SettingsState │ │ CatalogState │ │   InvoiceState    │   │
//! │  │          │ │              │ │              │ │                   │   │
//! │  │ • pool   │ │ • identity   │ │ • products   │ │ • session         │   │
//! │  │ • repos  │ │ • fees       │ │ • draft      │ │ • warnings        │   │
//! │  │          │ │ • counter    │ │              │ │ • busy flag       │   │
//! │  └──────────┘ └──────────────┘ └──────────────┘ └───────────────────┘   │
//! │                                                                         │
//! │  Each command takes only the state it needs.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod assist;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use beshob_db::{Database, DbConfig};

use assist::AssistService;
use config::DeskConfig;
use error::{ApiError, ApiResult};
use state::{AssistState, CatalogState, DbState, InvoiceState, SettingsState};

/// Fully wired application.
#[derive(Debug)]
pub struct DeskApp {
    pub config: DeskConfig,
    pub db: DbState,
    pub settings: SettingsState,
    pub catalog: CatalogState,
    pub invoice: InvoiceState,
    pub assist: AssistState,
}

impl DeskApp {
    /// Opens storage and the assist service described by `config`.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. Resolve database path (config, BESHOB_DB_PATH or data dir)          │
    /// │  2. Connect to SQLite (WAL) and run migrations                          │
    /// │  3. Build assist service (Gemini when a key is set, else offline)       │
    /// │  4. Load settings and catalog, falling back to defaults                 │
    /// │  5. Start a fresh draft invoice for today                               │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn bootstrap(config: DeskConfig) -> ApiResult<Self> {
        let db_path = config.database_path().map_err(|e| {
            ApiError::internal(format!("Could not determine database path: {}", e))
        })?;
        info!(?db_path, "Database path determined");

        let db = Database::new(DbConfig::new(db_path)).await?;
        info!("Database connected and migrations applied");

        let assist = assist::build_service(&config.assist);

        Self::start(config, db, assist, today()).await
    }

    /// Loads persisted state into a connected database.
    pub async fn start(
        config: DeskConfig,
        db: Database,
        assist: Arc<dyn AssistService>,
        today: NaiveDate,
    ) -> ApiResult<Self> {
        let settings = db.settings().load_or_default().await?;
        let catalog = db.catalog().load_or_default().await?;

        info!(
            business = %settings.name,
            products = catalog.len(),
            next_invoice_number = settings.next_invoice_number,
            "State initialized"
        );

        Ok(DeskApp {
            config,
            invoice: InvoiceState::new(&settings, today),
            settings: SettingsState::new(settings),
            catalog: CatalogState::new(catalog),
            db: DbState::new(db),
            assist: AssistState::new(assist),
        })
    }

    /// Closes the connection pool.
    pub async fn shutdown(&self) {
        self.db.inner().close().await;
        info!("Beshob desk shut down");
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=beshob=trace` - Show trace for beshob crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,beshob=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}

/// Local calendar date for new invoices.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use beshob_db::{Database, DbConfig};

    use super::DeskApp;
    use crate::assist::scripted::ScriptedAssist;

    /// In-memory app with default settings and catalog.
    pub async fn open_app(assist: Arc<ScriptedAssist>) -> DeskApp {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        DeskApp::start(Default::default(), db, assist, today)
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::invoice::commit_invoice;

    #[tokio::test]
    async fn test_restart_picks_up_counter() {
        let app = testing::open_app(Default::default()).await;
        commit_invoice(&app.db, &app.settings, &app.invoice)
            .await
            .unwrap();

        // Same pool, as if the process restarted on the same file.
        let db = app.db.inner().clone();
        let restarted = DeskApp::start(
            DeskConfig::default(),
            db,
            Arc::new(assist::OfflineAssist),
            today(),
        )
        .await
        .unwrap();

        let number = restarted
            .invoice
            .with_session(|s| s.document().invoice_number.clone());
        assert_eq!(number, "INV-1002");
    }
}
