//! # State Module
//!
//! Managed application state for the desk app.
//!
//! One state type per concern, so each command declares exactly what it
//! touches and independent concerns never wait on each other's locks.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────┐ ┌───────────────┐ ┌──────────────┐ ┌──────────────────┐   │
//! │  │ DbState  │ │ SettingsState │ │ CatalogState │ │  InvoiceState    │   │
//! │  │          │ │               │ │              │ │                  │   │
//! │  │ Database │ │ Arc<Mutex<    │ │ Arc<Mutex<   │ │ Arc<Mutex<       │   │
//! │  │ (pool)   │ │   Settings>>  │ │   Catalog>>  │ │   InvoiceSession │   │
//! │  │          │ │               │ │ + draft      │ │ >> + is_parsing  │   │
//! │  │          │ │               │ │              │ │ + warnings + seq │   │
//! │  └──────────┘ └───────────────┘ └──────────────┘ └──────────────────┘   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐                                       │
//! │  │ AssistState                  │                                       │
//! │  │ Arc<dyn AssistService>       │                                       │
//! │  └──────────────────────────────┘                                       │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • DbState: Database has internal connection pool (thread-safe)         │
//! │  • Settings/Catalog/Invoice: Arc<Mutex<T>>, closure accessors only      │
//! │  • Locks are never held across an await                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod assist;
mod catalog;
mod db;
mod invoice;
mod settings;

pub use assist::AssistState;
pub use catalog::CatalogState;
pub use db::DbState;
pub use invoice::{InvoiceState, ParsingGuard};
pub use settings::SettingsState;
