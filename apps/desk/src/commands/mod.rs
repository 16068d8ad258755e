//! # Desk Commands
//!
//! Everything the invoice screen and admin panel can ask for.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── invoice.rs  ◄─── Form edits, commit, reset, view
//! ├── assist.rs   ◄─── Magic fill, location detection, review
//! ├── catalog.rs  ◄─── Product list and product draft
//! └── settings.rs ◄─── Settings and size vocabulary
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the session
//! fn get_invoice(invoice: &InvoiceState)
//!
//! // Resolution needs the catalog and fees
//! fn edit_invoice(catalog: &CatalogState, settings: &SettingsState, invoice: &InvoiceState, ...)
//!
//! // Anything persisted needs the database
//! async fn commit_invoice(db: &DbState, settings: &SettingsState, invoice: &InvoiceState)
//! ```
//!
//! Commands return [`ApiResult`](crate::error::ApiResult); errors serialize
//! to `{ code, message }`.

pub mod assist;
pub mod catalog;
pub mod invoice;
pub mod settings;
