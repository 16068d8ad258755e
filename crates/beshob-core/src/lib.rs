//! # beshob-core: Pure Business Logic for Beshob Invoice
//!
//! This crate is the **heart** of Beshob Invoice. It contains the pricing,
//! resolution and invoice rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Beshob Invoice Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (invoice form + preview)           │   │
//! │  │   Magic Fill ──► Customer ──► Items ──► Payment ──► Print       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Desk Commands (apps/desk)                    │   │
//! │  │   edit_invoice, magic_fill, commit_invoice, save_product ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ beshob-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐           │   │
//! │  │   │ catalog  │ │ pricing  │ │  editor  │ │lifecycle │           │   │
//! │  │   │ Product  │ │ resolve  │ │InvoiceEd.│ │ Session  │           │   │
//! │  │   │ Settings │ │recompute │ │apply_edit│ │ commit   │           │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    beshob-db (Storage Layer)                    │   │
//! │  │           Settings + catalog documents in SQLite                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, InvoiceItem, InvoiceDocument, etc.)
//! - [`money`] - Money type with integer poisha arithmetic
//! - [`settings`] - Business-wide settings and the size vocabulary
//! - [`catalog`] - Product catalog and the in-progress product draft
//! - [`pricing`] - Product/size resolution and derived totals
//! - [`merge`] - Merging assist output into the document
//! - [`editor`] - One edit per form action, always recomputed
//! - [`lifecycle`] - Drafting → Committed → Reset
//! - [`view`] - Printable invoice view model
//! - [`validation`] - Business rule validation and input coercion
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use beshob_core::{pricing, InvoiceSession, Money, Settings};
//! use chrono::NaiveDate;
//!
//! let settings = Settings::default();
//! let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let session = InvoiceSession::new_draft(&settings, today);
//!
//! assert_eq!(session.document().invoice_number, "INV-1001");
//! // One blank item plus the inside-Dhaka fee
//! assert_eq!(session.document().total, Money::from_taka(60));
//! assert_eq!(pricing::generate_invoice_number(&settings), "INV-1001");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod editor;
pub mod error;
pub mod lifecycle;
pub mod merge;
pub mod money;
pub mod pricing;
pub mod settings;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, ProductDraft};
pub use editor::{apply_edit, InvoiceEdit};
pub use error::{CoreError, CoreResult, ValidationError};
pub use lifecycle::{InvoiceSession, InvoiceStatus};
pub use merge::{LocationGuess, ParsedInvoice, ParsedItem};
pub use money::Money;
pub use settings::{Settings, SettingsUpdate};
pub use types::*;
pub use view::InvoiceView;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of digits in a Bangladeshi mobile number.
///
/// Typed phone input is truncated to this length; anything shorter (but not
/// empty) is flagged as invalid.
pub const MAX_PHONE_DIGITS: usize = 11;

/// District a new draft starts with.
pub const DEFAULT_DISTRICT: &str = "Dhaka";

/// Districts offered by the district picker.
///
/// The district field itself is free text: an address guess may name a
/// district outside this list.
pub const DISTRICTS: [&str; 16] = [
    "Dhaka",
    "Chittagong",
    "Rajshahi",
    "Khulna",
    "Sylhet",
    "Barisal",
    "Rangpur",
    "Mymensingh",
    "Gazipur",
    "Narayanganj",
    "Comilla",
    "Noakhali",
    "Bogura",
    "Kushtia",
    "Pabna",
    "Jashore",
];
