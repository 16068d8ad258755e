//! # Error Types
//!
//! Domain-specific error types for beshob-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  beshob-core errors (this file)                                         │
//! │  ├── CoreError        - Editing and lifecycle failures                  │
//! │  └── ValidationError  - Catalog/settings input failures                 │
//! │                                                                         │
//! │  beshob-db errors (separate crate)                                      │
//! │  └── DbError          - Storage failures, corrupt documents             │
//! │                                                                         │
//! │  Desk API errors (in app)                                               │
//! │  └── ApiError         - What the presentation layer sees (serialized)   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Free-text invoice fields never produce errors: numbers coerce to zero and
//! phone input is sanitized. Errors here come from catalog authoring, settings
//! edits, bad item indexes, and edits against a committed invoice.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An item index does not point into the document's item list.
    ///
    /// ## When This Occurs
    /// - The presentation layer sent an index from a stale render
    /// - An item was removed between two edits
    #[error("Item index {index} is out of range (document has {len} items)")]
    ItemIndexOutOfRange { index: usize, len: usize },

    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Size cannot be found on the in-progress product.
    #[error("Size not found: {0}")]
    SizeNotFound(String),

    /// The invoice was already committed and is read-only.
    ///
    /// ## User Workflow
    /// ```text
    /// Print invoice INV-1001
    ///      │
    ///      ▼
    /// Session: Committed (counter advanced to 1002)
    ///      │
    ///      ▼
    /// Edit customer name
    ///      │
    ///      ▼
    /// InvoiceCommitted { invoice_number: "INV-1001" }
    ///      │
    ///      ▼
    /// UI shows: "Invoice INV-1001 is already committed; start a new invoice"
    /// ```
    #[error("Invoice {invoice_number} is already committed; start a new invoice")]
    InvoiceCommitted { invoice_number: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by catalog authoring and settings edits before anything changes.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// A collection that needs at least one entry is empty.
    #[error("{field} needs at least one entry")]
    Empty { field: String },

    /// Duplicate value (e.g., a product name that already exists).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
