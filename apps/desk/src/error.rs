//! # API Error Type
//!
//! Unified error type for desk commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Beshob Invoice                         │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  invoke('save_product_draft')                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  Command Function → Result<T, ApiError>                          │   │
//! │  │         │                                                        │   │
//! │  │         ├── CoreError::Validation(Duplicate) → VALIDATION_ERROR  │   │
//! │  │         ├── CoreError::InvoiceCommitted      → INVOICE_COMMITTED │   │
//! │  │         ├── DbError::QueryFailed             → DATABASE_ERROR    │   │
//! │  │         └── magic fill already running       → BUSY              │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  catch (e) { e.code === 'BUSY' ... e.message }                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Assist failures never reach this type; they degrade to "nothing parsed".

use serde::Serialize;

use beshob_core::{CoreError, ValidationError};
use beshob_db::DbError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVOICE_COMMITTED",
///   "message": "Invoice INV-1001 is committed; start a new invoice to edit"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product, size or line item not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Storage operation failed
    DatabaseError,

    /// Edit attempted on a committed invoice
    InvoiceCommitted,

    /// Magic fill already in progress
    Busy,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a busy error.
    pub fn busy(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Busy, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Corrupt { key, reason } => {
                tracing::error!(key = %key, reason = %reason, "Corrupt stored document");
                ApiError::new(ErrorCode::DatabaseError, "Stored data is unreadable")
            }
            DbError::Serialization(e) => {
                tracing::error!("Serialization failed: {}", e);
                ApiError::internal("Could not encode data for storage")
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemIndexOutOfRange { index, len } => ApiError::new(
                ErrorCode::NotFound,
                format!("Line item {} does not exist ({} lines)", index, len),
            ),
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::SizeNotFound(id) => ApiError::not_found("Size", &id),
            CoreError::InvoiceCommitted { invoice_number } => ApiError::new(
                ErrorCode::InvoiceCommitted,
                format!(
                    "Invoice {} is committed; start a new invoice to edit",
                    invoice_number
                ),
            ),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;
