//! # Database State
//!
//! Wraps the `Database` connection for use in commands.
//!
//! ## Thread Safety
//! The `Database` struct from `beshob-db` contains a `SqlitePool` which
//! is inherently thread-safe. No explicit locking here.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn update_settings(
//!     db: &DbState,
//!     settings: &SettingsState,
//!     update: SettingsUpdate,
//! ) -> ApiResult<Settings> {
//!     ...
//!     db.inner().settings().save(&next).await?;
//! }
//! ```

use beshob_db::Database;

/// Wrapper around `Database` for state management.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
