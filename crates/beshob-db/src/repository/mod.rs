//! # Repository Module
//!
//! Storage access for Beshob Invoice.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Desk command                                                           │
//! │       │  db.settings().save(&settings)                                  │
//! │       ▼                                                                 │
//! │  SettingsRepository / CatalogRepository   ← typed documents, JSON       │
//! │       │  storage.put(SETTINGS_KEY, json)                                │
//! │       ▼                                                                 │
//! │  KvRepository                             ← raw strings, SQL            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  app_storage table                                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`kv::KvRepository`] - get/put/delete of raw string values
//! - [`settings::SettingsRepository`] - the Settings document
//! - [`catalog::CatalogRepository`] - the product list

pub mod catalog;
pub mod kv;
pub mod settings;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DbError, DbResult};

/// Reads and parses the JSON document stored under `key`.
///
/// `Ok(None)` when the key was never written.
pub(crate) async fn load_document<T: DeserializeOwned>(
    storage: &kv::KvRepository,
    key: &str,
) -> DbResult<Option<T>> {
    let Some(raw) = storage.get(key).await? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| DbError::corrupt(key, e))
}

/// Serializes `value` and rewrites the whole document under `key`.
pub(crate) async fn save_document<T: Serialize>(
    storage: &kv::KvRepository,
    key: &str,
    value: &T,
) -> DbResult<()> {
    let raw = serde_json::to_string(value)?;
    storage.put(key, &raw).await
}
