//! # Settings Repository
//!
//! Loads and saves the business Settings document.
//!
//! ## Load Outcomes
//! ```text
//! ┌──────────────────────────────┬───────────────┬──────────────────────────┐
//! │ Stored value                 │ load()        │ load_or_default()        │
//! ├──────────────────────────────┼───────────────┼──────────────────────────┤
//! │ key missing (first run)      │ Ok(None)      │ Settings::default()      │
//! │ valid JSON                   │ Ok(Some(s))   │ s                        │
//! │ malformed JSON               │ Err(Corrupt)  │ default + warn!          │
//! │ SQLite failure               │ Err(..)       │ Err(..)                  │
//! └──────────────────────────────┴───────────────┴──────────────────────────┘
//! ```
//!
//! Missing fields in an older document take their default values.

use tracing::{info, warn};

use beshob_core::Settings;

use super::kv::KvRepository;
use super::{load_document, save_document};
use crate::error::DbResult;
use crate::SETTINGS_KEY;

/// Repository for the Settings document.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    storage: KvRepository,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(storage: KvRepository) -> Self {
        SettingsRepository { storage }
    }

    /// Loads the stored Settings, `None` when never saved.
    pub async fn load(&self) -> DbResult<Option<Settings>> {
        load_document(&self.storage, SETTINGS_KEY).await
    }

    /// Loads the stored Settings, falling back to defaults when missing or
    /// unreadable.
    pub async fn load_or_default(&self) -> DbResult<Settings> {
        match self.load().await {
            Ok(Some(settings)) => Ok(settings),
            Ok(None) => {
                info!("No stored settings, using defaults");
                Ok(Settings::default())
            }
            Err(e) if e.is_corrupt() => {
                warn!(error = %e, "Stored settings unreadable, using defaults");
                Ok(Settings::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Rewrites the whole Settings document.
    pub async fn save(&self, settings: &Settings) -> DbResult<()> {
        save_document(&self.storage, SETTINGS_KEY, settings).await?;
        info!(
            next_invoice_number = settings.next_invoice_number,
            "Settings saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use beshob_core::{Money, PaymentMethod};

    use crate::error::DbError;
    use crate::{Database, DbConfig, SETTINGS_KEY};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_missing_key_yields_defaults() {
        let db = db().await;
        assert!(db.settings().load().await.unwrap().is_none());

        let settings = db.settings().load_or_default().await.unwrap();
        assert_eq!(settings.next_invoice_number, 1001);
        assert_eq!(settings.invoice_prefix, "INV-");
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let db = db().await;
        let mut settings = db.settings().load_or_default().await.unwrap();
        settings.name = "Beshob Honey House".to_string();
        settings.next_invoice_number = 1042;
        settings.default_delivery_outside_dhaka = Money::from_taka(150);
        settings.default_payment_method = PaymentMethod::BKash;

        db.settings().save(&settings).await.unwrap();

        let loaded = db.settings().load().await.unwrap().unwrap();
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn test_malformed_json_falls_back() {
        let db = db().await;
        db.storage().put(SETTINGS_KEY, "{not json").await.unwrap();

        assert!(matches!(
            db.settings().load().await,
            Err(DbError::Corrupt { .. })
        ));

        let settings = db.settings().load_or_default().await.unwrap();
        assert_eq!(settings.next_invoice_number, 1001);
    }

    #[tokio::test]
    async fn test_partial_document_fills_defaults() {
        let db = db().await;
        db.storage()
            .put(SETTINGS_KEY, r#"{"name":"Old Shop","nextInvoiceNumber":7}"#)
            .await
            .unwrap();

        let settings = db.settings().load().await.unwrap().unwrap();
        assert_eq!(settings.name, "Old Shop");
        assert_eq!(settings.next_invoice_number, 7);
        assert_eq!(settings.invoice_prefix, "INV-");
    }
}
