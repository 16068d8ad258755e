//! # Catalog Repository
//!
//! Loads and saves the product list as one JSON array.

use tracing::{info, warn};

use beshob_core::Catalog;

use super::kv::KvRepository;
use super::{load_document, save_document};
use crate::error::DbResult;
use crate::PRODUCTS_KEY;

/// Repository for the product Catalog.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    storage: KvRepository,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(storage: KvRepository) -> Self {
        CatalogRepository { storage }
    }

    /// Loads the stored catalog, `None` when never saved.
    ///
    /// An empty stored array is a real (empty) catalog, not a missing one.
    pub async fn load(&self) -> DbResult<Option<Catalog>> {
        load_document(&self.storage, PRODUCTS_KEY).await
    }

    /// Loads the stored catalog, falling back to the first-run catalog when
    /// missing or unreadable.
    pub async fn load_or_default(&self) -> DbResult<Catalog> {
        match self.load().await {
            Ok(Some(catalog)) => Ok(catalog),
            Ok(None) => {
                info!("No stored catalog, using defaults");
                Ok(Catalog::default())
            }
            Err(e) if e.is_corrupt() => {
                warn!(error = %e, "Stored catalog unreadable, using defaults");
                Ok(Catalog::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Rewrites the whole product list.
    pub async fn save(&self, catalog: &Catalog) -> DbResult<()> {
        save_document(&self.storage, PRODUCTS_KEY, catalog).await?;
        info!(products = catalog.len(), "Catalog saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use beshob_core::{Catalog, Money, ProductDraft};

    use crate::{Database, DbConfig, PRODUCTS_KEY};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_missing_key_yields_default_catalog() {
        let db = db().await;
        let catalog = db.catalog().load_or_default().await.unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.resolve_by_name("organic honey").is_some());
    }

    #[tokio::test]
    async fn test_round_trip_preserves_order_and_prices() {
        let db = db().await;
        let mut catalog = Catalog::default();

        let mut draft = ProductDraft::with_name("Ghee");
        draft.add_size("250gm", Money::from_taka(520)).unwrap();
        catalog.add_product(draft).unwrap();

        db.catalog().save(&catalog).await.unwrap();
        let loaded = db.catalog().load().await.unwrap().unwrap();

        assert_eq!(loaded, catalog);
        let names: Vec<&str> = loaded.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Organic Honey", "Pure Mustard Oil", "Ghee"]);
    }

    #[tokio::test]
    async fn test_empty_catalog_stays_empty() {
        let db = db().await;
        db.catalog().save(&Catalog::empty()).await.unwrap();

        let loaded = db.catalog().load_or_default().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_falls_back() {
        let db = db().await;
        db.storage().put(PRODUCTS_KEY, "[{\"id\":").await.unwrap();

        let catalog = db.catalog().load_or_default().await.unwrap();
        assert_eq!(catalog.len(), 2);
    }
}
