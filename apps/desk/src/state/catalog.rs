//! # Catalog State
//!
//! The product catalog plus the product being composed in the admin form.
//!
//! ## Admin Form Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  set_draft_name("Ghee") ──────► draft.name = "Ghee"                     │
//! │  add_draft_size("250gm", "520") ─► draft.sizes.push(..)                 │
//! │  remove_draft_size(id) ────────► draft.sizes.retain(..)                 │
//! │                                                                         │
//! │  save_product_draft() ─────────► catalog.add_product(draft)             │
//! │                                  persist ─► draft reset to empty        │
//! │                                                                         │
//! │  Placed invoice items keep their copied name/size/price.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use beshob_core::{Catalog, ProductDraft};

/// Managed catalog and product draft.
#[derive(Debug)]
pub struct CatalogState {
    catalog: Arc<Mutex<Catalog>>,
    draft: Arc<Mutex<ProductDraft>>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(Mutex::new(catalog)),
            draft: Arc::new(Mutex::new(ProductDraft::new())),
        }
    }

    /// Returns a copy of the catalog.
    pub fn snapshot(&self) -> Catalog {
        self.with_catalog(Catalog::clone)
    }

    /// Replaces the catalog after it was persisted.
    pub fn replace(&self, catalog: Catalog) {
        self.with_catalog_mut(|c| *c = catalog);
    }

    /// Executes a function with read access to the catalog.
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Catalog) -> R,
    {
        let catalog = self.catalog.lock().expect("Catalog mutex poisoned");
        f(&catalog)
    }

    /// Executes a function with write access to the catalog.
    pub fn with_catalog_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Catalog) -> R,
    {
        let mut catalog = self.catalog.lock().expect("Catalog mutex poisoned");
        f(&mut catalog)
    }

    /// Executes a function with read access to the product draft.
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ProductDraft) -> R,
    {
        let draft = self.draft.lock().expect("Draft mutex poisoned");
        f(&draft)
    }

    /// Executes a function with write access to the product draft.
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ProductDraft) -> R,
    {
        let mut draft = self.draft.lock().expect("Draft mutex poisoned");
        f(&mut draft)
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}
