//! # Catalog Store
//!
//! The list of sellable products and the in-progress product draft used by
//! the admin panel.
//!
//! ## Authoring Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Admin: New Product                                                     │
//! │                                                                         │
//! │  ProductDraft::new()                                                    │
//! │       │                                                                 │
//! │       ├── set name "Pure Ghee"                                          │
//! │       ├── add_size("500gm", ৳650)   ← rejects empty label / price ≤ 0  │
//! │       ├── add_size("1kg", ৳1250)                                        │
//! │       ├── remove_size(id)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog::add_product(draft)                                            │
//! │       ├── build(): name required, ≥ 1 size                              │
//! │       └── name not already in catalog (trimmed, case-insensitive)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog edits affect future resolution only. Items already placed on an
//! invoice keep their copied name, size and price.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing;
use crate::types::{new_id, Product, ProductSize};
use crate::validation::{
    validate_catalog_price, validate_product_name, validate_size_label, ValidationResult,
};

// =============================================================================
// Catalog
// =============================================================================

/// Ordered list of products. Serialized as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Default for Catalog {
    /// The first-run catalog: Organic Honey and Pure Mustard Oil.
    fn default() -> Self {
        Self::new(vec![
            Product {
                id: new_id(),
                name: "Organic Honey".to_string(),
                sizes: vec![
                    ProductSize::new("500gm", Money::from_taka(450)),
                    ProductSize::new("1kg", Money::from_taka(800)),
                ],
            },
            Product {
                id: new_id(),
                name: "Pure Mustard Oil".to_string(),
                sizes: vec![
                    ProductSize::new("1L", Money::from_taka(250)),
                    ProductSize::new("5L", Money::from_taka(1200)),
                ],
            },
        ])
    }
}

impl Catalog {
    /// Wraps an existing product list (e.g. one loaded from storage).
    ///
    /// Stored lists are taken as-is, duplicates included; lookup then picks
    /// the first match.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// A catalog with no products.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Finds a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Finds a product by name. See [`pricing::resolve_by_name`].
    pub fn resolve_by_name(&self, name: &str) -> Option<&Product> {
        pricing::resolve_by_name(self, name)
    }

    /// Builds a draft into a product and appends it.
    ///
    /// ## Errors
    /// - `ValidationError::Required` / `Empty` from [`ProductDraft::build`]
    /// - `ValidationError::Duplicate` when a product with the same
    ///   normalized name exists
    pub fn add_product(&mut self, draft: ProductDraft) -> CoreResult<Product> {
        let product = draft.build()?;

        if self.resolve_by_name(&product.name).is_some() {
            return Err(ValidationError::Duplicate {
                field: "product name".to_string(),
                value: product.name.trim().to_string(),
            }
            .into());
        }

        self.products.push(product.clone());
        Ok(product)
    }

    /// Removes a product by id. Invoice items are not touched.
    pub fn remove_product(&mut self, id: &str) -> CoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        Ok(self.products.remove(index))
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// The product being put together in the admin panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,
    pub sizes: Vec<ProductSize>,
}

impl ProductDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sizes: Vec::new(),
        }
    }

    /// Adds a priced size to the draft.
    ///
    /// ## Rules
    /// - Label must not be empty
    /// - Price must be positive (stricter than invoice lines, which allow ৳0)
    pub fn add_size(&mut self, label: &str, price: Money) -> ValidationResult<&ProductSize> {
        let label = label.trim();
        validate_size_label(label)?;
        validate_catalog_price(price)?;

        self.sizes.push(ProductSize::new(label, price));
        let last = self.sizes.len() - 1;
        Ok(&self.sizes[last])
    }

    /// Removes a size by id.
    pub fn remove_size(&mut self, size_id: &str) -> CoreResult<ProductSize> {
        let index = self
            .sizes
            .iter()
            .position(|s| s.id == size_id)
            .ok_or_else(|| CoreError::SizeNotFound(size_id.to_string()))?;

        Ok(self.sizes.remove(index))
    }

    /// Turns the draft into a product with a fresh id.
    ///
    /// ## Rules
    /// - Name is required
    /// - At least one size
    pub fn build(self) -> ValidationResult<Product> {
        validate_product_name(&self.name)?;

        if self.sizes.is_empty() {
            return Err(ValidationError::Empty {
                field: "sizes".to_string(),
            });
        }

        Ok(Product {
            id: new_id(),
            name: self.name.trim().to_string(),
            sizes: self.sizes,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ghee_draft() -> ProductDraft {
        let mut draft = ProductDraft::with_name("Pure Ghee");
        draft.add_size("500gm", Money::from_taka(650)).unwrap();
        draft
    }

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 2);

        let honey = catalog.resolve_by_name("organic honey").unwrap();
        assert_eq!(honey.sizes[0].label, "500gm");
        assert_eq!(honey.sizes[0].price, Money::from_taka(450));
    }

    #[test]
    fn test_draft_add_size_rules() {
        let mut draft = ProductDraft::with_name("Pure Ghee");

        assert!(matches!(
            draft.add_size("", Money::from_taka(100)),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            draft.add_size("1kg", Money::zero()),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(draft.sizes.is_empty());

        let size_id = draft.add_size("1kg", Money::from_taka(1250)).unwrap().id.clone();
        assert_eq!(draft.sizes.len(), 1);

        draft.remove_size(&size_id).unwrap();
        assert!(draft.sizes.is_empty());
        assert!(matches!(
            draft.remove_size(&size_id),
            Err(CoreError::SizeNotFound(_))
        ));
    }

    #[test]
    fn test_build_requires_name_and_sizes() {
        let mut nameless = ProductDraft::new();
        nameless.add_size("1kg", Money::from_taka(100)).unwrap();
        assert!(matches!(nameless.build(), Err(ValidationError::Required { .. })));

        let sizeless = ProductDraft::with_name("Pure Ghee");
        assert!(matches!(sizeless.build(), Err(ValidationError::Empty { .. })));
    }

    #[test]
    fn test_add_product() {
        let mut catalog = Catalog::default();
        let product = catalog.add_product(ghee_draft()).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(&product.id).map(|p| p.name.as_str()), Some("Pure Ghee"));
    }

    #[test]
    fn test_add_product_rejects_duplicate_name() {
        let mut catalog = Catalog::default();
        let mut draft = ProductDraft::with_name("  ORGANIC honey ");
        draft.add_size("2kg", Money::from_taka(1500)).unwrap();

        let err = catalog.add_product(draft).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_remove_product() {
        let mut catalog = Catalog::default();
        let id = catalog.products()[0].id.clone();

        let removed = catalog.remove_product(&id).unwrap();
        assert_eq!(removed.name, "Organic Honey");
        assert!(catalog.resolve_by_name("Organic Honey").is_none());
        assert!(matches!(
            catalog.remove_product(&id),
            Err(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_serializes_as_array() {
        let catalog = Catalog::new(vec![]);
        assert_eq!(serde_json::to_string(&catalog).unwrap(), "[]");
    }
}
