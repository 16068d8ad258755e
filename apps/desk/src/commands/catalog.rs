//! # Catalog Commands
//!
//! Product list and the admin-panel product draft.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Admin panel → "Add product"                                            │
//! │                                                                         │
//! │  set_draft_name("Ghee")                                                 │
//! │  add_draft_size("250gm", "520")     ← price text coerced, must be > 0   │
//! │  add_draft_size("500gm", "980")                                         │
//! │  save_product_draft()               ← name + at least one size,         │
//! │       │                               name not already in catalog       │
//! │       ├── catalog saved (whole list)                                    │
//! │       └── draft cleared                                                 │
//! │                                                                         │
//! │  delete_product(id)                 ← invoice lines keep their copies   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use beshob_core::validation::parse_amount;
use beshob_core::{Product, ProductDraft};

use crate::error::ApiResult;
use crate::state::{CatalogState, DbState};

/// Lists all products in catalog order.
pub fn list_products(catalog: &CatalogState) -> Vec<Product> {
    debug!("list_products command");
    catalog.with_catalog(|c| c.products().to_vec())
}

/// Gets the product draft.
pub fn get_product_draft(catalog: &CatalogState) -> ProductDraft {
    catalog.with_draft(ProductDraft::clone)
}

/// Sets the draft's product name. Validated on save.
pub fn set_draft_name(catalog: &CatalogState, name: &str) -> ProductDraft {
    catalog.with_draft_mut(|d| {
        d.name = name.to_string();
        d.clone()
    })
}

/// Adds a priced size to the draft.
///
/// ## Errors
/// - `VALIDATION_ERROR` for an empty label or a price that isn't positive
pub fn add_draft_size(catalog: &CatalogState, label: &str, price: &str) -> ApiResult<ProductDraft> {
    let price = parse_amount(price);
    debug!(label = %label, price = %price, "add_draft_size command");

    let draft = catalog.with_draft_mut(|d| {
        d.add_size(label, price)?;
        Ok::<_, beshob_core::ValidationError>(d.clone())
    })?;

    Ok(draft)
}

/// Removes a size from the draft.
pub fn remove_draft_size(catalog: &CatalogState, size_id: &str) -> ApiResult<ProductDraft> {
    let draft = catalog.with_draft_mut(|d| {
        d.remove_size(size_id)?;
        Ok::<_, beshob_core::CoreError>(d.clone())
    })?;

    Ok(draft)
}

/// Discards the draft.
pub fn clear_product_draft(catalog: &CatalogState) -> ProductDraft {
    catalog.with_draft_mut(|d| {
        *d = ProductDraft::new();
        d.clone()
    })
}

/// Adds the draft to the catalog and persists the whole list.
///
/// The draft is kept on any failure so the user can correct it.
pub async fn save_product_draft(db: &DbState, catalog: &CatalogState) -> ApiResult<Product> {
    debug!("save_product_draft command");

    let draft = get_product_draft(catalog);
    let mut next = catalog.snapshot();
    let product = next.add_product(draft)?;

    db.inner().catalog().save(&next).await?;

    catalog.replace(next);
    clear_product_draft(catalog);

    info!(product = %product.name, sizes = product.sizes.len(), "Product added");
    Ok(product)
}

/// Removes a product. Invoice items already using it are unaffected.
pub async fn delete_product(db: &DbState, catalog: &CatalogState, id: &str) -> ApiResult<Product> {
    debug!(id = %id, "delete_product command");

    let mut next = catalog.snapshot();
    let removed = next.remove_product(id)?;

    db.inner().catalog().save(&next).await?;
    catalog.replace(next);

    info!(product = %removed.name, "Product deleted");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::invoice::edit_invoice;
    use crate::error::ErrorCode;
    use crate::testing::open_app;
    use beshob_core::{InvoiceEdit, Money};

    #[tokio::test]
    async fn test_draft_to_catalog() {
        let app = open_app(Default::default()).await;

        set_draft_name(&app.catalog, "Ghee");
        add_draft_size(&app.catalog, "250gm", "৳520").unwrap();
        let draft = add_draft_size(&app.catalog, "500gm", "980").unwrap();
        assert_eq!(draft.sizes.len(), 2);

        let product = save_product_draft(&app.db, &app.catalog).await.unwrap();
        assert_eq!(product.sizes[0].price, Money::from_taka(520));
        assert!(get_product_draft(&app.catalog).name.is_empty());

        let stored = app.db.inner().catalog().load().await.unwrap().unwrap();
        assert_eq!(stored.len(), 3);

        let doc = edit_invoice(
            &app.catalog,
            &app.settings,
            &app.invoice,
            InvoiceEdit::ItemName {
                index: 0,
                name: "ghee".to_string(),
            },
        )
        .unwrap();
        assert_eq!(doc.items[0].price, Money::from_taka(520));
    }

    #[tokio::test]
    async fn test_draft_rules() {
        let app = open_app(Default::default()).await;

        let err = add_draft_size(&app.catalog, "1kg", "abc").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_draft_size(&app.catalog, "  ", "100").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // no name
        add_draft_size(&app.catalog, "1kg", "100").unwrap();
        let err = save_product_draft(&app.db, &app.catalog).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_product_draft(&app.catalog).sizes.len(), 1);

        // duplicate name
        set_draft_name(&app.catalog, " ORGANIC honey");
        let err = save_product_draft(&app.db, &app.catalog).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(list_products(&app.catalog).len(), 2);
    }

    #[tokio::test]
    async fn test_remove_draft_size() {
        let app = open_app(Default::default()).await;
        let draft = add_draft_size(&app.catalog, "1kg", "100").unwrap();
        let id = draft.sizes[0].id.clone();

        assert!(remove_draft_size(&app.catalog, &id).unwrap().sizes.is_empty());
        let err = remove_draft_size(&app.catalog, &id).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_keeps_invoice_lines() {
        let app = open_app(Default::default()).await;

        edit_invoice(
            &app.catalog,
            &app.settings,
            &app.invoice,
            InvoiceEdit::ItemName {
                index: 0,
                name: "Organic Honey".to_string(),
            },
        )
        .unwrap();

        let honey_id = list_products(&app.catalog)[0].id.clone();
        delete_product(&app.db, &app.catalog, &honey_id).await.unwrap();

        assert_eq!(list_products(&app.catalog).len(), 1);
        let doc = app.invoice.with_session(|s| s.document().clone());
        assert_eq!(doc.items[0].name, "Organic Honey");
        assert_eq!(doc.items[0].price, Money::from_taka(450));

        let err = delete_product(&app.db, &app.catalog, &honey_id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
