//! # Pricing/Resolution Engine
//!
//! Resolves free-text product and size entries against the catalog, and
//! derives the invoice totals from items and settings.
//!
//! ## Derivation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  recompute_totals(document, settings)                                   │
//! │                                                                         │
//! │  1. subtotal        = Σ item.price × item.quantity                      │
//! │  2. delivery_charge = settings fee for document.delivery_type           │
//! │                       (overrides whatever was set before)               │
//! │  3. total           = subtotal + delivery_charge − discount_amount      │
//! │  4. due             = max(0, total − advance_payment)                   │
//! │                                                                         │
//! │  Pure and idempotent: same document + settings → same result.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Resolution Rules
//! ```text
//! Item 0: name "Honey" size "1kg" price ৳800   (user picked 1kg by hand)
//!      │
//!      ├── retype "honey "      → same product, size/price kept
//!      ├── pick "Pure Mustard Oil" → new product, reset to 1L / ৳250
//!      └── type "Jam"           → no match, only the name changes
//! ```
//!
//! Settings and catalog are always passed in; nothing here reads ambient
//! state.

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::settings::Settings;
use crate::types::{normalize_name, InvoiceDocument, InvoiceItem, Product};

pub use crate::merge::{apply_location_guess, apply_parsed_fields};

// =============================================================================
// Resolution
// =============================================================================

/// Looks up a product by name, trimmed and case-insensitive.
///
/// This is the only place product names are compared. When several stored
/// products share a normalized name the first one wins.
///
/// ## Example
/// ```rust
/// use beshob_core::{pricing, Catalog};
///
/// let catalog = Catalog::default();
/// assert!(pricing::resolve_by_name(&catalog, "  organic HONEY").is_some());
/// assert!(pricing::resolve_by_name(&catalog, "Jam").is_none());
/// ```
pub fn resolve_by_name<'a>(catalog: &'a Catalog, name: &str) -> Option<&'a Product> {
    let wanted = normalize_name(name);
    if wanted.is_empty() {
        return None;
    }

    catalog
        .products()
        .iter()
        .find(|p| normalize_name(&p.name) == wanted)
}

/// Sets the product name on one line, resolving it against the catalog.
///
/// ## Rules
/// - Match found, it has sizes, and the previous name (normalized) differs:
///   size and price reset to the product's first size
/// - Otherwise only `name` changes, so a hand-adjusted size or price
///   survives retyping the same product
///
/// Returns a new list; `items` is left as it was.
pub fn resolve_product_selection(
    catalog: &Catalog,
    items: &[InvoiceItem],
    index: usize,
    new_name: &str,
) -> CoreResult<Vec<InvoiceItem>> {
    let current = item_at(items, index)?;

    let mut updated = current.clone();
    updated.name = new_name.to_string();

    if let Some(first) = resolve_by_name(catalog, new_name).and_then(Product::first_size) {
        if normalize_name(&current.name) != normalize_name(new_name) {
            updated.size = first.label.clone();
            updated.price = first.price;
        }
    }

    Ok(replace_at(items, index, updated))
}

/// Sets the size on one line, pricing it from the catalog when possible.
///
/// ## Rules
/// - `size` is always set to `new_size_label` (free-text sizes are allowed)
/// - When the line's name resolves and that product has a size with exactly
///   this label, `price` becomes that size's price
pub fn resolve_size_selection(
    catalog: &Catalog,
    items: &[InvoiceItem],
    index: usize,
    new_size_label: &str,
) -> CoreResult<Vec<InvoiceItem>> {
    let current = item_at(items, index)?;

    let mut updated = current.clone();
    updated.size = new_size_label.to_string();

    if let Some(size) = resolve_by_name(catalog, &current.name)
        .and_then(|product| product.size(new_size_label))
    {
        updated.price = size.price;
    }

    Ok(replace_at(items, index, updated))
}

fn item_at(items: &[InvoiceItem], index: usize) -> CoreResult<&InvoiceItem> {
    items.get(index).ok_or(CoreError::ItemIndexOutOfRange {
        index,
        len: items.len(),
    })
}

fn replace_at(items: &[InvoiceItem], index: usize, item: InvoiceItem) -> Vec<InvoiceItem> {
    let mut next = items.to_vec();
    next[index] = item;
    next
}

// =============================================================================
// Totals
// =============================================================================

/// Sum of line totals.
pub fn subtotal(items: &[InvoiceItem]) -> Money {
    items.iter().map(InvoiceItem::line_total).sum()
}

/// Derives subtotal, delivery charge, total and due, in that order.
///
/// ## Example
/// ```rust
/// use beshob_core::{pricing, InvoiceSession, Money, Settings};
/// use chrono::NaiveDate;
///
/// let settings = Settings::default();
/// let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let mut doc = InvoiceSession::new_draft(&settings, today).document().clone();
///
/// doc.items[0].price = Money::from_taka(450);
/// doc.items[0].quantity = 2;
/// doc.delivery_charge = Money::from_taka(5); // overwritten below
///
/// let doc = pricing::recompute_totals(&doc, &settings);
/// assert_eq!(doc.subtotal, Money::from_taka(900));
/// assert_eq!(doc.delivery_charge, Money::from_taka(60));
/// assert_eq!(doc.total, Money::from_taka(960));
/// assert_eq!(doc.due, Money::from_taka(960));
/// ```
pub fn recompute_totals(document: &InvoiceDocument, settings: &Settings) -> InvoiceDocument {
    let mut next = document.clone();

    next.subtotal = subtotal(&next.items);
    next.delivery_charge = settings.delivery_charge_for(next.delivery_type);
    next.total = next.subtotal + next.delivery_charge - next.discount_amount;
    next.due = (next.total - next.advance_payment).clamp_non_negative();

    next
}

// =============================================================================
// Numbering
// =============================================================================

/// The invoice number a new draft gets: prefix followed by the counter.
///
/// Does not advance the counter.
pub fn generate_invoice_number(settings: &Settings) -> String {
    format!("{}{}", settings.invoice_prefix, settings.next_invoice_number)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::InvoiceSession;
    use crate::types::{new_id, DeliveryType, ProductSize};
    use chrono::NaiveDate;

    fn item(name: &str, size: &str, quantity: u32, taka: i64) -> InvoiceItem {
        InvoiceItem {
            id: new_id(),
            name: name.to_string(),
            size: size.to_string(),
            quantity,
            price: Money::from_taka(taka),
        }
    }

    fn draft(settings: &Settings) -> InvoiceDocument {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        InvoiceSession::new_draft(settings, today).document().clone()
    }

    fn honey_catalog() -> Catalog {
        Catalog::new(vec![
            Product {
                id: new_id(),
                name: "Honey".to_string(),
                sizes: vec![
                    ProductSize::new("500gm", Money::from_taka(450)),
                    ProductSize::new("1kg", Money::from_taka(800)),
                ],
            },
            Product {
                id: new_id(),
                name: "Pure Mustard Oil".to_string(),
                sizes: vec![ProductSize::new("1L", Money::from_taka(250))],
            },
            Product {
                id: new_id(),
                name: "Sizeless".to_string(),
                sizes: vec![],
            },
        ])
    }

    // -------------------------------------------------------------------------
    // resolve_by_name
    // -------------------------------------------------------------------------

    #[test]
    fn test_resolve_by_name_normalizes() {
        let catalog = honey_catalog();
        assert_eq!(resolve_by_name(&catalog, " HONEY ").map(|p| p.name.as_str()), Some("Honey"));
        assert!(resolve_by_name(&catalog, "Hon").is_none());
        assert!(resolve_by_name(&catalog, "   ").is_none());
    }

    #[test]
    fn test_resolve_by_name_first_match_wins() {
        let first = Product {
            id: "first".to_string(),
            name: "Ghee".to_string(),
            sizes: vec![],
        };
        let second = Product {
            id: "second".to_string(),
            name: " ghee".to_string(),
            sizes: vec![],
        };
        let catalog = Catalog::new(vec![first, second]);

        assert_eq!(resolve_by_name(&catalog, "GHEE").map(|p| p.id.as_str()), Some("first"));
    }

    // -------------------------------------------------------------------------
    // resolve_product_selection
    // -------------------------------------------------------------------------

    #[test]
    fn test_new_product_resets_to_first_size() {
        let catalog = honey_catalog();
        let items = vec![item("", "", 1, 0)];

        let next = resolve_product_selection(&catalog, &items, 0, "honey").unwrap();
        assert_eq!(next[0].name, "honey");
        assert_eq!(next[0].size, "500gm");
        assert_eq!(next[0].price, Money::from_taka(450));

        // input untouched
        assert_eq!(items[0].name, "");
    }

    #[test]
    fn test_same_product_keeps_customized_size_and_price() {
        let catalog = honey_catalog();
        let items = vec![item("Honey", "1kg", 1, 780)];

        let next = resolve_product_selection(&catalog, &items, 0, " honey ").unwrap();
        assert_eq!(next[0].name, " honey ");
        assert_eq!(next[0].size, "1kg");
        assert_eq!(next[0].price, Money::from_taka(780));

        let again = resolve_product_selection(&catalog, &next, 0, "Honey").unwrap();
        assert_eq!(again[0].size, "1kg");
        assert_eq!(again[0].price, Money::from_taka(780));
    }

    #[test]
    fn test_switching_product_resets_size_and_price() {
        let catalog = honey_catalog();
        let items = vec![item("Honey", "1kg", 3, 800)];

        let next = resolve_product_selection(&catalog, &items, 0, "Pure Mustard Oil").unwrap();
        assert_eq!(next[0].size, "1L");
        assert_eq!(next[0].price, Money::from_taka(250));
        assert_eq!(next[0].quantity, 3);
    }

    #[test]
    fn test_unmatched_or_sizeless_only_renames() {
        let catalog = honey_catalog();
        let items = vec![item("Honey", "1kg", 1, 800)];

        let next = resolve_product_selection(&catalog, &items, 0, "Jam").unwrap();
        assert_eq!(next[0].name, "Jam");
        assert_eq!(next[0].size, "1kg");
        assert_eq!(next[0].price, Money::from_taka(800));

        let next = resolve_product_selection(&catalog, &items, 0, "Sizeless").unwrap();
        assert_eq!(next[0].size, "1kg");
        assert_eq!(next[0].price, Money::from_taka(800));
    }

    #[test]
    fn test_product_selection_out_of_range() {
        let catalog = honey_catalog();
        let items = vec![item("", "", 1, 0)];

        assert!(matches!(
            resolve_product_selection(&catalog, &items, 1, "Honey"),
            Err(CoreError::ItemIndexOutOfRange { index: 1, len: 1 })
        ));
    }

    // -------------------------------------------------------------------------
    // resolve_size_selection
    // -------------------------------------------------------------------------

    #[test]
    fn test_size_selection_prices_from_catalog() {
        let catalog = honey_catalog();
        let items = vec![item("honey", "500gm", 1, 450)];

        let next = resolve_size_selection(&catalog, &items, 0, "1kg").unwrap();
        assert_eq!(next[0].size, "1kg");
        assert_eq!(next[0].price, Money::from_taka(800));
    }

    #[test]
    fn test_size_selection_free_text_keeps_price() {
        let catalog = honey_catalog();

        let items = vec![item("Honey", "500gm", 1, 450)];
        let next = resolve_size_selection(&catalog, &items, 0, "1KG").unwrap();
        assert_eq!(next[0].size, "1KG");
        assert_eq!(next[0].price, Money::from_taka(450));

        let items = vec![item("Jam", "", 1, 120)];
        let next = resolve_size_selection(&catalog, &items, 0, "Jar").unwrap();
        assert_eq!(next[0].size, "Jar");
        assert_eq!(next[0].price, Money::from_taka(120));
    }

    // -------------------------------------------------------------------------
    // recompute_totals
    // -------------------------------------------------------------------------

    #[test]
    fn test_honey_scenario() {
        let settings = Settings::default();
        let mut doc = draft(&settings);
        doc.items = vec![item("Honey", "500gm", 2, 450)];

        let doc = recompute_totals(&doc, &settings);
        assert_eq!(doc.subtotal, Money::from_taka(900));
        assert_eq!(doc.delivery_charge, Money::from_taka(60));
        assert_eq!(doc.total, Money::from_taka(960));
        assert_eq!(doc.due, Money::from_taka(960));

        let mut paid = doc.clone();
        paid.advance_payment = Money::from_taka(1000);
        let paid = recompute_totals(&paid, &settings);
        assert_eq!(paid.due, Money::zero());
        assert_eq!(paid.total, Money::from_taka(960));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let settings = Settings::default();
        let mut doc = draft(&settings);
        doc.items = vec![item("Honey", "500gm", 2, 450), item("Oil", "5L", 1, 1200)];
        doc.discount_amount = Money::from_taka(100);
        doc.advance_payment = Money::from_taka(500);

        let once = recompute_totals(&doc, &settings);
        let twice = recompute_totals(&once, &settings);
        assert_eq!(once, twice);
        assert_eq!(once.subtotal, Money::from_taka(2100));
        assert_eq!(once.total, Money::from_taka(2060));
        assert_eq!(once.due, Money::from_taka(1560));
    }

    #[test]
    fn test_delivery_charge_always_from_settings() {
        let settings = Settings::default();
        let mut doc = draft(&settings);
        doc.delivery_type = DeliveryType::OutsideDhaka;
        doc.delivery_charge = Money::from_taka(9999);

        let doc = recompute_totals(&doc, &settings);
        assert_eq!(doc.delivery_charge, Money::from_taka(120));
    }

    #[test]
    fn test_discount_can_make_total_negative_but_not_due() {
        let settings = Settings::default();
        let mut doc = draft(&settings);
        doc.items = vec![item("Honey", "500gm", 1, 100)];
        doc.discount_amount = Money::from_taka(500);

        let doc = recompute_totals(&doc, &settings);
        assert_eq!(doc.total, Money::from_taka(-340));
        assert_eq!(doc.due, Money::zero());
    }

    #[test]
    fn test_subtotal_exact_with_poisha() {
        let items = vec![
            InvoiceItem {
                price: Money::from_poisha(3333),
                quantity: 3,
                ..item("A", "", 0, 0)
            },
            item("B", "", 0, 500),
        ];
        assert_eq!(subtotal(&items), Money::from_poisha(9999));
    }

    #[test]
    fn test_generate_invoice_number() {
        let mut settings = Settings::default();
        assert_eq!(generate_invoice_number(&settings), "INV-1001");

        settings.invoice_prefix = String::new();
        settings.next_invoice_number = 42;
        assert_eq!(generate_invoice_number(&settings), "42");
        assert_eq!(settings.next_invoice_number, 42);
    }
}
