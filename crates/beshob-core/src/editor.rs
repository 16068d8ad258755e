//! # Invoice Editor
//!
//! One [`InvoiceEdit`] per form action. [`apply_edit`] applies it and always
//! returns a recomputed document, so derived totals can never go stale.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form field change                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InvoiceEdit::ItemName { index: 0, name: "Organic Honey" }              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_edit(document, edit, catalog, settings)  ← THIS MODULE           │
//! │       ├── text fields: set as typed                                    │
//! │       ├── phone: sanitize_phone                                         │
//! │       ├── amounts / quantity: parse_amount / parse_quantity (→ 0)       │
//! │       ├── item name / size: pricing::resolve_*_selection                │
//! │       └── recompute_totals                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  New InvoiceDocument (input untouched)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::pricing;
use crate::settings::Settings;
use crate::types::{DeliveryType, InvoiceDocument, InvoiceItem, PaymentMethod};
use crate::validation::{parse_amount, parse_quantity, sanitize_phone};

// =============================================================================
// Edit Type
// =============================================================================

/// A single form action against the working invoice.
///
/// Amounts and quantities carry the raw field text; they are coerced, never
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum InvoiceEdit {
    CustomerName(String),
    CustomerPhone(String),
    CustomerAddress(String),
    District(String),
    DeliveryType(DeliveryType),
    AdvancePayment(String),
    DiscountAmount(String),
    PaymentMethod(PaymentMethod),
    TransactionId(String),
    CustomNote(String),
    ThankYouMessage(String),
    /// Product picked or typed on a line; resolves against the catalog.
    ItemName { index: usize, name: String },
    /// Size picked from the matched product's sizes; reprices the line.
    ItemSize { index: usize, size: String },
    /// Size typed by hand; never reprices.
    ItemSizeText { index: usize, size: String },
    ItemQuantity { index: usize, quantity: String },
    ItemPrice { index: usize, price: String },
    AddItem,
    /// Removing the only line is a no-op.
    RemoveItem { index: usize },
}

impl InvoiceEdit {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            InvoiceEdit::CustomerName(_) => "customer_name",
            InvoiceEdit::CustomerPhone(_) => "customer_phone",
            InvoiceEdit::CustomerAddress(_) => "customer_address",
            InvoiceEdit::District(_) => "district",
            InvoiceEdit::DeliveryType(_) => "delivery_type",
            InvoiceEdit::AdvancePayment(_) => "advance_payment",
            InvoiceEdit::DiscountAmount(_) => "discount_amount",
            InvoiceEdit::PaymentMethod(_) => "payment_method",
            InvoiceEdit::TransactionId(_) => "transaction_id",
            InvoiceEdit::CustomNote(_) => "custom_note",
            InvoiceEdit::ThankYouMessage(_) => "thank_you_message",
            InvoiceEdit::ItemName { .. } => "item_name",
            InvoiceEdit::ItemSize { .. } => "item_size",
            InvoiceEdit::ItemSizeText { .. } => "item_size_text",
            InvoiceEdit::ItemQuantity { .. } => "item_quantity",
            InvoiceEdit::ItemPrice { .. } => "item_price",
            InvoiceEdit::AddItem => "add_item",
            InvoiceEdit::RemoveItem { .. } => "remove_item",
        }
    }
}

// =============================================================================
// Apply
// =============================================================================

/// Applies one edit and recomputes the totals.
///
/// ## Errors
/// - `CoreError::ItemIndexOutOfRange` for item edits with a bad index
///
/// ## Example
/// ```rust
/// use beshob_core::{apply_edit, Catalog, InvoiceEdit, InvoiceSession, Money, Settings};
/// use chrono::NaiveDate;
///
/// let settings = Settings::default();
/// let catalog = Catalog::default();
/// let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let doc = InvoiceSession::new_draft(&settings, today).document().clone();
///
/// let edit = InvoiceEdit::ItemName { index: 0, name: "Organic Honey".into() };
/// let doc = apply_edit(&doc, edit, &catalog, &settings).unwrap();
/// assert_eq!(doc.subtotal, Money::from_taka(450));
/// assert_eq!(doc.total, Money::from_taka(510));
/// ```
pub fn apply_edit(
    document: &InvoiceDocument,
    edit: InvoiceEdit,
    catalog: &Catalog,
    settings: &Settings,
) -> CoreResult<InvoiceDocument> {
    let mut next = document.clone();

    match edit {
        InvoiceEdit::CustomerName(name) => next.customer_name = name,
        InvoiceEdit::CustomerPhone(phone) => next.customer_phone = sanitize_phone(&phone),
        InvoiceEdit::CustomerAddress(address) => next.customer_address = address,
        InvoiceEdit::District(district) => next.district = district,
        InvoiceEdit::DeliveryType(delivery_type) => next.delivery_type = delivery_type,
        InvoiceEdit::AdvancePayment(raw) => next.advance_payment = parse_amount(&raw),
        InvoiceEdit::DiscountAmount(raw) => next.discount_amount = parse_amount(&raw),
        InvoiceEdit::PaymentMethod(method) => next.payment_method = method,
        InvoiceEdit::TransactionId(id) => next.transaction_id = id,
        InvoiceEdit::CustomNote(note) => next.custom_note = note,
        InvoiceEdit::ThankYouMessage(message) => {
            next.thank_you_message = Some(message).filter(|m| !m.is_empty());
        }
        InvoiceEdit::ItemName { index, name } => {
            next.items = pricing::resolve_product_selection(catalog, &next.items, index, &name)?;
        }
        InvoiceEdit::ItemSize { index, size } => {
            next.items = pricing::resolve_size_selection(catalog, &next.items, index, &size)?;
        }
        InvoiceEdit::ItemSizeText { index, size } => {
            item_mut(&mut next.items, index)?.size = size;
        }
        InvoiceEdit::ItemQuantity { index, quantity } => {
            item_mut(&mut next.items, index)?.quantity = parse_quantity(&quantity);
        }
        InvoiceEdit::ItemPrice { index, price } => {
            item_mut(&mut next.items, index)?.price = parse_amount(&price);
        }
        InvoiceEdit::AddItem => next.items.push(InvoiceItem::blank()),
        InvoiceEdit::RemoveItem { index } => {
            if next.items.len() > 1 {
                item_mut(&mut next.items, index)?;
                next.items.remove(index);
            }
        }
    }

    Ok(pricing::recompute_totals(&next, settings))
}

fn item_mut(items: &mut [InvoiceItem], index: usize) -> CoreResult<&mut InvoiceItem> {
    let len = items.len();
    items
        .get_mut(index)
        .ok_or(CoreError::ItemIndexOutOfRange { index, len })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::InvoiceSession;
    use crate::money::Money;
    use chrono::NaiveDate;

    struct Fixture {
        settings: Settings,
        catalog: Catalog,
        doc: InvoiceDocument,
    }

    impl Fixture {
        fn new() -> Self {
            let settings = Settings::default();
            let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
            let doc = InvoiceSession::new_draft(&settings, today).document().clone();
            Self {
                settings,
                catalog: Catalog::default(),
                doc,
            }
        }

        fn apply(&mut self, edit: InvoiceEdit) {
            self.doc = apply_edit(&self.doc, edit, &self.catalog, &self.settings).unwrap();
        }
    }

    #[test]
    fn test_honey_order_end_to_end() {
        let mut fx = Fixture::new();
        fx.apply(InvoiceEdit::ItemName {
            index: 0,
            name: "Organic Honey".to_string(),
        });
        fx.apply(InvoiceEdit::ItemQuantity {
            index: 0,
            quantity: "2".to_string(),
        });

        assert_eq!(fx.doc.items[0].size, "500gm");
        assert_eq!(fx.doc.subtotal, Money::from_taka(900));
        assert_eq!(fx.doc.total, Money::from_taka(960));
        assert_eq!(fx.doc.due, Money::from_taka(960));

        fx.apply(InvoiceEdit::AdvancePayment("1000".to_string()));
        assert_eq!(fx.doc.due, Money::zero());
    }

    #[test]
    fn test_size_pick_reprices_but_text_does_not() {
        let mut fx = Fixture::new();
        fx.apply(InvoiceEdit::ItemName {
            index: 0,
            name: "Organic Honey".to_string(),
        });

        fx.apply(InvoiceEdit::ItemSize {
            index: 0,
            size: "1kg".to_string(),
        });
        assert_eq!(fx.doc.items[0].price, Money::from_taka(800));

        fx.apply(InvoiceEdit::ItemSizeText {
            index: 0,
            size: "500gm".to_string(),
        });
        assert_eq!(fx.doc.items[0].size, "500gm");
        assert_eq!(fx.doc.items[0].price, Money::from_taka(800));
    }

    #[test]
    fn test_delivery_type_change_recomputes() {
        let mut fx = Fixture::new();
        assert_eq!(fx.doc.delivery_charge, Money::from_taka(60));

        fx.apply(InvoiceEdit::DeliveryType(DeliveryType::OutsideDhaka));
        assert_eq!(fx.doc.delivery_charge, Money::from_taka(120));
        assert_eq!(fx.doc.total, Money::from_taka(120));
    }

    #[test]
    fn test_numeric_input_coerces() {
        let mut fx = Fixture::new();
        fx.apply(InvoiceEdit::ItemPrice {
            index: 0,
            price: "abc".to_string(),
        });
        fx.apply(InvoiceEdit::ItemQuantity {
            index: 0,
            quantity: "".to_string(),
        });
        fx.apply(InvoiceEdit::DiscountAmount("-20".to_string()));

        assert_eq!(fx.doc.items[0].price, Money::zero());
        assert_eq!(fx.doc.items[0].quantity, 0);
        assert_eq!(fx.doc.discount_amount, Money::zero());
    }

    #[test]
    fn test_huge_price_times_quantity_saturates() {
        let mut fx = Fixture::new();
        fx.apply(InvoiceEdit::ItemPrice {
            index: 0,
            price: "90000000000000".to_string(),
        });
        fx.apply(InvoiceEdit::ItemQuantity {
            index: 0,
            quantity: "99999".to_string(),
        });
        fx.apply(InvoiceEdit::AddItem);
        fx.apply(InvoiceEdit::ItemPrice {
            index: 1,
            price: "90000000000000".to_string(),
        });

        assert_eq!(fx.doc.subtotal, Money::from_poisha(i64::MAX));
        assert_eq!(fx.doc.total, Money::from_poisha(i64::MAX));

        fx.apply(InvoiceEdit::DiscountAmount("90000000000000".to_string()));
        fx.apply(InvoiceEdit::AdvancePayment("90000000000000".to_string()));
        assert!(fx.doc.due.is_positive());
    }

    #[test]
    fn test_phone_is_sanitized_and_truncated() {
        let mut fx = Fixture::new();
        fx.apply(InvoiceEdit::CustomerPhone("017 1234 5678 9".to_string()));
        assert_eq!(fx.doc.customer_phone, "01712345678");
    }

    #[test]
    fn test_remove_sole_item_is_noop() {
        let mut fx = Fixture::new();
        let before = fx.doc.items.clone();

        fx.apply(InvoiceEdit::RemoveItem { index: 0 });
        assert_eq!(fx.doc.items, before);

        fx.apply(InvoiceEdit::AddItem);
        assert_eq!(fx.doc.items.len(), 2);

        fx.apply(InvoiceEdit::RemoveItem { index: 0 });
        assert_eq!(fx.doc.items.len(), 1);
        assert_ne!(fx.doc.items[0].id, before[0].id);
    }

    #[test]
    fn test_bad_index_is_rejected() {
        let fx = Fixture::new();
        let result = apply_edit(
            &fx.doc,
            InvoiceEdit::ItemPrice {
                index: 4,
                price: "10".to_string(),
            },
            &fx.catalog,
            &fx.settings,
        );
        assert!(matches!(
            result,
            Err(CoreError::ItemIndexOutOfRange { index: 4, len: 1 })
        ));
    }

    #[test]
    fn test_thank_you_message() {
        let mut fx = Fixture::new();
        fx.apply(InvoiceEdit::ThankYouMessage("ধন্যবাদ".to_string()));
        assert_eq!(fx.doc.thank_you_message.as_deref(), Some("ধন্যবাদ"));

        fx.apply(InvoiceEdit::ThankYouMessage(String::new()));
        assert!(fx.doc.thank_you_message.is_none());
    }

    #[test]
    fn test_edit_wire_format() {
        let edit: InvoiceEdit =
            serde_json::from_str(r#"{"kind":"itemName","value":{"index":0,"name":"Honey"}}"#)
                .unwrap();
        assert_eq!(
            edit,
            InvoiceEdit::ItemName {
                index: 0,
                name: "Honey".to_string()
            }
        );

        let edit: InvoiceEdit = serde_json::from_str(r#"{"kind":"addItem"}"#).unwrap();
        assert_eq!(edit, InvoiceEdit::AddItem);
    }
}
