//! # Assist Output Merge
//!
//! The output contract of the assist service and the rules for folding it
//! into the working document.
//!
//! ## Merge Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Parsed field        Present + non-empty        Absent / empty          │
//! │  ──────────────────  ─────────────────────────  ──────────────────────  │
//! │  customerName        overwrite                  keep                    │
//! │  customerPhone       overwrite (sanitized)      keep                    │
//! │  customerAddress     overwrite                  keep                    │
//! │  deliveryType        overwrite if recognized    keep                    │
//! │  advancePayment      overwrite if > 0           keep                    │
//! │  items[]             REPLACE whole list         keep                    │
//! │                      fresh ids, qty → 1,                                │
//! │                      price → 0 when missing                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The merge never recomputes; callers run
//! [`crate::pricing::recompute_totals`] afterwards.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{new_id, DeliveryType, InvoiceDocument, InvoiceItem};
use crate::validation::sanitize_phone;

// =============================================================================
// Output Contract
// =============================================================================

/// Partial invoice guessed from free text. Every field may be missing.
///
/// Numbers arrive as JSON numbers in Taka, so they are kept as `f64` here and
/// converted to [`Money`] during the merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedInvoice {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub items: Option<Vec<ParsedItem>>,
    /// Raw zone text; unrecognized values are ignored.
    pub delivery_type: Option<String>,
    pub advance_payment: Option<f64>,
}

impl ParsedInvoice {
    /// The parsed customer name, if it carries any text.
    pub fn customer_name(&self) -> Option<&str> {
        non_empty(self.customer_name.as_deref())
    }

    /// The parsed address, if it carries any text.
    pub fn customer_address(&self) -> Option<&str> {
        non_empty(self.customer_address.as_deref())
    }
}

/// One guessed line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedItem {
    pub name: Option<String>,
    pub size: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
}

impl ParsedItem {
    /// Converts the guess into an invoice line with a fresh id.
    ///
    /// Missing or non-positive quantity becomes 1; missing or negative price
    /// becomes ৳0; missing name/size become empty.
    pub fn into_item(self) -> InvoiceItem {
        let quantity = match self.quantity {
            Some(q) if q.is_finite() && q >= 1.0 => q.round().min(u32::MAX as f64) as u32,
            _ => 1,
        };
        let price = self
            .price
            .map(Money::from_taka_lossy)
            .unwrap_or_default()
            .clamp_non_negative();

        InvoiceItem {
            id: new_id(),
            name: self.name.unwrap_or_default(),
            size: self.size.unwrap_or_default(),
            quantity,
            price,
        }
    }
}

/// District and delivery zone guessed from an address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationGuess {
    pub district: Option<String>,
    pub delivery_type: Option<String>,
}

// =============================================================================
// Merge Operations
// =============================================================================

/// Shallow, non-destructive merge of a parse result into the document.
///
/// ## Example
/// ```rust
/// use beshob_core::{merge, InvoiceSession, ParsedInvoice, Settings};
/// use chrono::NaiveDate;
///
/// let settings = Settings::default();
/// let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let doc = InvoiceSession::new_draft(&settings, today).document().clone();
///
/// let parsed = ParsedInvoice {
///     customer_name: Some("Rahim".to_string()),
///     ..Default::default()
/// };
/// let merged = merge::apply_parsed_fields(&doc, &parsed);
/// assert_eq!(merged.customer_name, "Rahim");
/// assert_eq!(merged.items, doc.items);
/// ```
pub fn apply_parsed_fields(document: &InvoiceDocument, parsed: &ParsedInvoice) -> InvoiceDocument {
    let mut next = document.clone();

    if let Some(name) = parsed.customer_name() {
        next.customer_name = name.to_string();
    }

    if let Some(phone) = parsed.customer_phone.as_deref() {
        let phone = sanitize_phone(phone);
        if !phone.is_empty() {
            next.customer_phone = phone;
        }
    }

    if let Some(address) = parsed.customer_address() {
        next.customer_address = address.to_string();
    }

    if let Some(delivery_type) = parse_delivery_type(parsed.delivery_type.as_deref()) {
        next.delivery_type = delivery_type;
    }

    if let Some(advance) = parsed.advance_payment.map(Money::from_taka_lossy) {
        if advance.is_positive() {
            next.advance_payment = advance;
        }
    }

    if let Some(items) = parsed.items.as_ref().filter(|items| !items.is_empty()) {
        next.items = items.iter().cloned().map(ParsedItem::into_item).collect();
    }

    next
}

/// Same merge rule for a location guess: district and delivery zone.
pub fn apply_location_guess(document: &InvoiceDocument, guess: &LocationGuess) -> InvoiceDocument {
    let mut next = document.clone();

    if let Some(district) = non_empty(guess.district.as_deref()) {
        next.district = district.to_string();
    }

    if let Some(delivery_type) = parse_delivery_type(guess.delivery_type.as_deref()) {
        next.delivery_type = delivery_type;
    }

    next
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_delivery_type(value: Option<&str>) -> Option<DeliveryType> {
    non_empty(value).and_then(|v| v.parse().ok())
}

// =============================================================================
// Unit Tests
// =============================================================================
