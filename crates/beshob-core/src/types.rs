//! # Domain Types
//!
//! Core domain types used throughout Beshob Invoice.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  InvoiceItem    │   │ InvoiceDocument │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name (key)     │   │  name  (copy)   │   │  invoice_number │       │
//! │  │  sizes[]        │   │  size  (copy)   │   │  customer_*     │       │
//! │  │   label, price  │   │  price (copy)   │   │  items[] ≥ 1    │       │
//! │  └─────────────────┘   │  quantity       │   │  subtotal..due  │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │  DeliveryType   │   │ PaymentMethod   │                              │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  Inside Dhaka   │   │  Cash  bKash    │                              │
//! │  │  Outside Dhaka  │   │  Nagad Bank     │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Line items never reference a product. Name, size and price are copied
//! when a product is picked, so deleting or repricing a catalog product
//! leaves placed items untouched.
//!
//! ## Name Identity
//! Products are matched by name (trimmed, case-insensitive), not by `id`.
//! See [`normalize_name`] and [`crate::pricing::resolve_by_name`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

/// Generates a fresh entity id (UUID v4).
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Normalizes a product name for matching: surrounding whitespace trimmed,
/// lower-cased.
///
/// ## Example
/// ```rust
/// use beshob_core::types::normalize_name;
///
/// assert_eq!(normalize_name("  Organic HONEY "), "organic honey");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// =============================================================================
// Product
// =============================================================================

/// One priced size of a product (e.g. "500gm" at ৳450).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSize {
    pub id: String,
    pub label: String,
    pub price: Money,
}

impl ProductSize {
    /// Creates a size with a fresh id.
    pub fn new(label: impl Into<String>, price: Money) -> Self {
        Self {
            id: new_id(),
            label: label.into(),
            price,
        }
    }
}

/// A sellable product with its ordered sizes.
///
/// The first size is the one picked when the product is selected on a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, also the matching key.
    pub name: String,

    /// Sizes in display order.
    pub sizes: Vec<ProductSize>,
}

impl Product {
    /// Returns the size used when this product is first selected.
    #[inline]
    pub fn first_size(&self) -> Option<&ProductSize> {
        self.sizes.first()
    }

    /// Finds a size by exact label.
    pub fn size(&self, label: &str) -> Option<&ProductSize> {
        self.sizes.iter().find(|s| s.label == label)
    }

    /// Checks whether this product's name matches `name` after normalization.
    pub fn matches_name(&self, name: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid the advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    Cash,
    #[serde(rename = "bKash")]
    BKash,
    Nagad,
    Bank,
}

impl PaymentMethod {
    /// All methods in picker order.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::BKash,
        PaymentMethod::Nagad,
        PaymentMethod::Bank,
    ];

    /// The label shown on the invoice and used on the wire.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::BKash => "bKash",
            PaymentMethod::Nagad => "Nagad",
            PaymentMethod::Bank => "Bank",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    /// Case-insensitive match on the label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown payment method: {}", s))
    }
}

// =============================================================================
// Delivery Type
// =============================================================================

/// Delivery zone. Picks which default fee from settings applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DeliveryType {
    #[serde(rename = "Inside Dhaka")]
    InsideDhaka,
    #[serde(rename = "Outside Dhaka")]
    OutsideDhaka,
}

impl DeliveryType {
    pub const fn label(&self) -> &'static str {
        match self {
            DeliveryType::InsideDhaka => "Inside Dhaka",
            DeliveryType::OutsideDhaka => "Outside Dhaka",
        }
    }
}

impl Default for DeliveryType {
    fn default() -> Self {
        DeliveryType::InsideDhaka
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DeliveryType {
    type Err = String;

    /// Accepts "Inside Dhaka", "InsideDhaka", "inside" and the outside
    /// equivalents, ignoring case and spacing. Assist output is not always
    /// exact.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squashed: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match squashed.as_str() {
            "insidedhaka" | "inside" => Ok(DeliveryType::InsideDhaka),
            "outsidedhaka" | "outside" => Ok(DeliveryType::OutsideDhaka),
            _ => Err(format!("unknown delivery type: {}", s)),
        }
    }
}

// =============================================================================
// Invoice Item
// =============================================================================

/// A line on the invoice.
/// Uses snapshot pattern: name, size and price are copies, not references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceItem {
    pub id: String,
    /// Free text; may not match any product.
    pub name: String,
    /// Free text or a matched size label.
    pub size: String,
    pub quantity: u32,
    /// Unit price.
    pub price: Money,
}

impl InvoiceItem {
    /// The empty line a new draft starts with and "add item" appends:
    /// quantity 1, price 0.
    pub fn blank() -> Self {
        Self {
            id: new_id(),
            name: String::new(),
            size: String::new(),
            quantity: 1,
            price: Money::zero(),
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Invoice Document
// =============================================================================

/// The working invoice.
///
/// `subtotal`, `delivery_charge`, `total` and `due` are derived; they are
/// rewritten by [`crate::pricing::recompute_totals`] and any value set on
/// them directly is overwritten by the next recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    pub id: String,
    pub invoice_number: String,
    #[ts(as = "String")]
    pub date: NaiveDate,

    pub customer_name: String,
    /// ASCII digits only, at most 11.
    pub customer_phone: String,
    pub customer_address: String,
    pub district: String,

    /// Never empty.
    pub items: Vec<InvoiceItem>,

    pub delivery_type: DeliveryType,
    pub delivery_charge: Money,
    pub advance_payment: Money,
    pub payment_method: PaymentMethod,
    pub transaction_id: String,
    pub discount_amount: Money,
    pub custom_note: String,

    pub subtotal: Money,
    pub total: Money,
    pub due: Money,

    /// Always present on the wire, `null` until set.
    #[serde(default)]
    pub thank_you_message: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
