//! # Business Settings
//!
//! The single, process-wide settings record: business identity printed on
//! every invoice, default delivery fees, invoice numbering and the size
//! vocabulary offered when authoring products.
//!
//! ## Who Reads What
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Settings field                 Consumer                                │
//! │  ─────────────────────────────  ──────────────────────────────────────  │
//! │  name, logo, address, phone     InvoiceView header                      │
//! │  footer_message                 InvoiceView footer                      │
//! │  default_delivery_*             recompute_totals (delivery charge)      │
//! │  default_payment_method         new drafts                              │
//! │  invoice_prefix + next number   generate_invoice_number                 │
//! │  available_sizes                product authoring size picker           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `next_invoice_number` only moves on commit
//! (see [`crate::lifecycle::InvoiceSession::commit`]), never on save or edit.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{DeliveryType, PaymentMethod};
use crate::validation::{validate_fee, validate_size_label, ValidationResult};

/// First-run size vocabulary.
const DEFAULT_AVAILABLE_SIZES: [&str; 9] = [
    "500gm", "1kg", "2kg", "1L", "2L", "5L", "Pcs", "Box", "Packet",
];

// =============================================================================
// Settings
// =============================================================================

/// Business-wide configuration affecting every invoice.
///
/// Missing fields in a stored document fall back to the first-run defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub name: String,
    /// Opaque image data URL, or empty for the monogram.
    pub logo: String,
    pub address: String,
    pub phone: String,
    pub footer_message: String,
    pub default_delivery_inside_dhaka: Money,
    pub default_delivery_outside_dhaka: Money,
    pub default_payment_method: PaymentMethod,
    pub invoice_prefix: String,
    pub next_invoice_number: u64,
    pub available_sizes: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: "My Online Shop".to_string(),
            logo: String::new(),
            address: "House 12, Road 5, Dhanmondi, Dhaka".to_string(),
            phone: "01700000000".to_string(),
            footer_message: "আমরা বিক্রিত এবং ব্যাবহিত পণ্য ফেরত নিয়ে থাকি".to_string(),
            default_delivery_inside_dhaka: Money::from_taka(60),
            default_delivery_outside_dhaka: Money::from_taka(120),
            default_payment_method: PaymentMethod::Cash,
            invoice_prefix: "INV-".to_string(),
            next_invoice_number: 1001,
            available_sizes: DEFAULT_AVAILABLE_SIZES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Settings {
    /// The delivery fee that applies to a delivery zone.
    pub fn delivery_charge_for(&self, delivery_type: DeliveryType) -> Money {
        match delivery_type {
            DeliveryType::InsideDhaka => self.default_delivery_inside_dhaka,
            DeliveryType::OutsideDhaka => self.default_delivery_outside_dhaka,
        }
    }

    /// Adds a label to the size vocabulary.
    ///
    /// ## Rules
    /// - Label must not be empty (after trimming)
    /// - Label must not already be in the list (exact match)
    pub fn add_available_size(&mut self, label: &str) -> ValidationResult<()> {
        let label = label.trim();
        validate_size_label(label)?;

        if self.available_sizes.iter().any(|s| s == label) {
            return Err(ValidationError::Duplicate {
                field: "size".to_string(),
                value: label.to_string(),
            });
        }

        self.available_sizes.push(label.to_string());
        Ok(())
    }

    /// Removes a label from the size vocabulary.
    ///
    /// Products already using the label keep it. Returns whether anything
    /// was removed.
    pub fn remove_available_size(&mut self, label: &str) -> bool {
        let before = self.available_sizes.len();
        self.available_sizes.retain(|s| s != label);
        self.available_sizes.len() != before
    }

    /// Applies an identity/fee patch. Validates everything first, so a
    /// rejected patch leaves the settings untouched.
    pub fn apply_update(&mut self, update: SettingsUpdate) -> ValidationResult<()> {
        if let Some(fee) = update.default_delivery_inside_dhaka {
            validate_fee("inside Dhaka delivery fee", fee)?;
        }
        if let Some(fee) = update.default_delivery_outside_dhaka {
            validate_fee("outside Dhaka delivery fee", fee)?;
        }

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(logo) = update.logo {
            self.logo = logo;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(footer) = update.footer_message {
            self.footer_message = footer;
        }
        if let Some(fee) = update.default_delivery_inside_dhaka {
            self.default_delivery_inside_dhaka = fee;
        }
        if let Some(fee) = update.default_delivery_outside_dhaka {
            self.default_delivery_outside_dhaka = fee;
        }
        if let Some(method) = update.default_payment_method {
            self.default_payment_method = method;
        }
        if let Some(prefix) = update.invoice_prefix {
            self.invoice_prefix = prefix;
        }

        Ok(())
    }
}

// =============================================================================
// Settings Update
// =============================================================================

/// Partial edit of the settings identity and fees.
///
/// `None` leaves a field unchanged. The invoice counter and size vocabulary
/// are not editable through this patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub footer_message: Option<String>,
    pub default_delivery_inside_dhaka: Option<Money>,
    pub default_delivery_outside_dhaka: Option<Money>,
    pub default_payment_method: Option<PaymentMethod>,
    pub invoice_prefix: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
