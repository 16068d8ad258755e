//! # Invoice View
//!
//! The printable view model built from the document and settings. The
//! presentation layer renders this as-is; every fallback and show/hide rule
//! is decided here.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [Logo|M]  My Online Shop                        Number  #INV-1001      │
//! │            House 12, Road 5, Dhanmondi           Issued  01-05-2024     │
//! │            01700000000                                                  │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  Invoiced To: Rahim / 017... / Mirpur, Dhaka      [Payment Outstanding] │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  Description        Qty   Unit Price   Total                            │
//! │  Organic Honey 500gm  2       ৳450      ৳900                            │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  Gross Subtotal ৳900 / Shipping ৳60 / [Adjustments] / [Advance Credit]  │
//! │  Net Balance ৳960                                                       │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  Thank-you message · footer message                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::settings::Settings;
use crate::types::InvoiceDocument;

const FALLBACK_CUSTOMER_NAME: &str = "Private Client";
const FALLBACK_CUSTOMER_PHONE: &str = "Not provided";
const FALLBACK_CUSTOMER_ADDRESS: &str = "Local pickup order";
const FALLBACK_ITEM_NAME: &str = "Custom Product";
const FALLBACK_THANK_YOU: &str = "Thank you for your business";

/// Narrowest receipt `render_text` will lay out.
const MIN_TEXT_WIDTH: usize = 32;

/// File name the rendered invoice image is saved under.
///
/// ```rust
/// use beshob_core::{view, InvoiceSession, Settings};
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let session = InvoiceSession::new_draft(&Settings::default(), today);
/// assert_eq!(view::export_file_name(session.document()), "Invoice-INV-1001.jpg");
/// ```
pub fn export_file_name(document: &InvoiceDocument) -> String {
    format!("Invoice-{}.jpg", document.invoice_number)
}

// =============================================================================
// View Types
// =============================================================================

/// Logo image, or the first letter of the business name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Branding {
    Logo(String),
    Monogram(String),
}

/// Badge next to the amount payable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Outstanding,
    Settled,
}

impl PaymentStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Outstanding => "Payment Outstanding",
            PaymentStatus::Settled => "Account Settled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ViewLine {
    pub description: String,
    pub size: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// One row of the settlement summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub label: String,
    pub amount: Money,
    /// Printed as a deduction ("- ৳100").
    pub deduction: bool,
}

/// How the advance was paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub method: String,
    pub reference: Option<String>,
}

/// Everything the printed invoice shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceView {
    pub business_name: String,
    pub branding: Branding,
    pub business_address: String,
    pub business_phone: String,

    /// `#` + invoice number.
    pub number: String,
    /// `dd-mm-yyyy`.
    pub issued: String,

    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub district: String,

    pub status: PaymentStatus,
    pub total_payable: Money,

    pub lines: Vec<ViewLine>,
    pub summary: Vec<SummaryRow>,
    pub net_balance: Money,

    /// Only when an advance was paid.
    pub payment: Option<PaymentRecord>,
    pub note: Option<String>,
    pub thank_you: String,
    pub footer_message: String,
}

// =============================================================================
// Building
// =============================================================================

impl InvoiceView {
    /// Builds the view from a (recomputed) document and the settings.
    pub fn build(document: &InvoiceDocument, settings: &Settings) -> Self {
        let branding = if settings.logo.is_empty() {
            Branding::Monogram(settings.name.chars().take(1).collect())
        } else {
            Branding::Logo(settings.logo.clone())
        };

        let lines = document
            .items
            .iter()
            .map(|item| ViewLine {
                description: or_fallback(&item.name, FALLBACK_ITEM_NAME),
                size: item.size.clone(),
                quantity: item.quantity,
                unit_price: item.price,
                line_total: item.line_total(),
            })
            .collect();

        let mut summary = vec![
            SummaryRow {
                label: "Gross Subtotal".to_string(),
                amount: document.subtotal,
                deduction: false,
            },
            SummaryRow {
                label: "Shipping & Handling".to_string(),
                amount: document.delivery_charge,
                deduction: false,
            },
        ];
        if document.discount_amount.is_positive() {
            summary.push(SummaryRow {
                label: "Adjustments".to_string(),
                amount: document.discount_amount,
                deduction: true,
            });
        }
        if document.advance_payment.is_positive() {
            summary.push(SummaryRow {
                label: "Advance Credit".to_string(),
                amount: document.advance_payment,
                deduction: true,
            });
        }

        let payment = document.advance_payment.is_positive().then(|| PaymentRecord {
            method: document.payment_method.label().to_string(),
            reference: non_empty(&document.transaction_id),
        });

        let status = if document.due.is_positive() {
            PaymentStatus::Outstanding
        } else {
            PaymentStatus::Settled
        };

        Self {
            business_name: settings.name.clone(),
            branding,
            business_address: settings.address.clone(),
            business_phone: settings.phone.clone(),
            number: format!("#{}", document.invoice_number),
            issued: document.date.format("%d-%m-%Y").to_string(),
            customer_name: or_fallback(&document.customer_name, FALLBACK_CUSTOMER_NAME),
            customer_phone: or_fallback(&document.customer_phone, FALLBACK_CUSTOMER_PHONE),
            customer_address: or_fallback(&document.customer_address, FALLBACK_CUSTOMER_ADDRESS),
            district: document.district.clone(),
            status,
            total_payable: document.due,
            lines,
            summary,
            net_balance: document.due,
            payment,
            note: non_empty(&document.custom_note),
            thank_you: document
                .thank_you_message
                .as_deref()
                .and_then(non_empty)
                .unwrap_or_else(|| FALLBACK_THANK_YOU.to_string()),
            footer_message: settings.footer_message.clone(),
        }
    }

    // =========================================================================
    // Plain-Text Rendering
    // =========================================================================

    /// Renders a receipt-style plain-text invoice `width` columns wide
    /// (at least 32).
    pub fn render_text(&self, width: usize) -> String {
        let width = width.max(MIN_TEXT_WIDTH);
        let heavy = "=".repeat(width);
        let light = "-".repeat(width);
        let mut out: Vec<String> = Vec::new();

        if let Branding::Monogram(letter) = &self.branding {
            if !letter.is_empty() {
                out.push(center(&format!("[{}]", letter), width));
            }
        }
        out.push(center(&self.business_name, width));
        out.push(center(&self.business_address, width));
        out.push(center(&self.business_phone, width));
        out.push(heavy.clone());

        out.push(two_columns("Number", &self.number, width));
        out.push(two_columns("Issued", &self.issued, width));
        out.push(light.clone());

        out.push("Invoiced To".to_string());
        out.push(self.customer_name.clone());
        out.push(self.customer_phone.clone());
        out.push(self.customer_address.clone());
        out.push(self.district.clone());
        out.push(two_columns(
            self.status.label(),
            &self.total_payable.to_string(),
            width,
        ));
        out.push(light.clone());

        for line in &self.lines {
            let title = if line.size.is_empty() {
                line.description.clone()
            } else {
                format!("{} ({})", line.description, line.size)
            };
            out.push(title);
            out.push(two_columns(
                &format!("  {} x {}", line.quantity, line.unit_price),
                &line.line_total.to_string(),
                width,
            ));
        }
        out.push(light.clone());

        for row in &self.summary {
            let amount = if row.deduction {
                format!("- {}", row.amount)
            } else {
                row.amount.to_string()
            };
            out.push(two_columns(&row.label, &amount, width));
        }
        out.push(two_columns("Net Balance", &self.net_balance.to_string(), width));

        if let Some(payment) = &self.payment {
            out.push(light.clone());
            let paid_by = match &payment.reference {
                Some(reference) => format!("Paid by {} (Ref: {})", payment.method, reference),
                None => format!("Paid by {}", payment.method),
            };
            out.push(paid_by);
        }

        if let Some(note) = &self.note {
            out.push(light.clone());
            out.push(format!("Notes: \"{}\"", note));
        }

        out.push(heavy);
        out.push(center(&self.thank_you, width));
        out.push(center(&self.footer_message, width));

        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    non_empty(value).unwrap_or_else(|| fallback.to_string())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

/// `left` flush left, `right` flush right. Falls back to two lines when
/// they do not fit side by side.
fn two_columns(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    if used < width {
        format!("{}{}{}", left, " ".repeat(width - used), right)
    } else {
        let pad = width.saturating_sub(right.chars().count());
        format!("{}\n{}{}", left, " ".repeat(pad), right)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
