//! # Invoice Lifecycle
//!
//! The working invoice and the state machine around it.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   new_draft ──► ┌────────────┐   commit    ┌─────────────┐              │
//! │                 │  Drafting  │ ──────────► │  Committed  │              │
//! │                 │ (editable) │             │ (read-only) │              │
//! │                 └────────────┘             └──────┬──────┘              │
//! │                       ▲                           │                     │
//! │                       │          reset            │                     │
//! │                       └───────────────────────────┘                     │
//! │                                                                         │
//! │  commit: returns settings with next_invoice_number + 1 (exactly once)   │
//! │  reset:  fresh draft numbered from the current counter                  │
//! │  edits on a committed invoice: CoreError::InvoiceCommitted              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::editor::{apply_edit, InvoiceEdit};
use crate::error::{CoreError, CoreResult};
use crate::merge::{apply_location_guess, apply_parsed_fields, LocationGuess, ParsedInvoice};
use crate::money::Money;
use crate::pricing::{generate_invoice_number, recompute_totals};
use crate::settings::Settings;
use crate::types::{new_id, DeliveryType, InvoiceDocument, InvoiceItem};
use crate::DEFAULT_DISTRICT;

// =============================================================================
// Invoice Status
// =============================================================================

/// Where the working invoice is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Being filled in; every field is editable.
    Drafting,
    /// Printed/finalized; the counter has moved on.
    Committed,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Drafting
    }
}

// =============================================================================
// Invoice Session
// =============================================================================

/// The single in-progress invoice and its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceSession {
    document: InvoiceDocument,
    status: InvoiceStatus,
}

impl InvoiceSession {
    /// Starts a fresh draft seeded from settings.
    ///
    /// Fresh id, number from [`generate_invoice_number`], district Dhaka,
    /// one blank item, inside Dhaka, payment method from settings, every
    /// amount zero, then recomputed.
    pub fn new_draft(settings: &Settings, today: NaiveDate) -> Self {
        let document = InvoiceDocument {
            id: new_id(),
            invoice_number: generate_invoice_number(settings),
            date: today,
            customer_name: String::new(),
            customer_phone: String::new(),
            customer_address: String::new(),
            district: DEFAULT_DISTRICT.to_string(),
            items: vec![InvoiceItem::blank()],
            delivery_type: DeliveryType::InsideDhaka,
            delivery_charge: Money::zero(),
            advance_payment: Money::zero(),
            payment_method: settings.default_payment_method,
            transaction_id: String::new(),
            discount_amount: Money::zero(),
            custom_note: String::new(),
            subtotal: Money::zero(),
            total: Money::zero(),
            due: Money::zero(),
            thank_you_message: None,
        };

        Self {
            document: recompute_totals(&document, settings),
            status: InvoiceStatus::Drafting,
        }
    }

    pub fn document(&self) -> &InvoiceDocument {
        &self.document
    }

    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    pub fn is_committed(&self) -> bool {
        self.status == InvoiceStatus::Committed
    }

    /// Applies one form edit.
    ///
    /// ## Errors
    /// - `CoreError::InvoiceCommitted` once committed
    /// - anything [`apply_edit`] returns
    pub fn edit(
        &mut self,
        edit: InvoiceEdit,
        catalog: &Catalog,
        settings: &Settings,
    ) -> CoreResult<&InvoiceDocument> {
        self.ensure_drafting()?;
        self.document = apply_edit(&self.document, edit, catalog, settings)?;
        Ok(&self.document)
    }

    /// Merges a parse result and recomputes.
    pub fn apply_parsed(
        &mut self,
        parsed: &ParsedInvoice,
        settings: &Settings,
    ) -> CoreResult<&InvoiceDocument> {
        self.ensure_drafting()?;
        let merged = apply_parsed_fields(&self.document, parsed);
        self.document = recompute_totals(&merged, settings);
        Ok(&self.document)
    }

    /// Merges a location guess and recomputes.
    pub fn apply_location(
        &mut self,
        guess: &LocationGuess,
        settings: &Settings,
    ) -> CoreResult<&InvoiceDocument> {
        self.ensure_drafting()?;
        let merged = apply_location_guess(&self.document, guess);
        self.document = recompute_totals(&merged, settings);
        Ok(&self.document)
    }

    /// Re-derives totals after a settings change.
    ///
    /// A committed document is frozen and left alone; returns whether the
    /// document was recomputed.
    pub fn refresh(&mut self, settings: &Settings) -> bool {
        if self.is_committed() {
            return false;
        }
        self.document = recompute_totals(&self.document, settings);
        true
    }

    /// Finalizes the invoice.
    ///
    /// Returns the settings with `next_invoice_number` advanced by one; the
    /// caller persists them. Committing twice is rejected so the counter
    /// moves exactly once per invoice.
    ///
    /// ## User Workflow
    /// ```text
    /// Print INV-1001
    ///      │
    ///      ▼
    /// commit(settings{next: 1001}) ← THIS FUNCTION
    ///      │
    ///      ├── status: Drafting → Committed
    ///      └── returns settings{next: 1002}
    ///      │
    ///      ▼
    /// New Invoice → reset() → INV-1002
    /// ```
    pub fn commit(&mut self, settings: &Settings) -> CoreResult<Settings> {
        self.ensure_drafting()?;

        self.status = InvoiceStatus::Committed;

        let mut advanced = settings.clone();
        advanced.next_invoice_number += 1;
        Ok(advanced)
    }

    /// Replaces the session with a new draft, whatever state it was in.
    pub fn reset(&mut self, settings: &Settings, today: NaiveDate) {
        *self = Self::new_draft(settings, today);
    }

    fn ensure_drafting(&self) -> CoreResult<()> {
        if self.is_committed() {
            return Err(CoreError::InvoiceCommitted {
                invoice_number: self.document.invoice_number.clone(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
