//! # Invoice Commands
//!
//! Commands for the working invoice: form edits, commit, reset and the
//! printable view.
//!
//! ## Invoice Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐  edit_invoice   ┌──────────┐  commit_invoice ┌─────────┐  │
//! │  │  Fresh   │───────────────► │ Drafting │───────────────► │Committed│  │
//! │  │  draft   │  magic_fill     │          │  (saves counter)│ (frozen)│  │
//! │  └──────────┘                 └──────────┘                 └────┬────┘  │
//! │       ▲                                                         │       │
//! │       └──────────────────── reset_invoice ──────────────────────┘       │
//! │                                                                         │
//! │  get_invoice_view / invoice_text / export_file_name: any state          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use beshob_core::validation::is_phone_invalid;
use beshob_core::view::export_file_name as view_file_name;
use beshob_core::{CoreError, InvoiceDocument, InvoiceEdit, InvoiceSession, InvoiceView};

use crate::error::ApiResult;
use crate::state::{CatalogState, DbState, InvoiceState, SettingsState};

/// Everything the invoice form needs to render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSnapshot {
    pub session: InvoiceSession,
    pub warnings: Vec<String>,
    pub is_parsing: bool,
    /// Phone has digits but not exactly 11.
    pub phone_invalid: bool,
}

impl InvoiceSnapshot {
    fn capture(invoice: &InvoiceState) -> Self {
        let session = invoice.with_session(InvoiceSession::clone);
        let phone_invalid = is_phone_invalid(&session.document().customer_phone);

        InvoiceSnapshot {
            session,
            warnings: invoice.warnings(),
            is_parsing: invoice.is_parsing(),
            phone_invalid,
        }
    }
}

/// Gets the working invoice with its status and warnings.
pub fn get_invoice(invoice: &InvoiceState) -> InvoiceSnapshot {
    debug!("get_invoice command");
    InvoiceSnapshot::capture(invoice)
}

/// Applies one form edit and returns the recomputed document.
///
/// Any assist response still in flight becomes stale, so it can never
/// overwrite what the user just typed.
///
/// ## Errors
/// - `INVOICE_COMMITTED` after commit
/// - `NOT_FOUND` for a line index that doesn't exist
pub fn edit_invoice(
    catalog: &CatalogState,
    settings: &SettingsState,
    invoice: &InvoiceState,
    edit: InvoiceEdit,
) -> ApiResult<InvoiceDocument> {
    debug!(kind = edit.kind(), "edit_invoice command");

    invoice.sequencer().invalidate();

    let settings = settings.snapshot();
    let document = catalog.with_catalog(|catalog| {
        invoice.with_session_mut(|session| session.edit(edit, catalog, &settings).cloned())
    })?;

    Ok(document)
}

/// Finalizes the invoice (print/export) and persists the advanced counter.
///
/// ## What This Does
/// 1. Under the settings and session locks: Drafting → Committed on the
///    live session and `next_invoice_number + 1` in live settings
/// 2. Saves the advanced settings
/// 3. On a storage failure, puts both back
///
/// Edits and commits arriving while the save is in flight see a committed
/// invoice and fail with `INVOICE_COMMITTED`.
pub async fn commit_invoice(
    db: &DbState,
    settings: &SettingsState,
    invoice: &InvoiceState,
) -> ApiResult<InvoiceSnapshot> {
    debug!("commit_invoice command");

    let (drafted, advanced) = settings.with_settings_mut(|current| {
        invoice.with_session_mut(|session| {
            let drafted = session.clone();
            let advanced = session.commit(current)?;
            *current = advanced.clone();
            Ok::<_, CoreError>((drafted, advanced))
        })
    })?;
    invoice.sequencer().invalidate();

    if let Err(e) = db.inner().settings().save(&advanced).await {
        warn!(
            invoice_number = %drafted.document().invoice_number,
            error = %e,
            "Commit not saved, reopening invoice"
        );
        roll_back_commit(settings, invoice, drafted, advanced.next_invoice_number);
        return Err(e.into());
    }

    info!(
        invoice_number = %drafted.document().invoice_number,
        next_invoice_number = advanced.next_invoice_number,
        total = %drafted.document().total,
        "Invoice committed"
    );

    Ok(InvoiceSnapshot::capture(invoice))
}

/// Restores the draft and counter unless something newer replaced them.
fn roll_back_commit(
    settings: &SettingsState,
    invoice: &InvoiceState,
    drafted: InvoiceSession,
    advanced_number: u64,
) {
    settings.with_settings_mut(|s| {
        if s.next_invoice_number == advanced_number {
            s.next_invoice_number -= 1;
        }
    });
    invoice.with_session_mut(|s| {
        if s.is_committed() && s.document().id == drafted.document().id {
            *s = drafted;
        }
    });
}

/// Starts the next invoice from the current settings.
pub fn reset_invoice(settings: &SettingsState, invoice: &InvoiceState) -> InvoiceSnapshot {
    let current = settings.snapshot();

    invoice.sequencer().invalidate();
    invoice.with_session_mut(|s| s.reset(&current, crate::today()));
    invoice.set_warnings(Vec::new());

    info!(
        invoice_number = %invoice.with_session(|s| s.document().invoice_number.clone()),
        "New invoice started"
    );

    InvoiceSnapshot::capture(invoice)
}

/// Builds the preview model for the presentation layer.
pub fn get_invoice_view(settings: &SettingsState, invoice: &InvoiceState) -> InvoiceView {
    let current = settings.snapshot();
    invoice.with_session(|s| InvoiceView::build(s.document(), &current))
}

/// Plain-text receipt of the working invoice.
pub fn invoice_text(settings: &SettingsState, invoice: &InvoiceState, width: usize) -> String {
    get_invoice_view(settings, invoice).render_text(width)
}

/// File name for the exported image, e.g. `Invoice-INV-1001.jpg`.
pub fn export_file_name(invoice: &InvoiceState) -> String {
    invoice.with_session(|s| view_file_name(s.document()))
}

// =============================================================================
// Unit Tests
// =============================================================================
