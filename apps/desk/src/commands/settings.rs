//! # Settings Commands
//!
//! Business identity, delivery fees, numbering and the size vocabulary.
//!
//! Every change is persisted before it becomes visible; a drafting invoice
//! is then recomputed so fee changes show immediately. A committed invoice
//! keeps its frozen totals.

use tracing::{debug, info};

use beshob_core::{Settings, SettingsUpdate};

use crate::error::ApiResult;
use crate::state::{DbState, InvoiceState, SettingsState};

/// Gets the current settings.
pub fn get_settings(settings: &SettingsState) -> Settings {
    debug!("get_settings command");
    settings.snapshot()
}

/// Applies a settings patch.
///
/// ## Errors
/// - `VALIDATION_ERROR` for a negative delivery fee (nothing is applied)
pub async fn update_settings(
    db: &DbState,
    settings: &SettingsState,
    invoice: &InvoiceState,
    update: SettingsUpdate,
) -> ApiResult<Settings> {
    debug!("update_settings command");

    let mut next = settings.snapshot();
    next.apply_update(update)?;

    save_and_publish(db, settings, invoice, next).await
}

/// Adds a label to the size vocabulary.
pub async fn add_available_size(
    db: &DbState,
    settings: &SettingsState,
    invoice: &InvoiceState,
    label: &str,
) -> ApiResult<Settings> {
    debug!(label = %label, "add_available_size command");

    let mut next = settings.snapshot();
    next.add_available_size(label)?;

    save_and_publish(db, settings, invoice, next).await
}

/// Removes a label from the vocabulary. Product sizes are not touched.
pub async fn remove_available_size(
    db: &DbState,
    settings: &SettingsState,
    invoice: &InvoiceState,
    label: &str,
) -> ApiResult<Settings> {
    debug!(label = %label, "remove_available_size command");

    let mut next = settings.snapshot();
    if !next.remove_available_size(label) {
        return Ok(next);
    }

    save_and_publish(db, settings, invoice, next).await
}

async fn save_and_publish(
    db: &DbState,
    settings: &SettingsState,
    invoice: &InvoiceState,
    next: Settings,
) -> ApiResult<Settings> {
    db.inner().settings().save(&next).await?;

    settings.replace(next.clone());
    let refreshed = invoice.with_session_mut(|s| s.refresh(&next));

    info!(refreshed_invoice = refreshed, "Settings updated");
    Ok(next)
}
