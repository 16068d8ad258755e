//! # Assist Commands
//!
//! Magic fill, address-based location detection and invoice review.
//!
//! ## Magic Fill Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  magic_fill("Rahim, 01712345678, Agrabad Ctg, 2 honey 500gm")           │
//! │       │                                                                 │
//! │       ├── blank text ───────────────────────────► Skipped               │
//! │       ├── already parsing ──────────────────────► ApiError BUSY         │
//! │       ▼                                                                 │
//! │  token = sequencer.issue()                                              │
//! │  parse ─── None ────────────────────────────────► NothingParsed         │
//! │       │                                                                 │
//! │       ▼   (after every await: token still current? else ► Stale)        │
//! │  merge parsed fields + recompute                                        │
//! │  name parsed?    → greeting → thank-you message                         │
//! │  address parsed? → detect_location → district + delivery zone           │
//! │  validate merged document → warnings                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Applied { document, warnings }                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A stale result means a newer edit superseded the fill; steps applied
//! before the edit stay, later ones are dropped.

use serde::Serialize;
use tracing::{debug, info, warn};

use beshob_core::{CoreError, InvoiceDocument, InvoiceEdit};

use crate::assist::RequestToken;
use crate::error::{ApiError, ApiResult};
use crate::state::{AssistState, CatalogState, InvoiceState, SettingsState};

/// Result of a magic fill.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MagicFillOutcome {
    /// Blank input, nothing attempted.
    Skipped,
    /// The assist returned nothing usable.
    NothingParsed,
    /// A newer edit arrived while the assist was working.
    Stale,
    Applied {
        document: InvoiceDocument,
        warnings: Vec<String>,
    },
}

/// Fills the invoice from free text.
///
/// ## Errors
/// - `BUSY` while another magic fill is running (never queued)
/// - `INVOICE_COMMITTED` after commit
pub async fn magic_fill(
    assist: &AssistState,
    catalog: &CatalogState,
    settings: &SettingsState,
    invoice: &InvoiceState,
    text: &str,
) -> ApiResult<MagicFillOutcome> {
    if text.trim().is_empty() {
        debug!("magic_fill with blank text, skipping");
        return Ok(MagicFillOutcome::Skipped);
    }

    let _guard = invoice
        .try_begin_parsing()
        .ok_or_else(|| ApiError::busy("Magic fill is already running"))?;
    ensure_drafting(invoice)?;

    let token = invoice.sequencer().issue();
    debug!(token = token.value(), chars = text.chars().count(), "magic_fill command");

    let Some(parsed) = assist.service().parse(text).await else {
        info!("Magic fill found nothing to apply");
        return Ok(MagicFillOutcome::NothingParsed);
    };
    if is_stale(invoice, token, "parse") {
        return Ok(MagicFillOutcome::Stale);
    }

    let current = settings.snapshot();
    invoice.with_session_mut(|s| s.apply_parsed(&parsed, &current).map(|_| ()))?;

    if let Some(name) = parsed.customer_name() {
        let greeting = assist.service().greeting(name).await;
        if is_stale(invoice, token, "greeting") {
            return Ok(MagicFillOutcome::Stale);
        }
        let current = settings.snapshot();
        catalog.with_catalog(|c| {
            invoice.with_session_mut(|s| {
                s.edit(InvoiceEdit::ThankYouMessage(greeting), c, &current)
                    .map(|_| ())
            })
        })?;
    }

    if let Some(address) = parsed.customer_address() {
        if let Some(guess) = assist.service().detect_location(address).await {
            if is_stale(invoice, token, "location") {
                return Ok(MagicFillOutcome::Stale);
            }
            let current = settings.snapshot();
            invoice.with_session_mut(|s| s.apply_location(&guess, &current).map(|_| ()))?;
        }
    }

    let document = invoice.with_session(|s| s.document().clone());
    let warnings = assist.service().validate(&document).await;
    if is_stale(invoice, token, "validation") {
        return Ok(MagicFillOutcome::Stale);
    }
    invoice.set_warnings(warnings.clone());

    info!(
        items = document.items.len(),
        total = %document.total,
        warnings = warnings.len(),
        "Magic fill applied"
    );

    Ok(MagicFillOutcome::Applied { document, warnings })
}

/// Guesses district and delivery zone from the current address.
///
/// Returns the updated document, or `None` when the address is blank, the
/// assist had no answer, or the answer went stale.
pub async fn detect_location(
    assist: &AssistState,
    settings: &SettingsState,
    invoice: &InvoiceState,
) -> ApiResult<Option<InvoiceDocument>> {
    let address = invoice.with_session(|s| s.document().customer_address.trim().to_string());
    if address.is_empty() {
        return Ok(None);
    }
    ensure_drafting(invoice)?;

    let token = invoice.sequencer().issue();
    debug!(token = token.value(), "detect_location command");

    let Some(guess) = assist.service().detect_location(&address).await else {
        return Ok(None);
    };
    if is_stale(invoice, token, "location") {
        return Ok(None);
    }

    let current = settings.snapshot();
    let document =
        invoice.with_session_mut(|s| s.apply_location(&guess, &current).cloned())?;

    Ok(Some(document))
}

/// Asks the assist to review the invoice and stores its warnings.
pub async fn validate_invoice(assist: &AssistState, invoice: &InvoiceState) -> Vec<String> {
    let token = invoice.sequencer().issue();
    let document = invoice.with_session(|s| s.document().clone());

    let warnings = assist.service().validate(&document).await;
    if !is_stale(invoice, token, "validation") {
        invoice.set_warnings(warnings.clone());
    }

    warnings
}

fn ensure_drafting(invoice: &InvoiceState) -> Result<(), CoreError> {
    invoice.with_session(|s| {
        if s.is_committed() {
            Err(CoreError::InvoiceCommitted {
                invoice_number: s.document().invoice_number.clone(),
            })
        } else {
            Ok(())
        }
    })
}

fn is_stale(invoice: &InvoiceState, token: RequestToken, step: &str) -> bool {
    let stale = !invoice.sequencer().is_current(token);
    if stale {
        warn!(token = token.value(), step = %step, "Discarding stale assist response");
    }
    stale
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use super::*;
    use crate::assist::scripted::{Gate, ScriptedAssist};
    use crate::commands::invoice::{commit_invoice, edit_invoice};
    use crate::error::ErrorCode;
    use crate::testing::open_app;
    use beshob_core::{DeliveryType, LocationGuess, Money, ParsedInvoice};

    fn parsed(json: &str) -> Option<ParsedInvoice> {
        Some(serde_json::from_str(json).unwrap())
    }

    #[tokio::test]
    async fn test_blank_text_is_skipped() {
        let assist = Arc::new(ScriptedAssist::default());
        let app = open_app(assist.clone()).await;

        let outcome = magic_fill(&app.assist, &app.catalog, &app.settings, &app.invoice, "  ")
            .await
            .unwrap();

        assert!(matches!(outcome, MagicFillOutcome::Skipped));
        assert_eq!(assist.parse_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_name_only_changes_name_and_greeting() {
        let assist = Arc::new(ScriptedAssist {
            parsed: parsed(r#"{"customerName":"Rahim"}"#),
            greeting: "ধন্যবাদ রহিম!".to_string(),
            warnings: vec!["Phone number missing".to_string()],
            ..Default::default()
        });
        let app = open_app(assist.clone()).await;
        let before = app.invoice.with_session(|s| s.document().clone());

        let outcome = magic_fill(&app.assist, &app.catalog, &app.settings, &app.invoice, "Rahim")
            .await
            .unwrap();

        let MagicFillOutcome::Applied { document, warnings } = outcome else {
            panic!("expected applied outcome");
        };
        assert_eq!(document.customer_name, "Rahim");
        assert_eq!(document.thank_you_message.as_deref(), Some("ধন্যবাদ রহিম!"));
        assert_eq!(document.items, before.items);
        assert_eq!(document.customer_phone, before.customer_phone);
        assert_eq!(warnings, vec!["Phone number missing".to_string()]);
        assert_eq!(app.invoice.warnings(), warnings);
        assert_eq!(assist.location_calls.load(Ordering::SeqCst), 0);
        assert!(!app.invoice.is_parsing());
    }

    #[tokio::test]
    async fn test_full_fill_with_location() {
        let assist = Arc::new(ScriptedAssist {
            parsed: parsed(
                r#"{"customerName":"Karim","customerPhone":"+88 01712-345678",
                    "customerAddress":"Agrabad, Chattogram",
                    "items":[{"name":"Organic Honey","size":"1kg","quantity":1,"price":800},
                             {"name":"Ghee","size":"","quantity":0}],
                    "advancePayment":200}"#,
            ),
            location: Some(LocationGuess {
                district: Some("Chittagong".to_string()),
                delivery_type: Some("Outside Dhaka".to_string()),
            }),
            greeting: "ধন্যবাদ".to_string(),
            ..Default::default()
        });
        let app = open_app(assist).await;

        let outcome = magic_fill(
            &app.assist,
            &app.catalog,
            &app.settings,
            &app.invoice,
            "Karim ...",
        )
        .await
        .unwrap();

        let MagicFillOutcome::Applied { document, .. } = outcome else {
            panic!("expected applied outcome");
        };
        assert_eq!(document.customer_phone, "88017123456");
        assert_eq!(document.district, "Chittagong");
        assert_eq!(document.delivery_type, DeliveryType::OutsideDhaka);
        assert_eq!(document.delivery_charge, Money::from_taka(120));
        assert_eq!(document.items.len(), 2);
        assert_eq!(document.items[1].quantity, 1);
        assert_eq!(document.items[1].price, Money::zero());
        assert_eq!(document.subtotal, Money::from_taka(800));
        assert_eq!(document.total, Money::from_taka(920));
        assert_eq!(document.due, Money::from_taka(720));
    }

    #[tokio::test]
    async fn test_nothing_parsed_clears_busy_flag() {
        let app = open_app(Default::default()).await;

        let outcome = magic_fill(&app.assist, &app.catalog, &app.settings, &app.invoice, "hello")
            .await
            .unwrap();

        assert!(matches!(outcome, MagicFillOutcome::NothingParsed));
        assert!(!app.invoice.is_parsing());
    }

    #[tokio::test]
    async fn test_edit_during_parse_discards_response() {
        let gate = Gate::default();
        let assist = Arc::new(ScriptedAssist {
            parsed: parsed(r#"{"customerName":"From AI"}"#),
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let app = open_app(assist).await;

        let fill = magic_fill(&app.assist, &app.catalog, &app.settings, &app.invoice, "text");
        let user = async {
            gate.entered.notified().await;
            edit_invoice(
                &app.catalog,
                &app.settings,
                &app.invoice,
                InvoiceEdit::CustomerName("Typed by user".to_string()),
            )
            .unwrap();
            gate.release.notify_one();
        };

        let (outcome, ()) = tokio::join!(fill, user);

        assert!(matches!(outcome.unwrap(), MagicFillOutcome::Stale));
        let name = app.invoice.with_session(|s| s.document().customer_name.clone());
        assert_eq!(name, "Typed by user");
        assert!(!app.invoice.is_parsing());
    }

    #[tokio::test]
    async fn test_second_fill_while_busy_is_refused() {
        let gate = Gate::default();
        let assist = Arc::new(ScriptedAssist {
            parsed: parsed(r#"{"customerName":"Rahim"}"#),
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let app = open_app(assist.clone()).await;

        let first = magic_fill(&app.assist, &app.catalog, &app.settings, &app.invoice, "one");
        let second = async {
            gate.entered.notified().await;
            let result =
                magic_fill(&app.assist, &app.catalog, &app.settings, &app.invoice, "two").await;
            gate.release.notify_one();
            result
        };

        let (first, second) = tokio::join!(first, second);

        assert!(matches!(first.unwrap(), MagicFillOutcome::Applied { .. }));
        assert_eq!(second.unwrap_err().code, ErrorCode::Busy);
        assert_eq!(assist.parse_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fill_after_commit_is_rejected() {
        let assist = Arc::new(ScriptedAssist {
            parsed: parsed(r#"{"customerName":"Rahim"}"#),
            ..Default::default()
        });
        let app = open_app(assist).await;
        commit_invoice(&app.db, &app.settings, &app.invoice)
            .await
            .unwrap();

        let err = magic_fill(&app.assist, &app.catalog, &app.settings, &app.invoice, "Rahim")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvoiceCommitted);
        assert!(!app.invoice.is_parsing());
    }

    #[tokio::test]
    async fn test_detect_location_from_address() {
        let assist = Arc::new(ScriptedAssist {
            location: Some(LocationGuess {
                district: Some("Sylhet".to_string()),
                delivery_type: Some("outside dhaka".to_string()),
            }),
            ..Default::default()
        });
        let app = open_app(assist.clone()).await;

        assert!(detect_location(&app.assist, &app.settings, &app.invoice)
            .await
            .unwrap()
            .is_none());
        assert_eq!(assist.location_calls.load(Ordering::SeqCst), 0);

        edit_invoice(
            &app.catalog,
            &app.settings,
            &app.invoice,
            InvoiceEdit::CustomerAddress("Zindabazar, Sylhet".to_string()),
        )
        .unwrap();

        let doc = detect_location(&app.assist, &app.settings, &app.invoice)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.district, "Sylhet");
        assert_eq!(doc.delivery_charge, Money::from_taka(120));
    }

    #[tokio::test]
    async fn test_validate_invoice_stores_warnings() {
        let assist = Arc::new(ScriptedAssist {
            warnings: vec!["Price looks low".to_string()],
            ..Default::default()
        });
        let app = open_app(assist).await;

        let warnings = validate_invoice(&app.assist, &app.invoice).await;
        assert_eq!(warnings, vec!["Price looks low".to_string()]);
        assert_eq!(app.invoice.warnings(), warnings);
    }
}
