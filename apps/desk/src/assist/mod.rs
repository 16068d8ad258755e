//! # AI Assist Adapter
//!
//! The seam between the invoice form and a remote language model.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     AssistService (trait)                               │
//! │                                                                         │
//! │  parse("Rahim 017.. 2 honey 500gm")  → Option<ParsedInvoice>            │
//! │  detect_location("Agrabad, Ctg")     → Option<LocationGuess>            │
//! │  greeting("Rahim")                   → String   (never fails)           │
//! │  validate(&document)                 → Vec<String> (empty on failure)   │
//! │                                                                         │
//! │  ┌──────────────────┐          ┌──────────────────┐                     │
//! │  │  GeminiAssist    │          │  OfflineAssist   │                     │
//! │  │  reqwest, JSON   │          │  nothing parsed, │                     │
//! │  │  schema output   │          │  canned greeting │                     │
//! │  └──────────────────┘          └──────────────────┘                     │
//! │                                                                         │
//! │  Failures are logged with warn! and degrade to the no-op result.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stale responses are filtered by the caller with a [`RequestSequencer`].

mod gemini;
mod offline;
mod sequencer;

#[cfg(test)]
pub(crate) mod scripted;

pub use gemini::GeminiAssist;
pub use offline::OfflineAssist;
pub use sequencer::{RequestSequencer, RequestToken};

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use beshob_core::{InvoiceDocument, LocationGuess, ParsedInvoice};

use crate::config::AssistConfig;

/// Greeting used whenever a generated one is unavailable.
pub const GREETING_FALLBACK: &str = "আপনার অর্ডারের জন্য অসংখ্য ধন্যবাদ!";

/// Text in, structured guess out.
#[async_trait]
pub trait AssistService: Send + Sync {
    /// Extracts invoice fields from free text.
    async fn parse(&self, text: &str) -> Option<ParsedInvoice>;

    /// Guesses district and delivery zone from an address.
    async fn detect_location(&self, address: &str) -> Option<LocationGuess>;

    /// A short thank-you message for the customer.
    async fn greeting(&self, customer_name: &str) -> String;

    /// Warnings about the invoice, e.g. a bad phone number.
    async fn validate(&self, document: &InvoiceDocument) -> Vec<String>;
}

/// Remote call failures, internal to the adapter.
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Assist service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Assist service returned no text")]
    EmptyResponse,

    #[error("Assist output is not the expected JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Picks the implementation for the given settings.
///
/// Without an API key, or if the HTTP client cannot be built, assist runs
/// offline.
pub fn build_service(config: &AssistConfig) -> Arc<dyn AssistService> {
    if !config.is_remote() {
        info!("AI assist running offline");
        return Arc::new(OfflineAssist);
    }

    match GeminiAssist::new(config) {
        Ok(service) => {
            info!(model = %config.model, "AI assist using Gemini");
            Arc::new(service)
        }
        Err(e) => {
            warn!(error = %e, "Could not build assist client, running offline");
            Arc::new(OfflineAssist)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_service_without_key_is_offline() {
        let service = build_service(&AssistConfig::default());
        assert_eq!(service.greeting("Rahim").await, GREETING_FALLBACK);
        assert!(service.parse("anything").await.is_none());
    }
}
