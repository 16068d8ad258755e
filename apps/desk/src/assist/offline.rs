//! Offline assist: never guesses, always thanks.

use async_trait::async_trait;
use tracing::debug;

use beshob_core::{InvoiceDocument, LocationGuess, ParsedInvoice};

use super::{AssistService, GREETING_FALLBACK};

/// Used when no API key is configured or assist is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAssist;

#[async_trait]
impl AssistService for OfflineAssist {
    async fn parse(&self, _text: &str) -> Option<ParsedInvoice> {
        debug!("Assist offline, nothing parsed");
        None
    }

    async fn detect_location(&self, _address: &str) -> Option<LocationGuess> {
        None
    }

    async fn greeting(&self, _customer_name: &str) -> String {
        GREETING_FALLBACK.to_string()
    }

    async fn validate(&self, _document: &InvoiceDocument) -> Vec<String> {
        Vec::new()
    }
}
