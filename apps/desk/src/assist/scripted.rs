//! Scripted assist double for command tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use beshob_core::{InvoiceDocument, LocationGuess, ParsedInvoice};

use super::AssistService;

/// Returns canned answers; `parse` can be held open to simulate latency.
#[derive(Debug, Default)]
pub struct ScriptedAssist {
    pub parsed: Option<ParsedInvoice>,
    pub location: Option<LocationGuess>,
    pub greeting: String,
    pub warnings: Vec<String>,
    /// When set, `parse` signals `entered` and waits for `release`.
    pub gate: Option<Gate>,
    pub parse_calls: AtomicUsize,
    pub location_calls: AtomicUsize,
}

#[derive(Debug, Clone, Default)]
pub struct Gate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

#[async_trait]
impl AssistService for ScriptedAssist {
    async fn parse(&self, _text: &str) -> Option<ParsedInvoice> {
        self.parse_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.parsed.clone()
    }

    async fn detect_location(&self, _address: &str) -> Option<LocationGuess> {
        self.location_calls.fetch_add(1, Ordering::SeqCst);
        self.location.clone()
    }

    async fn greeting(&self, _customer_name: &str) -> String {
        self.greeting.clone()
    }

    async fn validate(&self, _document: &InvoiceDocument) -> Vec<String> {
        self.warnings.clone()
    }
}
