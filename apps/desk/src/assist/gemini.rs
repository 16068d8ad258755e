//! # Gemini Assist
//!
//! [`AssistService`] over the Gemini `generateContent` REST endpoint.
//!
//! ## Request Shape
//! ```text
//! POST {endpoint}/v1beta/models/{model}:generateContent
//! x-goog-api-key: {api_key}
//!
//! {
//!   "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
//!   "generationConfig": {                       ← omitted for greetings
//!     "responseMimeType": "application/json",
//!     "responseSchema": { "type": "OBJECT", ... }
//!   }
//! }
//! ```
//!
//! The answer is the concatenated text of the first candidate's parts; for
//! structured calls that text is itself JSON matching the schema.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use beshob_core::{InvoiceDocument, LocationGuess, ParsedInvoice};

use super::{AssistError, AssistService, GREETING_FALLBACK};
use crate::config::AssistConfig;

/// Gemini-backed assist client.
#[derive(Debug, Clone)]
pub struct GeminiAssist {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiAssist {
    /// Builds the HTTP client from the `[assist]` section.
    pub fn new(config: &AssistConfig) -> Result<Self, AssistError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }

    /// Sends one prompt and returns the model's text.
    async fn generate(&self, prompt: &str, schema: Option<Value>) -> Result<String, AssistError> {
        let body = request_body(prompt, schema);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateResponse = response.json().await?;
        payload.text().ok_or(AssistError::EmptyResponse)
    }

    async fn generate_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        schema: Value,
    ) -> Result<T, AssistError> {
        let text = self.generate(prompt, Some(schema)).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl AssistService for GeminiAssist {
    async fn parse(&self, text: &str) -> Option<ParsedInvoice> {
        debug!(chars = text.chars().count(), "Assist parse request");
        match self.generate_json(&parse_prompt(text), parse_schema()).await {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(error = %e, "AI parsing failed");
                None
            }
        }
    }

    async fn detect_location(&self, address: &str) -> Option<LocationGuess> {
        match self
            .generate_json(&location_prompt(address), location_schema())
            .await
        {
            Ok(guess) => Some(guess),
            Err(e) => {
                warn!(error = %e, "AI location detection failed");
                None
            }
        }
    }

    async fn greeting(&self, customer_name: &str) -> String {
        match self.generate(&greeting_prompt(customer_name), None).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => GREETING_FALLBACK.to_string(),
            Err(e) => {
                warn!(error = %e, "AI greeting failed, using fallback");
                GREETING_FALLBACK.to_string()
            }
        }
    }

    async fn validate(&self, document: &InvoiceDocument) -> Vec<String> {
        let data = match serde_json::to_string(document) {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "Could not encode invoice for validation");
                return Vec::new();
            }
        };

        match self
            .generate_json::<ValidationAnswer>(&validation_prompt(&data), validation_schema())
            .await
        {
            Ok(answer) => answer.warnings,
            Err(e) => {
                warn!(error = %e, "AI validation failed");
                Vec::new()
            }
        }
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ValidationAnswer {
    #[serde(default)]
    warnings: Vec<String>,
}

fn request_body(prompt: &str, schema: Option<Value>) -> Value {
    let mut body = json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
    });

    if let Some(schema) = schema {
        body["generationConfig"] = json!({
            "responseMimeType": "application/json",
            "responseSchema": schema,
        });
    }

    body
}

// =============================================================================
// Prompts and Schemas
// =============================================================================

fn parse_prompt(text: &str) -> String {
    format!(
        "Parse the following Bangladeshi business order input into a structured JSON format: \"{text}\".\n\
         Extract name, phone, address, items (name, size, quantity, price), deliveryType \
         (Inside Dhaka or Outside Dhaka), and advancePayment.\n\
         If a field is not found, leave it empty or null. Try to infer BDT prices if possible."
    )
}

fn parse_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "customerName": { "type": "STRING" },
            "customerPhone": { "type": "STRING" },
            "customerAddress": { "type": "STRING" },
            "items": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "size": { "type": "STRING" },
                        "quantity": { "type": "NUMBER" },
                        "price": { "type": "NUMBER" }
                    }
                }
            },
            "deliveryType": {
                "type": "STRING",
                "description": "Must be 'Inside Dhaka' or 'Outside Dhaka'"
            },
            "advancePayment": { "type": "NUMBER" }
        }
    })
}

fn location_prompt(address: &str) -> String {
    format!(
        "Based on this Bangladeshi address: \"{address}\", determine the District and whether \
         it's \"Inside Dhaka\" or \"Outside Dhaka\". Return JSON."
    )
}

fn location_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "district": { "type": "STRING" },
            "deliveryType": {
                "type": "STRING",
                "description": "'Inside Dhaka' or 'Outside Dhaka'"
            }
        }
    })
}

fn greeting_prompt(customer_name: &str) -> String {
    format!(
        "Generate a polite, professional, and friendly Bangladeshi thank you message in Bengali \
         for a customer named {customer_name} who just placed an order. Keep it short and \
         heart-touching."
    )
}

fn validation_prompt(data: &str) -> String {
    format!(
        "Review this invoice data and check for issues common in Bangladesh (invalid phone \
         format, missing delivery type, suspicious pricing, or negative balance).\n\
         Data: {data}\n\
         Provide a list of warnings if any, or an empty list if it looks good."
    )
}

fn validation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "warnings": { "type": "ARRAY", "items": { "type": "STRING" } }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_joins_parts() {
        let payload: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"customerName\":"},{"text":"\"Rahim\"}"}]}}]}"#,
        )
        .unwrap();

        let text = payload.text().unwrap();
        let parsed: ParsedInvoice = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.customer_name(), Some("Rahim"));
    }

    #[test]
    fn test_empty_candidates_have_no_text() {
        let payload: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(payload.text().is_none());

        let payload: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(payload.text().is_none());
    }

    #[test]
    fn test_request_body_schema_only_when_structured() {
        let plain = request_body("hello", None);
        assert!(plain.get("generationConfig").is_none());

        let structured = request_body("hello", Some(location_schema()));
        assert_eq!(
            structured["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            structured["generationConfig"]["responseSchema"]["properties"]["district"]["type"],
            "STRING"
        );
    }

    #[test]
    fn test_url_uses_model() {
        let config = AssistConfig {
            api_key: Some("k".to_string()),
            endpoint: "https://example.test/".to_string(),
            ..AssistConfig::default()
        };
        let assist = GeminiAssist::new(&config).unwrap();
        assert_eq!(
            assist.url(),
            "https://example.test/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_degrades() {
        let config = AssistConfig {
            api_key: Some("k".to_string()),
            endpoint: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..AssistConfig::default()
        };
        let assist = GeminiAssist::new(&config).unwrap();

        assert!(assist.parse("Rahim 01712345678").await.is_none());
        assert!(assist.detect_location("Agrabad").await.is_none());
        assert_eq!(assist.greeting("Rahim").await, GREETING_FALLBACK);
    }
}
