// src/extraction/extractor.rs
use super::error::ExtractorError;
use super::ExtractionResult;
use crate::config::ExtractorConfig;
use anyhow::{Context, Result};
use reqwest::Client;
use schemars::schema_for;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

const SYSTEM_PROMPT: &str = "You are an expert HR assistant. \
    Extract the compensation and start date from the offer letter content.";

/// Structured extraction against an OpenAI-compatible chat completions
/// endpoint. The response format is pinned to the `ExtractionResult`
/// schema, so the model must produce both fields or fail the call.
pub struct OfferLetterExtractor {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    output_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl OfferLetterExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        let output_schema = serde_json::to_value(schema_for!(ExtractionResult))
            .context("Failed to build offer letter output schema")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            output_schema,
        })
    }

    /// One completion call constrained to the output schema. Oversized
    /// content is passed through untruncated; repeated calls on identical
    /// input may differ.
    pub async fn extract(&self, content: &str) -> Result<ExtractionResult, ExtractorError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": format!("Offer Letter Content: {}", content) },
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "offer_letter_facts",
                    "schema": self.output_schema,
                    "strict": true,
                },
            },
        });

        info!(
            "Requesting offer letter extraction ({} chars of content)",
            content.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ExtractorError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ExtractorError::Api { status, detail });
        }

        let payload = response.text().await.map_err(ExtractorError::Request)?;
        let completion: ChatCompletionResponse = serde_json::from_str(&payload)
            .map_err(|e| ExtractorError::MalformedResponse(e.to_string()))?;

        let message = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ExtractorError::MalformedResponse("empty choices".to_string()))?;

        let result: ExtractionResult =
            serde_json::from_str(&message).map_err(ExtractorError::Schema)?;

        info!("Successfully extracted offer letter facts");
        Ok(result)
    }
}
