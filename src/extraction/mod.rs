// src/extraction/mod.rs
use crate::config::ExtractorConfig;
use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod normalizer;

pub use error::ExtractionError;
pub use extractor::OfferLetterExtractor;
pub use fetcher::ContentFetcher;

/// Caller-supplied input for one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    pub offer_letter_url: String,
}

/// The two facts pulled out of an offer letter. Both are free-form
/// natural-language strings as produced by the model; any date formatting
/// belongs to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExtractionResult {
    /// The compensation mentioned in the offer letter.
    pub compensation: String,
    /// The start date mentioned in the offer letter.
    pub start_date: String,
}

/// Runs the fetch → normalize → extract pipeline for one offer letter URL.
///
/// Stateless between calls: concurrent runs share nothing but the
/// underlying HTTP clients, so no coordination is needed.
pub struct OfferExtractionService {
    fetcher: ContentFetcher,
    extractor: OfferLetterExtractor,
}

impl OfferExtractionService {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        Ok(Self {
            fetcher: ContentFetcher::new()?,
            extractor: OfferLetterExtractor::new(config)?,
        })
    }

    /// Strictly sequential, all-or-nothing: a failure at any stage aborts
    /// the run and nothing is retried.
    pub async fn run(
        &self,
        request: &ExtractionRequest,
    ) -> Result<ExtractionResult, ExtractionError> {
        let url = validate_offer_url(&request.offer_letter_url)?;

        let raw_html = self.fetcher.fetch(&url).await?;
        let content = normalizer::normalize(&raw_html)?;
        let result = self.extractor.extract(&content).await?;

        info!("Extracted offer facts from {}", url);
        Ok(result)
    }
}

/// The URL must be absolute http(s); anything else is rejected before any
/// network traffic happens.
fn validate_offer_url(raw: &str) -> Result<Url, ExtractionError> {
    let url = Url::parse(raw).map_err(|_| ExtractionError::InvalidUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ExtractionError::InvalidUrl(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_http_urls() {
        assert!(validate_offer_url("https://example.com/offer").is_ok());
        assert!(validate_offer_url("http://example.com/offer?id=7").is_ok());
    }

    #[test]
    fn rejects_plain_text_and_relative_urls() {
        assert!(matches!(
            validate_offer_url("not-a-url"),
            Err(ExtractionError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_offer_url("/letters/offer.html"),
            Err(ExtractionError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_offer_url(""),
            Err(ExtractionError::InvalidUrl(_))
        ));
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(matches!(
            validate_offer_url("ftp://example.com/offer.pdf"),
            Err(ExtractionError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_offer_url("javascript:alert(1)"),
            Err(ExtractionError::InvalidUrl(_))
        ));
    }

    #[test]
    fn request_and_result_use_camel_case_wire_names() {
        let request: ExtractionRequest =
            serde_json::from_str(r#"{"offerLetterUrl": "https://example.com/offer"}"#).unwrap();
        assert_eq!(request.offer_letter_url, "https://example.com/offer");

        let result = ExtractionResult {
            compensation: "$150,000".to_string(),
            start_date: "June 1, 2024".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["startDate"], "June 1, 2024");
    }
}
