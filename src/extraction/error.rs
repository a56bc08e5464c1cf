// src/extraction/error.rs
use thiserror::Error;

/// Errors from the content fetch stage.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("offer letter URL returned HTTP {status}")]
    Status { status: reqwest::StatusCode },

    #[error("failed to reach the offer letter URL")]
    Network(#[source] reqwest::Error),

    #[error("failed to read the offer letter response body")]
    Body(#[source] reqwest::Error),
}

/// Errors from the text normalization stage.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Stripping scripts and styles left nothing to extract.
    #[error("document contains no extractable text")]
    EmptyDocument,
}

/// Errors from the model extraction stage.
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("extraction service returned HTTP {status}: {detail}")]
    Api {
        status: reqwest::StatusCode,
        detail: String,
    },

    #[error("failed to reach the extraction service")]
    Request(#[source] reqwest::Error),

    #[error("extraction service returned an unexpected payload: {0}")]
    MalformedResponse(String),

    #[error("model output did not match the offer letter schema")]
    Schema(#[source] serde_json::Error),
}

/// Failure of a single extraction run, one variant per pipeline stage.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid offer letter URL: {0}")]
    InvalidUrl(String),

    #[error("fetch failed: {0}")]
    FetchFailed(#[from] FetchError),

    #[error("parse failed: {0}")]
    ParseFailed(#[from] ParseError),

    #[error("extraction failed: {0}")]
    ExtractionFailed(#[from] ExtractorError),
}

impl ExtractionError {
    /// Stable code for programmatic callers.
    pub fn code(&self) -> &'static str {
        match self {
            ExtractionError::InvalidUrl(_) => "INVALID_URL",
            ExtractionError::FetchFailed(_) => "FETCH_FAILED",
            ExtractionError::ParseFailed(_) => "PARSE_FAILED",
            ExtractionError::ExtractionFailed(_) => "EXTRACTION_FAILED",
        }
    }

    /// Single message shown to end users; the failure detail stays in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExtractionError::InvalidUrl(_) => "Please enter a valid URL.",
            _ => {
                "An error occurred while extracting information. \
                 Please check the URL and try again."
            }
        }
    }
}
