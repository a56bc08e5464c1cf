// src/web/handlers/offer_handlers.rs - offer letter extraction endpoints

use crate::database::{DatabaseConfig, JobRepository};
use crate::extraction::{
    ExtractionError, ExtractionRequest, ExtractionResult, OfferExtractionService,
};
use crate::web::types::{DataResponse, StandardErrorResponse, StandardRequest, WithConversationId};

use rocket::serde::json::Json;
use rocket::State;
use sqlx::SqlitePool;
use tracing::{error, info};

/// Standalone extraction: run the pipeline and hand the facts back to the
/// caller without touching any job record.
pub async fn extract_offer_handler(
    request: Json<StandardRequest<ExtractionRequest>>,
    service: &State<OfferExtractionService>,
) -> Result<Json<DataResponse<ExtractionResult>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();

    info!(
        "Extracting offer letter data from {}",
        request.data.offer_letter_url
    );

    match service.run(&request.data).await {
        Ok(result) => Ok(Json(DataResponse::success(
            "Offer letter data extracted successfully".to_string(),
            result,
            conversation_id,
        ))),
        Err(e) => {
            error!(
                "Offer extraction failed for {}: {}",
                request.data.offer_letter_url, e
            );
            Err(Json(extraction_error_response(&e, conversation_id)))
        }
    }
}

/// Extraction for an existing job record. The caller gets the extraction
/// result immediately; the merge into the record runs in a spawned task
/// and a failed write only shows up in the log.
pub async fn record_offer_handler(
    id: &str,
    request: Json<StandardRequest<ExtractionRequest>>,
    service: &State<OfferExtractionService>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<ExtractionResult>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let pool = super::pool_or_error(db_config, &conversation_id)?;

    // The record must exist before any network work starts.
    match JobRepository::new(pool).find_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(Json(StandardErrorResponse::new(
                format!("Job record {} not found", id),
                "JOB_NOT_FOUND".to_string(),
                vec!["Check the job record id".to_string()],
                conversation_id,
            )));
        }
        Err(e) => {
            error!("Failed to load job record {}: {}", id, e);
            return Err(Json(StandardErrorResponse::new(
                "Failed to load job record".to_string(),
                "DATABASE_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
                conversation_id,
            )));
        }
    }

    info!(
        "Recording offer for job {} from {}",
        id, request.data.offer_letter_url
    );

    let result = match service.run(&request.data).await {
        Ok(result) => result,
        Err(e) => {
            error!("Offer extraction failed for job {}: {}", id, e);
            return Err(Json(extraction_error_response(&e, conversation_id)));
        }
    };

    let write_pool = SqlitePool::clone(pool);
    let job_id = id.to_string();
    let offer_letter_url = request.data.offer_letter_url.clone();
    let facts = result.clone();
    tokio::spawn(async move {
        if let Err(e) = JobRepository::new(&write_pool)
            .record_offer(&job_id, &offer_letter_url, &facts)
            .await
        {
            error!("Failed to persist offer details for job {}: {}", job_id, e);
        }
    });

    Ok(Json(DataResponse::success(
        "Offer letter data extracted successfully".to_string(),
        result,
        conversation_id,
    )))
}

fn extraction_error_response(
    error: &ExtractionError,
    conversation_id: Option<String>,
) -> StandardErrorResponse {
    StandardErrorResponse::new(
        error.user_message().to_string(),
        error.code().to_string(),
        extraction_suggestions(error),
        conversation_id,
    )
}

fn extraction_suggestions(error: &ExtractionError) -> Vec<String> {
    match error {
        ExtractionError::InvalidUrl(_) => vec![
            "Enter an absolute http(s) URL".to_string(),
            "Example: https://example.com/offer-letter".to_string(),
        ],
        ExtractionError::FetchFailed(_) => vec![
            "Verify the offer letter URL is accessible".to_string(),
            "The page may be behind authentication or no longer available".to_string(),
        ],
        ExtractionError::ParseFailed(_) => vec![
            "The page returned no readable text".to_string(),
            "Try a link to an HTML version of the offer letter".to_string(),
        ],
        ExtractionError::ExtractionFailed(_) => vec![
            "The extraction service may be temporarily unavailable".to_string(),
            "Try again in a few moments".to_string(),
        ],
    }
}
