// src/web/handlers/job_handlers.rs - job record CRUD

use crate::database::{
    DatabaseConfig, JobRecord, JobRecordUpdate, JobRepository, NewInterviewStage, NewJobRecord,
};
use crate::web::types::{
    ActionResponse, DataResponse, StandardErrorResponse, StandardRequest, WithConversationId,
};

use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn create_job_handler(
    request: Json<StandardRequest<NewJobRecord>>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<JobRecord>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let pool = super::pool_or_error(db_config, &conversation_id)?;

    info!("Creating job record for {}", request.data.company_name);

    match JobRepository::new(pool).create(&request.data).await {
        Ok(record) => Ok(Json(DataResponse::success(
            format!("Application for {} created", record.company_name),
            record,
            conversation_id,
        ))),
        Err(e) => {
            error!(
                "Failed to create job record for {}: {}",
                request.data.company_name, e
            );
            Err(Json(StandardErrorResponse::new(
                "Failed to create job record".to_string(),
                "JOB_CREATE_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
                conversation_id,
            )))
        }
    }
}

pub async fn list_jobs_handler(
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<Vec<JobRecord>>>, Json<StandardErrorResponse>> {
    let pool = super::pool_or_error(db_config, &None)?;

    match JobRepository::new(pool).list().await {
        Ok(records) => Ok(Json(DataResponse::success(
            format!("{} applications", records.len()),
            records,
            None,
        ))),
        Err(e) => {
            error!("Failed to list job records: {}", e);
            Err(Json(StandardErrorResponse::new(
                "Failed to list job records".to_string(),
                "JOB_LIST_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
                None,
            )))
        }
    }
}

pub async fn get_job_handler(
    id: &str,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<JobRecord>>, Json<StandardErrorResponse>> {
    let pool = super::pool_or_error(db_config, &None)?;

    match JobRepository::new(pool).find_by_id(id).await {
        Ok(Some(record)) => Ok(Json(DataResponse::success(
            "Job record found".to_string(),
            record,
            None,
        ))),
        Ok(None) => Err(Json(job_not_found(id, None))),
        Err(e) => {
            error!("Failed to load job record {}: {}", id, e);
            Err(Json(database_error(None)))
        }
    }
}

pub async fn update_job_handler(
    id: &str,
    request: Json<StandardRequest<JobRecordUpdate>>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<JobRecord>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let pool = super::pool_or_error(db_config, &conversation_id)?;

    match JobRepository::new(pool).update(id, &request.data).await {
        Ok(Some(record)) => {
            info!("Updated job record {}", id);
            Ok(Json(DataResponse::success(
                "Job record updated".to_string(),
                record,
                conversation_id,
            )))
        }
        Ok(None) => Err(Json(job_not_found(id, conversation_id))),
        Err(e) => {
            error!("Failed to update job record {}: {}", id, e);
            Err(Json(database_error(conversation_id)))
        }
    }
}

pub async fn delete_job_handler(
    id: &str,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let pool = super::pool_or_error(db_config, &None)?;

    match JobRepository::new(pool).delete(id).await {
        Ok(true) => Ok(Json(ActionResponse::success(
            "Job record deleted".to_string(),
            "deleted".to_string(),
            None,
        ))),
        Ok(false) => Err(Json(job_not_found(id, None))),
        Err(e) => {
            error!("Failed to delete job record {}: {}", id, e);
            Err(Json(database_error(None)))
        }
    }
}

pub async fn add_stage_handler(
    id: &str,
    request: Json<StandardRequest<NewInterviewStage>>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<JobRecord>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let pool = super::pool_or_error(db_config, &conversation_id)?;

    info!("Adding stage '{}' to job {}", request.data.name, id);

    match JobRepository::new(pool).add_stage(id, &request.data).await {
        Ok(Some(record)) => Ok(Json(DataResponse::success(
            format!("Stage '{}' added", request.data.name),
            record,
            conversation_id,
        ))),
        Ok(None) => Err(Json(job_not_found(id, conversation_id))),
        Err(e) => {
            error!("Failed to add stage to job record {}: {}", id, e);
            Err(Json(database_error(conversation_id)))
        }
    }
}

fn job_not_found(id: &str, conversation_id: Option<String>) -> StandardErrorResponse {
    StandardErrorResponse::new(
        format!("Job record {} not found", id),
        "JOB_NOT_FOUND".to_string(),
        vec!["Check the job record id".to_string()],
        conversation_id,
    )
}

fn database_error(conversation_id: Option<String>) -> StandardErrorResponse {
    StandardErrorResponse::new(
        "Database operation failed".to_string(),
        "DATABASE_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
        conversation_id,
    )
}
