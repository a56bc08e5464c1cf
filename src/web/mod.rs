// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::config::ConfigManager;
use crate::database::{
    DatabaseConfig, JobRecord, JobRecordUpdate, NewInterviewStage, NewJobRecord,
};
use crate::extraction::{ExtractionRequest, ExtractionResult, OfferExtractionService};
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, patch, post, routes, Request, Response, State};
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PATCH, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[post("/extract-offer", data = "<request>")]
pub async fn extract_offer(
    request: Json<StandardRequest<ExtractionRequest>>,
    service: &State<OfferExtractionService>,
) -> Result<Json<DataResponse<ExtractionResult>>, Json<StandardErrorResponse>> {
    handlers::extract_offer_handler(request, service).await
}

#[post("/jobs", data = "<request>")]
pub async fn create_job(
    request: Json<StandardRequest<NewJobRecord>>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<JobRecord>>, Json<StandardErrorResponse>> {
    handlers::create_job_handler(request, db_config).await
}

#[get("/jobs")]
pub async fn list_jobs(
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<Vec<JobRecord>>>, Json<StandardErrorResponse>> {
    handlers::list_jobs_handler(db_config).await
}

#[get("/jobs/<id>")]
pub async fn get_job(
    id: &str,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<JobRecord>>, Json<StandardErrorResponse>> {
    handlers::get_job_handler(id, db_config).await
}

#[patch("/jobs/<id>", data = "<request>")]
pub async fn update_job(
    id: &str,
    request: Json<StandardRequest<JobRecordUpdate>>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<JobRecord>>, Json<StandardErrorResponse>> {
    handlers::update_job_handler(id, request, db_config).await
}

#[post("/jobs/<id>/delete")]
pub async fn delete_job(
    id: &str,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::delete_job_handler(id, db_config).await
}

#[post("/jobs/<id>/stages", data = "<request>")]
pub async fn add_stage(
    id: &str,
    request: Json<StandardRequest<NewInterviewStage>>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<JobRecord>>, Json<StandardErrorResponse>> {
    handlers::add_stage_handler(id, request, db_config).await
}

#[post("/jobs/<id>/offer", data = "<request>")]
pub async fn record_offer(
    id: &str,
    request: Json<StandardRequest<ExtractionRequest>>,
    service: &State<OfferExtractionService>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<ExtractionResult>>, Json<StandardErrorResponse>> {
    handlers::record_offer_handler(id, request, service, db_config).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

// Main server start function
pub async fn start_web_server(config: ConfigManager, port: u16) -> Result<()> {
    let extraction_service = OfferExtractionService::new(&config.extractor)?;

    let mut db_config = DatabaseConfig::new(config.environment.database_path);

    if let Err(e) = db_config.init_pool().await {
        error!("Failed to initialize database: {}", e);
        return Err(e);
    }

    if let Err(e) = db_config.migrate().await {
        error!("Failed to run database migrations: {}", e);
        return Err(e);
    }

    info!("Starting job tracker API server");
    info!("Database: {}", db_config.database_path.display());

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    let _rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(extraction_service)
        .manage(db_config)
        .register("/api", catchers![bad_request, internal_error])
        .mount(
            "/api",
            routes![
                extract_offer,
                create_job,
                list_jobs,
                get_job,
                update_job,
                delete_job,
                add_stage,
                record_offer,
                health,
                options,
            ],
        )
        .launch()
        .await;

    Ok(())
}
