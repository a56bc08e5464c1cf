pub mod job_handlers;
pub mod offer_handlers;
pub mod system_handlers;

pub use job_handlers::*;
pub use offer_handlers::*;
pub use system_handlers::*;

use crate::database::DatabaseConfig;
use crate::web::types::StandardErrorResponse;
use rocket::serde::json::Json;
use rocket::State;
use sqlx::SqlitePool;
use tracing::error;

pub(crate) fn pool_or_error<'a>(
    db_config: &'a State<DatabaseConfig>,
    conversation_id: &Option<String>,
) -> Result<&'a SqlitePool, Json<StandardErrorResponse>> {
    match db_config.pool() {
        Ok(pool) => Ok(pool),
        Err(e) => {
            error!("Database connection failed: {}", e);
            Err(Json(StandardErrorResponse::new(
                "Database connection failed".to_string(),
                "DATABASE_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
                conversation_id.clone(),
            )))
        }
    }
}
