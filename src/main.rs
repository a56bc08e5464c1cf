use anyhow::Result;
use clap::Parser;
use job_tracker::{start_web_server, ConfigManager};
use std::path::PathBuf;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "jobtrack", about = "Job interview pipeline tracker API server")]
struct Cli {
    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Override the SQLite database path
    #[arg(long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or(EnvFilter::new("job_tracker=info,rocket=warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ConfigManager::load()?;
    if let Some(database) = cli.database {
        config.environment.database_path = database;
    }

    info!("Starting Job Tracker API Server");
    info!(
        "Environment: {}",
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string())
    );
    info!("Database: {}", config.environment.database_path.display());
    info!("Extraction model: {}", config.extractor.model);
    info!("Server: http://0.0.0.0:{}", cli.port);

    start_web_server(config, cli.port).await
}
