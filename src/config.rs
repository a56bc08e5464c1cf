// src/config.rs
//! Unified configuration management, loaded once at startup from the
//! environment.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub extractor: ExtractorConfig,
}

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub database_path: PathBuf,
}

/// Settings for the offer letter extraction service.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl ConfigManager {
    /// Load all configurations
    pub fn load() -> Result<Self> {
        let environment = Self::load_environment()?;
        let extractor = Self::load_extractor()?;

        Ok(Self {
            environment,
            extractor,
        })
    }

    fn load_environment() -> Result<EnvironmentConfig> {
        let env = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
        info!("Loading environment configuration for: {}", env);

        let base_dir = if env == "production" {
            PathBuf::from("/app")
        } else {
            std::env::current_dir().context("Failed to get current directory")?
        };

        Ok(EnvironmentConfig {
            database_path: base_dir.join("jobtrack.db"),
        })
    }

    fn load_extractor() -> Result<ExtractorConfig> {
        let api_key = std::env::var("EXTRACTION_API_KEY")
            .context("EXTRACTION_API_KEY environment variable not set")?;

        let api_url = std::env::var("EXTRACTION_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let model =
            std::env::var("EXTRACTION_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Ok(ExtractorConfig {
            api_url,
            api_key,
            model,
            timeout_seconds: 60,
        })
    }
}
