// src/database.rs
use crate::extraction::ExtractionResult;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::Interviewing => "Interviewing",
            JobStatus::Offer => "Offer",
            JobStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "Applied" => Ok(JobStatus::Applied),
            "Interviewing" => Ok(JobStatus::Interviewing),
            "Offer" => Ok(JobStatus::Offer),
            "Rejected" => Ok(JobStatus::Rejected),
            other => anyhow::bail!(
                "Unknown job status: {}. Use Applied, Interviewing, Offer, or Rejected",
                other
            ),
        }
    }
}

/// One step of an application's interview pipeline, ordered by insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewStage {
    pub id: String,
    pub name: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// One tracked application. The offer fields stay empty until an
/// extraction result is merged in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub company_name: String,
    pub role: String,
    pub location: String,
    pub package: String,
    pub status: JobStatus,
    pub stages: Vec<InterviewStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_letter_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compensation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJobRecord {
    pub company_name: String,
    pub role: String,
    pub location: String,
    pub package: String,
}

/// Partial update; absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecordUpdate {
    pub role: Option<String>,
    pub location: Option<String>,
    pub package: Option<String>,
    pub status: Option<JobStatus>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInterviewStage {
    pub name: String,
    pub date: String,
    pub result: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct JobRow {
    id: String,
    company_name: String,
    role: String,
    location: String,
    package: String,
    status: String,
    offer_letter_url: Option<String>,
    compensation: Option<String>,
    start_date: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct StageRow {
    id: String,
    job_id: String,
    name: String,
    date: String,
    result: Option<String>,
}

impl JobRow {
    fn into_record(self, stages: Vec<InterviewStage>) -> Result<JobRecord> {
        Ok(JobRecord {
            id: self.id,
            company_name: self.company_name,
            role: self.role,
            location: self.location,
            package: self.package,
            status: JobStatus::parse(&self.status)?,
            stages,
            offer_letter_url: self.offer_letter_url,
            compensation: self.compensation,
            start_date: self.start_date,
            created_at: self.created_at,
        })
    }
}

impl StageRow {
    fn into_stage(self) -> InterviewStage {
        InterviewStage {
            id: self.id,
            name: self.name,
            date: self.date,
            result: self.result,
        }
    }
}

#[derive(Debug)]
pub struct DatabaseConfig {
    pub database_path: PathBuf,
    pub pool: Option<SqlitePool>,
}

impl DatabaseConfig {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            database_path,
            pool: None,
        }
    }

    /// Initialize the database connection pool
    pub async fn init_pool(&mut self) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.database_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create database directory")?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", self.database_path.display());

        let pool = SqlitePool::connect(&database_url)
            .await
            .context("Failed to connect to SQLite database")?;
        self.pool = Some(pool);

        info!("Database connection pool initialized: {}", database_url);
        Ok(())
    }

    /// Get the database pool
    pub fn pool(&self) -> Result<&SqlitePool> {
        self.pool
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Database pool not initialized. Call init_pool() first."))
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        let pool = self.pool()?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS job_records (
                id TEXT PRIMARY KEY,
                company_name TEXT NOT NULL,
                role TEXT NOT NULL,
                location TEXT NOT NULL,
                package TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'Applied',
                offer_letter_url TEXT,
                compensation TEXT,
                start_date TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_job_records_created_at
            ON job_records(created_at);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS interview_stages (
                id TEXT PRIMARY KEY,
                job_id TEXT NOT NULL,
                name TEXT NOT NULL,
                date TEXT NOT NULL,
                result TEXT,
                position INTEGER NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_interview_stages_job_id
            ON interview_stages(job_id);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database migrations completed successfully");
        Ok(())
    }
}

pub struct JobRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> JobRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new job record in status Applied with no stages.
    pub async fn create(&self, new_job: &NewJobRecord) -> Result<JobRecord> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO job_records (id, company_name, role, location, package, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&new_job.company_name)
        .bind(&new_job.role)
        .bind(&new_job.location)
        .bind(&new_job.package)
        .bind(JobStatus::Applied.as_str())
        .bind(now)
        .execute(self.pool)
        .await?;

        info!("Created job record {} for {}", id, new_job.company_name);

        Ok(JobRecord {
            id,
            company_name: new_job.company_name.clone(),
            role: new_job.role.clone(),
            location: new_job.location.clone(),
            package: new_job.package.clone(),
            status: JobStatus::Applied,
            stages: Vec::new(),
            offer_letter_url: None,
            compensation: None,
            start_date: None,
            created_at: now,
        })
    }

    /// Find a job record by id, with its stages in pipeline order.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<JobRecord>> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, company_name, role, location, package, status,
                   offer_letter_url, compensation, start_date, created_at
            FROM job_records
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => {
                let stages = self.stages_for(id).await?;
                Ok(Some(row.into_record(stages)?))
            }
            None => Ok(None),
        }
    }

    /// List all job records, newest first.
    pub async fn list(&self) -> Result<Vec<JobRecord>> {
        let rows = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, company_name, role, location, package, status,
                   offer_letter_url, compensation, start_date, created_at
            FROM job_records
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let stage_rows = sqlx::query_as::<_, StageRow>(
            r#"
            SELECT id, job_id, name, date, result
            FROM interview_stages
            ORDER BY job_id, position ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let mut stages_by_job: HashMap<String, Vec<InterviewStage>> = HashMap::new();
        for row in stage_rows {
            stages_by_job
                .entry(row.job_id.clone())
                .or_default()
                .push(row.into_stage());
        }

        rows.into_iter()
            .map(|row| {
                let stages = stages_by_job.remove(&row.id).unwrap_or_default();
                row.into_record(stages)
            })
            .collect()
    }

    /// Apply a partial update, returning the refreshed record.
    pub async fn update(&self, id: &str, update: &JobRecordUpdate) -> Result<Option<JobRecord>> {
        let existing = match self.find_by_id(id).await? {
            Some(record) => record,
            None => return Ok(None),
        };

        let role = update.role.clone().unwrap_or(existing.role);
        let location = update.location.clone().unwrap_or(existing.location);
        let package = update.package.clone().unwrap_or(existing.package);
        let status = update.status.unwrap_or(existing.status);

        sqlx::query(
            r#"
            UPDATE job_records
            SET role = ?, location = ?, package = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&role)
        .bind(&location)
        .bind(&package)
        .bind(status.as_str())
        .bind(id)
        .execute(self.pool)
        .await?;

        self.find_by_id(id).await
    }

    /// Delete a job record and its stages.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        sqlx::query("DELETE FROM interview_stages WHERE job_id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        let result = sqlx::query("DELETE FROM job_records WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted job record {}", id);
        }

        Ok(deleted)
    }

    /// Append an interview stage at the end of the record's pipeline.
    pub async fn add_stage(
        &self,
        job_id: &str,
        stage: &NewInterviewStage,
    ) -> Result<Option<JobRecord>> {
        if self.find_by_id(job_id).await?.is_none() {
            return Ok(None);
        }

        let position: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM interview_stages WHERE job_id = ?")
                .bind(job_id)
                .fetch_one(self.pool)
                .await?;

        sqlx::query(
            r#"
            INSERT INTO interview_stages (id, job_id, name, date, result, position)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(job_id)
        .bind(&stage.name)
        .bind(&stage.date)
        .bind(&stage.result)
        .bind(position)
        .execute(self.pool)
        .await?;

        self.find_by_id(job_id).await
    }

    /// Merge a successful extraction result into the record and flip its
    /// status to Offer.
    pub async fn record_offer(
        &self,
        id: &str,
        offer_letter_url: &str,
        facts: &ExtractionResult,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE job_records
            SET status = ?, offer_letter_url = ?, compensation = ?, start_date = ?
            WHERE id = ?
            "#,
        )
        .bind(JobStatus::Offer.as_str())
        .bind(offer_letter_url)
        .bind(&facts.compensation)
        .bind(&facts.start_date)
        .bind(id)
        .execute(self.pool)
        .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!("Recorded offer details for job {}", id);
        }

        Ok(updated)
    }

    async fn stages_for(&self, job_id: &str) -> Result<Vec<InterviewStage>> {
        let rows = sqlx::query_as::<_, StageRow>(
            r#"
            SELECT id, job_id, name, date, result
            FROM interview_stages
            WHERE job_id = ?
            ORDER BY position ASC
            "#,
        )
        .bind(job_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(StageRow::into_stage).collect())
    }
}
