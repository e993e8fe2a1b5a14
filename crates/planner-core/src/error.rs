use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("No tasks were generated for the selected date range")]
    NoInstancesGenerated,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Schedule generation failed: {0}")]
    GenerationFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}
