use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{Task, UpdateTaskData};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::FromRow;
use std::collections::BTreeSet;

pub mod groups;
pub mod tasks;

/// Storage row; alerts are kept as a JSON array.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub is_all_day: bool,
    pub icon_id: Option<String>,
    pub color_hex: Option<String>,
    pub group_id: Option<String>,
    pub is_completed: bool,
    pub is_inbox_item: bool,
    pub active_alerts: String,
}

impl TryFrom<TaskRow> for Task {
    type Error = CoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let active_alerts: BTreeSet<String> = serde_json::from_str(&row.active_alerts)?;
        Ok(Task {
            id: row.id,
            title: row.title,
            description: row.description,
            start_time: row.start_time,
            end_time: row.end_time,
            is_all_day: row.is_all_day,
            icon_id: row.icon_id,
            color_hex: row.color_hex,
            group_id: row.group_id,
            is_completed: row.is_completed,
            is_inbox_item: row.is_inbox_item,
            active_alerts,
        })
    }
}

pub(crate) fn into_tasks(rows: Vec<TaskRow>) -> Result<Vec<Task>, CoreError> {
    rows.into_iter().map(Task::try_from).collect()
}

/// Domain-specific trait for single-task operations
#[async_trait]
pub trait TaskRepository {
    /// Upserts every task by id inside one transaction.
    async fn save_tasks(&self, tasks: &[Task]) -> Result<(), CoreError>;
    async fn find_task_by_id(&self, id: &str) -> Result<Option<Task>, CoreError>;
    async fn find_tasks_by_id_prefix(&self, prefix: &str) -> Result<Vec<Task>, CoreError>;
    /// Scheduled tasks overlapping `day`, ordered by start time. Inbox items are excluded.
    async fn find_tasks_for_day(&self, day: NaiveDate) -> Result<Vec<Task>, CoreError>;
    async fn find_inbox_tasks(&self) -> Result<Vec<Task>, CoreError>;
    async fn set_completed(&self, id: &str, completed: bool) -> Result<Task, CoreError>;
    async fn update_task(&self, id: &str, data: UpdateTaskData) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: &str) -> Result<(), CoreError>;
}

/// Domain-specific trait for whole-group operations
#[async_trait]
pub trait GroupRepository {
    async fn get_tasks_by_group_id(&self, group_id: &str) -> Result<Vec<Task>, CoreError>;
    /// Returns the number of tasks removed.
    async fn delete_tasks_by_group_id(&self, group_id: &str) -> Result<u64, CoreError>;
    /// Applies `data` to every task of the group. Edits that move tasks in
    /// time are rejected; those belong to single instances.
    async fn update_group(&self, group_id: &str, data: UpdateTaskData) -> Result<Vec<Task>, CoreError>;
}

/// Main repository trait that composes all domain traits
pub trait Repository: TaskRepository + GroupRepository + Send + Sync {}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Repository for SqliteRepository {}
