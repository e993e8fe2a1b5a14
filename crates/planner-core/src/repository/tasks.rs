use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{Sqlite, Transaction};
use tracing::debug;

use super::{into_tasks, SqliteRepository, TaskRepository, TaskRow};
use crate::calendar::{add_days, combine};
use crate::error::CoreError;
use crate::models::{Task, UpdateTaskData};

impl SqliteRepository {
    pub(crate) async fn upsert_in_transaction(
        tx: &mut Transaction<'_, Sqlite>,
        task: &Task,
    ) -> Result<(), CoreError> {
        let alerts = serde_json::to_string(&task.active_alerts)?;
        sqlx::query(
            r#"INSERT INTO tasks (id, title, description, start_time, end_time, is_all_day, icon_id, color_hex, group_id, is_completed, is_inbox_item, active_alerts)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                start_time = excluded.start_time,
                end_time = excluded.end_time,
                is_all_day = excluded.is_all_day,
                icon_id = excluded.icon_id,
                color_hex = excluded.color_hex,
                group_id = excluded.group_id,
                is_completed = excluded.is_completed,
                is_inbox_item = excluded.is_inbox_item,
                active_alerts = excluded.active_alerts
            "#,
        )
        .bind(&task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.start_time)
        .bind(task.end_time)
        .bind(task.is_all_day)
        .bind(&task.icon_id)
        .bind(&task.color_hex)
        .bind(&task.group_id)
        .bind(task.is_completed)
        .bind(task.is_inbox_item)
        .bind(alerts)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn require_task(&self, id: &str) -> Result<Task, CoreError> {
        self.find_task_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl TaskRepository for SqliteRepository {
    async fn save_tasks(&self, tasks: &[Task]) -> Result<(), CoreError> {
        let mut tx = self.pool().begin().await?;
        for task in tasks {
            Self::upsert_in_transaction(&mut tx, task).await?;
        }
        tx.commit().await?;
        debug!(count = tasks.len(), "tasks saved");
        Ok(())
    }

    async fn find_task_by_id(&self, id: &str) -> Result<Option<Task>, CoreError> {
        let row: Option<TaskRow> = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        row.map(Task::try_from).transpose()
    }

    async fn find_tasks_by_id_prefix(&self, prefix: &str) -> Result<Vec<Task>, CoreError> {
        let rows: Vec<TaskRow> = sqlx::query_as("SELECT * FROM tasks WHERE substr(id, 1, length($1)) = $1 ORDER BY start_time")
            .bind(prefix)
            .fetch_all(self.pool())
            .await?;
        into_tasks(rows)
    }

    async fn find_tasks_for_day(&self, day: NaiveDate) -> Result<Vec<Task>, CoreError> {
        let day_start = combine(day, NaiveTime::MIN);
        let next_day_start = combine(add_days(day, 1)?, NaiveTime::MIN);

        let rows: Vec<TaskRow> = sqlx::query_as(
            r#"SELECT * FROM tasks
            WHERE is_inbox_item = FALSE
              AND start_time < $2
              AND end_time > $1
            ORDER BY start_time, end_time
            "#,
        )
        .bind(day_start)
        .bind(next_day_start)
        .fetch_all(self.pool())
        .await?;
        into_tasks(rows)
    }

    async fn find_inbox_tasks(&self) -> Result<Vec<Task>, CoreError> {
        let rows: Vec<TaskRow> = sqlx::query_as("SELECT * FROM tasks WHERE is_inbox_item = TRUE ORDER BY title")
            .fetch_all(self.pool())
            .await?;
        into_tasks(rows)
    }

    async fn set_completed(&self, id: &str, completed: bool) -> Result<Task, CoreError> {
        let task = self.require_task(id).await?.with_completed(completed);
        self.save_tasks(std::slice::from_ref(&task)).await?;
        Ok(task)
    }

    async fn update_task(&self, id: &str, data: UpdateTaskData) -> Result<Task, CoreError> {
        let task = self.require_task(id).await?.with_update(&data)?;
        self.save_tasks(std::slice::from_ref(&task)).await?;
        Ok(task)
    }

    async fn delete_task(&self, id: &str) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
