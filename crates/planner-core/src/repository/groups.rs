use async_trait::async_trait;
use tracing::{debug, info};

use super::{into_tasks, GroupRepository, SqliteRepository, TaskRow};
use crate::error::CoreError;
use crate::models::{Task, UpdateTaskData};

#[async_trait]
impl GroupRepository for SqliteRepository {
    async fn get_tasks_by_group_id(&self, group_id: &str) -> Result<Vec<Task>, CoreError> {
        let rows: Vec<TaskRow> = sqlx::query_as("SELECT * FROM tasks WHERE group_id = $1 ORDER BY start_time")
            .bind(group_id)
            .fetch_all(self.pool())
            .await?;
        into_tasks(rows)
    }

    async fn delete_tasks_by_group_id(&self, group_id: &str) -> Result<u64, CoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE group_id = $1")
            .bind(group_id)
            .execute(self.pool())
            .await?;
        info!(group_id, deleted = result.rows_affected(), "group deleted");
        Ok(result.rows_affected())
    }

    async fn update_group(&self, group_id: &str, data: UpdateTaskData) -> Result<Vec<Task>, CoreError> {
        if data.touches_schedule() {
            return Err(CoreError::Validation(
                "Times can only be changed on a single task, not a whole group.".to_string(),
            ));
        }

        let current = self.get_tasks_by_group_id(group_id).await?;
        if current.is_empty() {
            return Err(CoreError::NotFound(format!("group {}", group_id)));
        }

        let updated = current
            .iter()
            .map(|task| task.with_update(&data))
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self.pool().begin().await?;
        for task in &updated {
            Self::upsert_in_transaction(&mut tx, task).await?;
        }
        tx.commit().await?;

        debug!(group_id, count = updated.len(), "group updated");
        Ok(updated)
    }
}
