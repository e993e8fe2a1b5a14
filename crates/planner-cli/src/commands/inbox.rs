use anyhow::Result;
use planner_core::repository::Repository;

use crate::views::table::display_tasks;

pub async fn list_inbox(repo: &impl Repository) -> Result<()> {
    let tasks = repo.find_inbox_tasks().await?;
    display_tasks(&tasks);
    Ok(())
}
