use anyhow::Result;
use planner_core::repository::Repository;

use crate::cli::DoneCommand;
use crate::util::resolve_task_id;

pub async fn mark_done(repo: &impl Repository, command: DoneCommand) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;
    let task = repo.set_completed(&task_id, !command.undo).await?;
    if task.is_completed {
        println!("Completed task: '{}'", task.title);
    } else {
        println!("Reopened task: '{}'", task.title);
    }
    Ok(())
}
