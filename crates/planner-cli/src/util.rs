use anyhow::{anyhow, Result};
use dialoguer::Confirm;
use planner_core::error::CoreError;
use planner_core::models::Task;
use planner_core::repository::Repository;

pub const SHORT_ID_LEN: usize = 8;

pub async fn resolve_task_id(repo: &impl Repository, short_id: &str) -> Result<String> {
    if short_id.len() < 2 {
        return Err(anyhow!(CoreError::Validation(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }
    let tasks = repo.find_tasks_by_id_prefix(short_id).await?;
    match tasks.as_slice() {
        [task] => Ok(task.id.clone()),
        [] => Err(anyhow!(CoreError::NotFound(format!(
            "No task found with ID prefix '{}'",
            short_id
        )))),
        many => {
            let candidates: Vec<String> = many
                .iter()
                .map(|t| format!("{} ({})", short_id_of(t), t.title))
                .collect();
            Err(anyhow!(CoreError::Validation(format!(
                "Ambiguous ID '{}'. Did you mean one of: {}",
                short_id,
                candidates.join(", ")
            ))))
        }
    }
}

pub fn short_id_of(task: &Task) -> &str {
    task.id.get(..SHORT_ID_LEN).unwrap_or(&task.id)
}

/// Asks before a destructive action; a closed stdin counts as "no".
pub fn confirm(prompt: String) -> bool {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false)
}
