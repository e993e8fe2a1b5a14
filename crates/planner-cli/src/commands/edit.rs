use anyhow::{anyhow, Result};
use planner_core::error::CoreError;
use planner_core::models::UpdateTaskData;
use planner_core::repository::Repository;

use crate::cli::EditCommand;
use crate::config::Config;
use crate::parser::{parse_datetime, parse_end};
use crate::util::resolve_task_id;

pub async fn edit_task(repo: &impl Repository, command: EditCommand, config: &Config) -> Result<()> {
    let timezone = config.timezone()?;
    let task_id = resolve_task_id(repo, &command.id).await?;
    let current = repo
        .find_task_by_id(&task_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Task with ID '{}' not found.", task_id)))?;

    let start_time = command
        .start
        .as_deref()
        .map(|s| parse_datetime(s, &timezone))
        .transpose()?;
    // A bare "HH:MM" end is read against the new start when one is given.
    let end_time = command
        .end
        .as_deref()
        .map(|e| parse_end(e, start_time.unwrap_or(current.start_time), &timezone))
        .transpose()?;

    let description = if command.description_clear {
        Some(None)
    } else {
        command.description.map(Some)
    };

    let update_data = UpdateTaskData {
        title: command.title,
        description,
        start_time,
        end_time,
        color_hex: command.color.map(Some),
        icon_id: command.icon.map(Some),
        ..Default::default()
    };

    if update_data.title.is_none()
        && update_data.description.is_none()
        && !update_data.touches_schedule()
        && update_data.color_hex.is_none()
        && update_data.icon_id.is_none()
    {
        return Err(anyhow!("Nothing to change. Pass at least one of --title, --description, --start, --end, --color, --icon"));
    }

    let updated = repo.update_task(&task_id, update_data).await?;
    println!("Updated task: '{}'", updated.title);
    Ok(())
}
