use anyhow::{anyhow, Result};
use owo_colors::OwoColorize;
use planner_core::error::CoreError;
use planner_core::models::UpdateTaskData;
use planner_core::repository::Repository;

use crate::cli::{GroupCommand, GroupDeleteCommand, GroupEditCommand, GroupShowCommand, GroupSubcommand};
use crate::util::confirm;
use crate::views::table::display_tasks;

pub async fn group_command(repo: &impl Repository, command: GroupCommand) -> Result<()> {
    match command.command {
        GroupSubcommand::Show(cmd) => show_group(repo, cmd).await,
        GroupSubcommand::Edit(cmd) => edit_group(repo, cmd).await,
        GroupSubcommand::Delete(cmd) => delete_group(repo, cmd).await,
    }
}

async fn show_group(repo: &impl Repository, command: GroupShowCommand) -> Result<()> {
    let tasks = repo.get_tasks_by_group_id(&command.group_id).await?;
    if tasks.is_empty() {
        return Err(anyhow!(CoreError::NotFound(format!(
            "No tasks in group '{}'",
            command.group_id
        ))));
    }
    println!("Group {} ({} tasks)", command.group_id.yellow(), tasks.len());
    display_tasks(&tasks);
    Ok(())
}

async fn edit_group(repo: &impl Repository, command: GroupEditCommand) -> Result<()> {
    let update_data = UpdateTaskData {
        title: command.title,
        description: command.description.map(Some),
        color_hex: command.color.map(Some),
        icon_id: command.icon.map(Some),
        ..Default::default()
    };
    let updated = repo.update_group(&command.group_id, update_data).await?;
    println!("Updated {} tasks in group {}", updated.len(), command.group_id.yellow());
    Ok(())
}

async fn delete_group(repo: &impl Repository, command: GroupDeleteCommand) -> Result<()> {
    let tasks = repo.get_tasks_by_group_id(&command.group_id).await?;
    if tasks.is_empty() {
        return Err(anyhow!(CoreError::NotFound(format!(
            "No tasks in group '{}'",
            command.group_id
        ))));
    }

    if !command.force
        && !confirm(format!(
            "Delete all {} tasks of group '{}' ({})?",
            tasks.len(),
            command.group_id,
            tasks[0].title
        ))
    {
        println!("Deletion cancelled.");
        return Ok(());
    }

    let deleted = repo.delete_tasks_by_group_id(&command.group_id).await?;
    println!("Deleted {} tasks from group {}", deleted, command.group_id.yellow());
    Ok(())
}
