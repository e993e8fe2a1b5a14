use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDateTime, Utc};
use owo_colors::{OwoColorize, Style};
use planner_core::ids::UuidGenerator;
use planner_core::models::{NewTaskData, RecurrenceMode, Task};
use planner_core::recurrence::RecurrenceExpander;
use planner_core::repository::Repository;
use std::collections::HashSet;

use crate::cli::AddCommand;
use crate::commands::check_range;
use crate::config::Config;
use crate::parser::{parse_datetime, parse_day, parse_end, parse_weekdays, truncate_to_minute};
use crate::util::short_id_of;

pub async fn add_task(repo: &impl Repository, command: AddCommand, config: &Config) -> Result<()> {
    let timezone = config.timezone()?;

    let start = match &command.start {
        Some(s) => parse_datetime(s, &timezone)?,
        None if command.inbox => truncate_to_minute(Utc::now().with_timezone(&timezone).naive_local()),
        None => return Err(anyhow!("--start is required unless the task goes to the inbox (--inbox)")),
    };
    let end = match &command.end {
        Some(e) => parse_end(e, start, &timezone)?,
        None => start + Duration::hours(1),
    };

    let new_task_data = NewTaskData {
        description: command.description.clone(),
        is_all_day: command.all_day,
        icon_id: command.icon.clone(),
        color_hex: command.color.clone(),
        is_inbox_item: command.inbox,
        active_alerts: command.alerts.iter().cloned().collect(),
        ..NewTaskData::new(command.title.clone(), start, end)
    };
    let base = Task::create(new_task_data, &UuidGenerator)?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    let Some(shortcut) = command.repeat else {
        repo.save_tasks(std::slice::from_ref(&base)).await?;
        println!(
            "{} Created task: {}",
            "✓".style(success_style),
            base.title.bright_white().bold()
        );
        println!("  {} Task ID: {}", "→".style(info_style), short_id_of(&base).yellow());
        if !base.is_inbox_item {
            println!("  {} When: {}", "→".style(info_style), describe_when(start, end).cyan());
        }
        return Ok(());
    };

    let mode = RecurrenceMode::from(shortcut);
    let until = match &command.until {
        Some(u) => parse_day(u, &timezone)?,
        None if mode == RecurrenceMode::Once => base.date(),
        None => return Err(anyhow!("--until is required for {} repetition", mode)),
    };
    let selected_days = match (&command.on, mode) {
        (Some(days), _) => parse_weekdays(days)?,
        (None, RecurrenceMode::Custom) => {
            return Err(anyhow!("--on is required for custom repetition, e.g. --on mon,wed,fri"))
        }
        (None, _) => HashSet::new(),
    };
    if mode != RecurrenceMode::Once {
        check_range(base.date(), until, config)?;
    }

    let tasks = RecurrenceExpander::new(UuidGenerator).expand(&base, mode, until, &selected_days)?;
    if tasks.is_empty() {
        println!(
            "{} No dates between {} and {} match; nothing was added.",
            "!".yellow().bold(),
            base.date(),
            until
        );
        return Ok(());
    }
    repo.save_tasks(&tasks).await?;

    println!(
        "{} Created {} × {} ({})",
        "✓".style(success_style),
        tasks.len().bright_white().bold(),
        base.title.bright_white().bold(),
        mode
    );
    if let Some(group_id) = tasks[0].group_id.as_deref() {
        println!("  {} Group ID: {}", "→".style(info_style), group_id.yellow());
    }
    if let (Some(first), Some(last)) = (tasks.first(), tasks.last()) {
        println!(
            "  {} From {} to {}",
            "→".style(info_style),
            first.date().cyan(),
            last.date().cyan()
        );
    }
    Ok(())
}

fn describe_when(start: NaiveDateTime, end: NaiveDateTime) -> String {
    if start.date() == end.date() {
        format!("{} {}-{}", start.format("%a %Y-%m-%d"), start.format("%H:%M"), end.format("%H:%M"))
    } else {
        format!("{} to {}", start.format("%a %Y-%m-%d %H:%M"), end.format("%a %Y-%m-%d %H:%M"))
    }
}
