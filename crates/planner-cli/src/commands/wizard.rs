use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use planner_core::ids::UuidGenerator;
use planner_core::repository::Repository;
use planner_core::schedule::ScheduleTemplateExpander;
use tracing::info;

use crate::cli::WizardCommand;
use crate::commands::check_range;
use crate::config::Config;
use crate::parser::parse_day;
use crate::subjects::load_timetable;

pub async fn run_wizard(repo: &impl Repository, command: WizardCommand, config: &Config) -> Result<()> {
    let timezone = config.timezone()?;
    let start = parse_day(&command.from, &timezone)?;
    let end = parse_day(&command.to, &timezone)?;
    check_range(start, end, config)?;

    let timetable = load_timetable(&command.file)?;
    let schedule = ScheduleTemplateExpander::new(UuidGenerator).expand(start, end, &timetable.subjects)?;
    repo.save_tasks(&schedule.tasks).await?;
    info!(group_id = %schedule.group_id, count = schedule.count, "timetable saved");

    println!(
        "{} Generated {} classes from {} to {}",
        "✓".style(Style::new().green().bold()),
        schedule.count.bright_white().bold(),
        start,
        end
    );
    println!(
        "  {} Group ID: {}",
        "→".style(Style::new().blue()),
        schedule.group_id.yellow()
    );
    Ok(())
}
