use anyhow::Result;
use chrono::Utc;
use planner_core::models::Task;
use planner_core::repository::Repository;
use planner_core::timezone::{elapsed_minutes_in, today_in};

use crate::cli::TimelineCommand;
use crate::config::Config;
use crate::parser::parse_day;
use crate::views::table::{display_timeline, format_duration};

pub async fn show_timeline(repo: &impl Repository, command: TimelineCommand, config: &Config) -> Result<()> {
    let timezone = config.timezone()?;
    let day = match &command.date {
        Some(d) => parse_day(d, &timezone)?,
        None => today_in(&timezone, Utc::now()),
    };
    let calculator = config.gap_calculator()?;
    let scale = config.visual_scale()?;

    let tasks = repo.find_tasks_for_day(day).await?;
    let all_day: Vec<Task> = tasks.iter().filter(|t| t.is_all_day).cloned().collect();
    let items = calculator.build_timeline(day, &tasks);
    // Elapsed in the configured zone; shorter or longer than the rows on DST days.
    let free: i64 = calculator
        .compute_gaps(day, &tasks)
        .iter()
        .map(|g| elapsed_minutes_in(g.start, g.end, &timezone))
        .sum();

    println!("{}", day.format("%A, %d %B %Y"));
    display_timeline(&items, &all_day, &scale);
    println!("Free time: {}", format_duration(free));
    Ok(())
}
