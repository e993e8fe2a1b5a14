use comfy_table::{Attribute, Cell, Color, Row, Table};
use planner_core::models::{Task, TimelineItem};
use planner_core::timeline::VisualScale;

use crate::util::short_id_of;

pub fn display_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Date", "Time", "Group", "Alerts"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id_of(task)));
        row.add_cell(title_cell(task));
        row.add_cell(Cell::new(task.start_time.format("%a %Y-%m-%d")));
        row.add_cell(Cell::new(time_range(task)));
        row.add_cell(Cell::new(
            task.group_id
                .as_deref()
                .map(|g| g.get(..8).unwrap_or(g))
                .unwrap_or("None"),
        ));
        row.add_cell(Cell::new(if task.active_alerts.is_empty() {
            "None".to_string()
        } else {
            task.active_alerts.iter().cloned().collect::<Vec<_>>().join(", ")
        }));
        table.add_row(row);
    }

    println!("{table}");
}

/// Renders a day's tasks and free gaps in order, with the row height each
/// item would get on a drawn timeline.
pub fn display_timeline(items: &[TimelineItem], all_day: &[Task], scale: &VisualScale) {
    for task in all_day {
        println!("All day: {}", task.title);
    }

    if items.is_empty() {
        println!("Nothing scheduled.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Time", "", "Duration", "Height", "ID"]);

    for item in items {
        let minutes = item.duration_minutes();
        let mut row = Row::new();
        row.add_cell(Cell::new(format!(
            "{}-{}",
            item.start().format("%H:%M"),
            item.end().format("%H:%M")
        )));
        match item {
            TimelineItem::Task(task) => {
                row.add_cell(title_cell(task));
                row.add_cell(Cell::new(format_duration(minutes)));
                row.add_cell(Cell::new(format!("{:.0}", scale.height_for(minutes))));
                row.add_cell(Cell::new(short_id_of(task)));
            }
            TimelineItem::Gap(_) => {
                row.add_cell(Cell::new("free").fg(Color::DarkGrey).add_attribute(Attribute::Italic));
                row.add_cell(Cell::new(format_duration(minutes)).fg(Color::Green));
                row.add_cell(Cell::new(format!("{:.0}", scale.height_for(minutes))));
                row.add_cell(Cell::new(""));
            }
        }
        table.add_row(row);
    }

    println!("{table}");
}

fn title_cell(task: &Task) -> Cell {
    let cell = Cell::new(&task.title);
    if task.is_completed {
        cell.add_attribute(Attribute::CrossedOut).fg(Color::DarkGrey)
    } else if task.is_inbox_item {
        cell.fg(Color::Yellow)
    } else {
        cell
    }
}

fn time_range(task: &Task) -> String {
    if task.is_all_day {
        return "all day".to_string();
    }
    let range = format!("{}-{}", task.start_time.format("%H:%M"), task.end_time.format("%H:%M"));
    match (task.end_time.date() - task.start_time.date()).num_days() {
        0 => range,
        days => format!("{} (+{}d)", range, days),
    }
}

pub fn format_duration(minutes: i64) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}
