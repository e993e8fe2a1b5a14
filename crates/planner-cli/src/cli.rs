use clap::{Parser, Subcommand, ValueEnum};
use planner_core::models::RecurrenceMode;
use std::path::PathBuf;

/// Planner: timetables, recurring tasks and your free time, from the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate dated classes from a weekly timetable file
    Wizard(WizardCommand),
    /// Add a task, optionally repeating
    Add(AddCommand),
    /// Show a day's tasks and the free time between them
    Timeline(TimelineCommand),
    /// List unscheduled inbox items
    Inbox,
    /// Edit a single task
    Edit(EditCommand),
    /// Mark a task as completed
    Done(DoneCommand),
    /// Delete a single task
    Delete(DeleteCommand),
    /// Work with every task of a generated batch at once
    Group(GroupCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct WizardCommand {
    /// TOML file listing the subjects and their weekly slots
    pub file: PathBuf,
    /// First date to fill (e.g. '2025-10-06', 'today', 'next monday')
    #[clap(long)]
    pub from: String,
    /// Last date to fill, inclusive
    #[clap(long)]
    pub to: String,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// Start date and time (e.g. '2025-10-06 09:00', 'tomorrow 9am')
    #[clap(short, long)]
    pub start: Option<String>,
    /// End time ('HH:MM' on the start date) or full date and time; defaults to one hour after start
    #[clap(short, long)]
    pub end: Option<String>,
    /// The description of the task
    #[clap(short, long)]
    pub description: Option<String>,
    /// Keep the task off the time grid
    #[clap(long)]
    pub all_day: bool,
    /// Put the task in the inbox instead of the calendar
    #[clap(long, conflicts_with_all = ["repeat", "all_day"])]
    pub inbox: bool,
    /// Display color, e.g. '#3366FF'
    #[clap(long)]
    pub color: Option<String>,
    /// Display icon identifier
    #[clap(long)]
    pub icon: Option<String>,
    /// Notification tags passed to the reminder service
    #[clap(long = "alert", num_args = 1..)]
    pub alerts: Vec<String>,
    /// How the task repeats
    #[clap(long, value_enum)]
    pub repeat: Option<RepeatShortcut>,
    /// Last date the task may repeat on, inclusive
    #[clap(long, requires = "repeat")]
    pub until: Option<String>,
    /// Weekdays for custom repetition (mon,tue,wed,thu,fri,sat,sun)
    #[clap(long, requires = "repeat")]
    pub on: Option<String>,
}

/// Human-friendly recurrence modes
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatShortcut {
    /// Only on the start date
    Once,
    /// Every day
    Daily,
    /// Every week (same weekday)
    Weekly,
    /// The weekdays given with --on
    Custom,
}

impl From<RepeatShortcut> for RecurrenceMode {
    fn from(shortcut: RepeatShortcut) -> Self {
        match shortcut {
            RepeatShortcut::Once => RecurrenceMode::Once,
            RepeatShortcut::Daily => RecurrenceMode::Daily,
            RepeatShortcut::Weekly => RecurrenceMode::Weekly,
            RepeatShortcut::Custom => RecurrenceMode::Custom,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct TimelineCommand {
    /// Day to show; defaults to today
    #[clap(long)]
    pub date: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID (or unique ID prefix) of the task
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "description")]
    pub description_clear: bool,

    #[arg(long)]
    pub start: Option<String>,
    #[arg(long)]
    pub end: Option<String>,

    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID (or unique ID prefix) of the task
    pub id: String,
    /// Mark the task as not completed again
    #[clap(long)]
    pub undo: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID (or unique ID prefix) of the task
    pub id: String,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct GroupCommand {
    #[command(subcommand)]
    pub command: GroupSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum GroupSubcommand {
    /// List every task of a group
    Show(GroupShowCommand),
    /// Change title, description, color or icon of every task in a group
    Edit(GroupEditCommand),
    /// Delete every task of a group
    Delete(GroupDeleteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct GroupShowCommand {
    /// The group ID
    pub group_id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct GroupEditCommand {
    /// The group ID
    pub group_id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct GroupDeleteCommand {
    /// The group ID
    pub group_id: String,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}
