use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use thiserror::Error;

use crate::calendar::minutes_between;
use crate::error::CoreError;
use crate::ids::IdGenerator;

/// A concrete, dated entry on the calendar.
///
/// Tasks are values: edits produce a new copy (see [`Task::with_update`])
/// which the caller then writes back through the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// All-day items are kept off the time grid.
    pub is_all_day: bool,
    pub icon_id: Option<String>,
    pub color_hex: Option<String>,
    /// Shared by every instance of one generated batch; `None` for standalone tasks.
    pub group_id: Option<String>,
    pub is_completed: bool,
    /// Inbox items have no meaningful schedule and never show up in day queries.
    pub is_inbox_item: bool,
    /// Notification tags handed to the alarm scheduler untouched.
    pub active_alerts: BTreeSet<String>,
}

impl Task {
    /// Creates a standalone task, rejecting a blank title or an end time
    /// that does not come after the start time.
    pub fn create(data: NewTaskData, ids: &impl IdGenerator) -> Result<Self, CoreError> {
        let title = data.title.trim().to_string();
        validate_title(&title)?;
        validate_interval(data.start_time, data.end_time)?;

        Ok(Self {
            id: ids.new_id(),
            title,
            description: data.description.filter(|d| !d.trim().is_empty()),
            start_time: data.start_time,
            end_time: data.end_time,
            is_all_day: data.is_all_day,
            icon_id: data.icon_id,
            color_hex: data.color_hex,
            group_id: None,
            is_completed: false,
            is_inbox_item: data.is_inbox_item,
            active_alerts: data.active_alerts,
        })
    }

    /// Whole minutes between start and end, measured on the absolute time line.
    pub fn duration_minutes(&self) -> i64 {
        minutes_between(self.start_time, self.end_time)
    }

    /// Calendar date the task starts on.
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Returns a copy with `data` applied, re-validating title and times.
    pub fn with_update(&self, data: &UpdateTaskData) -> Result<Self, CoreError> {
        let mut updated = self.clone();

        if let Some(title) = &data.title {
            let title = title.trim().to_string();
            validate_title(&title)?;
            updated.title = title;
        }
        if let Some(description) = &data.description {
            updated.description = description.clone();
        }
        if let Some(start) = data.start_time {
            updated.start_time = start;
        }
        if let Some(end) = data.end_time {
            updated.end_time = end;
        }
        if let Some(all_day) = data.is_all_day {
            updated.is_all_day = all_day;
        }
        if let Some(icon) = &data.icon_id {
            updated.icon_id = icon.clone();
        }
        if let Some(color) = &data.color_hex {
            updated.color_hex = color.clone();
        }
        if let Some(alerts) = &data.active_alerts {
            updated.active_alerts = alerts.clone();
        }

        if data.start_time.is_some() || data.end_time.is_some() {
            validate_interval(updated.start_time, updated.end_time)?;
        }

        Ok(updated)
    }

    /// Returns a copy with the completion flag set.
    pub fn with_completed(&self, completed: bool) -> Self {
        Self {
            is_completed: completed,
            ..self.clone()
        }
    }
}

fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.is_empty() {
        return Err(CoreError::Validation("Title cannot be blank.".to_string()));
    }
    Ok(())
}

fn validate_interval(start: NaiveDateTime, end: NaiveDateTime) -> Result<(), CoreError> {
    if end <= start {
        return Err(CoreError::Validation(format!(
            "End time {} must be after start time {}.",
            end, start
        )));
    }
    Ok(())
}

/// Input for the manual single-task create path.
#[derive(Debug, Clone)]
pub struct NewTaskData {
    pub title: String,
    pub description: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub is_all_day: bool,
    pub icon_id: Option<String>,
    pub color_hex: Option<String>,
    pub is_inbox_item: bool,
    pub active_alerts: BTreeSet<String>,
}

impl NewTaskData {
    pub fn new(title: impl Into<String>, start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            description: None,
            start_time,
            end_time,
            is_all_day: false,
            icon_id: None,
            color_hex: None,
            is_inbox_item: false,
            active_alerts: BTreeSet::new(),
        }
    }
}

/// Field-level edits; `None` leaves a field untouched, `Some(None)` clears
/// an optional field.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub is_all_day: Option<bool>,
    pub icon_id: Option<Option<String>>,
    pub color_hex: Option<Option<String>>,
    pub active_alerts: Option<BTreeSet<String>>,
}

impl UpdateTaskData {
    /// True when the edit moves the task in time. Such edits only make
    /// sense on a single instance, not across a whole group.
    pub fn touches_schedule(&self) -> bool {
        self.start_time.is_some() || self.end_time.is_some() || self.is_all_day.is_some()
    }
}

// ============================================================================
// Weekly timetable templates
// ============================================================================

/// One weekly slot of a subject, e.g. "Monday 08:00-10:00".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub day_of_week: Weekday,
    #[serde(with = "crate::calendar::clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::calendar::clock_time")]
    pub end_time: NaiveTime,
}

impl WeeklySchedule {
    pub fn new(day_of_week: Weekday, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            day_of_week,
            start_time,
            end_time,
        }
    }
}

/// A subject (class, course, routine) and the weekly slots it occupies.
/// Only lives while the timetable wizard is being filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectConfig {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color_hex: Option<String>,
    #[serde(default)]
    pub icon_id: Option<String>,
    #[serde(default)]
    pub schedules: Vec<WeeklySchedule>,
}

impl SubjectConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            color_hex: None,
            icon_id: None,
            schedules: Vec::new(),
        }
    }

    pub fn with_schedule(mut self, day: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        self.schedules.push(WeeklySchedule::new(day, start, end));
        self
    }
}

/// The batch produced by one timetable expansion.
#[derive(Debug, Clone)]
pub struct GeneratedSchedule {
    pub group_id: String,
    pub count: usize,
    pub tasks: Vec<Task>,
}

// ============================================================================
// Simple recurrence
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceMode {
    /// Only the base task's own date.
    Once,
    /// Every calendar day.
    Daily,
    /// The base task's weekday, every week.
    Weekly,
    /// Each weekday in an explicit set.
    Custom,
}

impl std::fmt::Display for RecurrenceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecurrenceMode::Once => write!(f, "once"),
            RecurrenceMode::Daily => write!(f, "daily"),
            RecurrenceMode::Weekly => write!(f, "weekly"),
            RecurrenceMode::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for RecurrenceMode {
    type Err = ParseRecurrenceModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "once" | "none" => Ok(RecurrenceMode::Once),
            "daily" => Ok(RecurrenceMode::Daily),
            "weekly" => Ok(RecurrenceMode::Weekly),
            "custom" => Ok(RecurrenceMode::Custom),
            _ => Err(ParseRecurrenceModeError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid recurrence mode: {0}")]
pub struct ParseRecurrenceModeError(String);

// ============================================================================
// Timeline
// ============================================================================

/// A stretch of free time on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapItem {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
}

impl GapItem {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            duration_minutes: minutes_between(start, end),
        }
    }
}

/// One row of a rendered day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineItem {
    Task(Task),
    Gap(GapItem),
}

impl TimelineItem {
    pub fn start(&self) -> NaiveDateTime {
        match self {
            TimelineItem::Task(task) => task.start_time,
            TimelineItem::Gap(gap) => gap.start,
        }
    }

    pub fn end(&self) -> NaiveDateTime {
        match self {
            TimelineItem::Task(task) => task.end_time,
            TimelineItem::Gap(gap) => gap.end,
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        match self {
            TimelineItem::Task(task) => task.duration_minutes(),
            TimelineItem::Gap(gap) => gap.duration_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdGenerator;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_create_trims_title_and_mints_id() {
        let ids = SequentialIdGenerator::new("t");
        let task = Task::create(NewTaskData::new("  Lab report ", at(6, 9, 0), at(6, 10, 0)), &ids).unwrap();

        assert_eq!(task.id, "t-1");
        assert_eq!(task.title, "Lab report");
        assert_eq!(task.group_id, None);
        assert!(!task.is_completed);
    }

    #[rstest]
    #[case("", at(6, 9, 0), at(6, 10, 0))]
    #[case("   ", at(6, 9, 0), at(6, 10, 0))]
    #[case("Gym", at(6, 10, 0), at(6, 10, 0))]
    #[case("Gym", at(6, 11, 0), at(6, 10, 0))]
    fn test_create_rejects_invalid_input(
        #[case] title: &str,
        #[case] start: NaiveDateTime,
        #[case] end: NaiveDateTime,
    ) {
        let ids = SequentialIdGenerator::default();
        let result = Task::create(NewTaskData::new(title, start, end), &ids);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_duration_spans_midnight() {
        let ids = SequentialIdGenerator::default();
        let task = Task::create(NewTaskData::new("Night shift", at(6, 22, 30), at(7, 1, 0)), &ids).unwrap();
        assert_eq!(task.duration_minutes(), 150);
    }

    #[test]
    fn test_with_update_is_copy_and_replace() {
        let ids = SequentialIdGenerator::default();
        let task = Task::create(NewTaskData::new("Read", at(6, 9, 0), at(6, 10, 0)), &ids).unwrap();

        let update = UpdateTaskData {
            title: Some("Read chapter 3".to_string()),
            description: Some(Some("pages 40-62".to_string())),
            ..Default::default()
        };
        let updated = task.with_update(&update).unwrap();

        assert_eq!(updated.id, task.id);
        assert_eq!(updated.title, "Read chapter 3");
        assert_eq!(updated.description.as_deref(), Some("pages 40-62"));
        assert_eq!(task.title, "Read");
    }

    #[test]
    fn test_with_update_revalidates_times() {
        let ids = SequentialIdGenerator::default();
        let task = Task::create(NewTaskData::new("Read", at(6, 9, 0), at(6, 10, 0)), &ids).unwrap();

        let update = UpdateTaskData {
            end_time: Some(at(6, 8, 0)),
            ..Default::default()
        };
        assert!(matches!(task.with_update(&update), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_with_completed() {
        let ids = SequentialIdGenerator::default();
        let task = Task::create(NewTaskData::new("Read", at(6, 9, 0), at(6, 10, 0)), &ids).unwrap();
        let done = task.with_completed(true);
        assert!(done.is_completed);
        assert!(!task.is_completed);
    }

    #[rstest]
    #[case("once", RecurrenceMode::Once)]
    #[case("DAILY", RecurrenceMode::Daily)]
    #[case("Weekly", RecurrenceMode::Weekly)]
    #[case("custom", RecurrenceMode::Custom)]
    fn test_recurrence_mode_from_str(#[case] input: &str, #[case] expected: RecurrenceMode) {
        assert_eq!(input.parse::<RecurrenceMode>().unwrap(), expected);
        assert_eq!(expected.to_string().parse::<RecurrenceMode>().unwrap(), expected);
    }

    #[test]
    fn test_recurrence_mode_rejects_unknown() {
        assert_eq!(
            "monthly".parse::<RecurrenceMode>(),
            Err(ParseRecurrenceModeError("monthly".to_string()))
        );
    }

    #[test]
    fn test_gap_item_duration() {
        let gap = GapItem::new(at(6, 11, 30), at(6, 18, 0));
        assert_eq!(gap.duration_minutes, 390);
    }
}
