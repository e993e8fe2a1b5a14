use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::calendar::{add_days, combine, DateSpan};
use crate::error::CoreError;
use crate::ids::IdGenerator;
use crate::models::{RecurrenceMode, Task};

/// RecurrenceExpander: copies one base task onto every date a simple
/// recurrence rule selects.
///
/// Responsibilities:
/// 1. Walk the dates from the base task's start date to the recurrence end date
/// 2. Keep the dates the [`RecurrenceMode`] accepts
/// 3. Re-time a copy of the base task onto each kept date, preserving its
///    wall-clock times and any overnight span
/// 4. Tag the whole batch with one new group id
///
/// Unlike [`crate::schedule::ScheduleTemplateExpander`], an empty result is
/// returned as an empty batch rather than an error.
#[derive(Debug)]
pub struct RecurrenceExpander<G> {
    ids: G,
}

impl<G: IdGenerator> RecurrenceExpander<G> {
    pub fn new(ids: G) -> Self {
        Self { ids }
    }

    /// Expands `base_task` under `mode` up to `recurrence_end_date` inclusive.
    ///
    /// `selected_days` is only consulted for [`RecurrenceMode::Custom`].
    /// [`RecurrenceMode::Once`] always yields exactly one instance on the
    /// base date, whatever the end date.
    ///
    /// # Errors
    /// * [`CoreError::GenerationFailed`] when an instance would fall past the
    ///   last representable date
    pub fn expand(
        &self,
        base_task: &Task,
        mode: RecurrenceMode,
        recurrence_end_date: NaiveDate,
        selected_days: &HashSet<Weekday>,
    ) -> Result<Vec<Task>, CoreError> {
        let base_date = base_task.start_time.date();
        let group_id = self.ids.new_group_id();
        debug!(
            %mode,
            %base_date,
            %recurrence_end_date,
            group_id = %group_id,
            "expanding recurring task"
        );

        let span_days = (base_task.end_time.date() - base_date).num_days().max(0) as u64;

        let tasks = if mode == RecurrenceMode::Once {
            vec![self.instance(base_task, base_date, span_days, &group_id)?]
        } else {
            DateSpan::inclusive(base_date, recurrence_end_date)
                .filter(|date| occurs_on(mode, base_date, *date, selected_days))
                .map(|date| self.instance(base_task, date, span_days, &group_id))
                .collect::<Result<Vec<_>, _>>()?
        };

        info!(%mode, count = tasks.len(), group_id = %group_id, "recurring task expanded");
        Ok(tasks)
    }

    fn instance(
        &self,
        base_task: &Task,
        date: NaiveDate,
        span_days: u64,
        group_id: &str,
    ) -> Result<Task, CoreError> {
        let end_date = add_days(date, span_days)?;
        Ok(Task {
            id: self.ids.new_id(),
            group_id: Some(group_id.to_string()),
            start_time: combine(date, base_task.start_time.time()),
            end_time: combine(end_date, base_task.end_time.time()),
            ..base_task.clone()
        })
    }
}

/// Whether `date` carries an instance under `mode` for a series starting on `base_date`.
#[inline]
pub fn occurs_on(
    mode: RecurrenceMode,
    base_date: NaiveDate,
    date: NaiveDate,
    selected_days: &HashSet<Weekday>,
) -> bool {
    match mode {
        RecurrenceMode::Once => date == base_date,
        RecurrenceMode::Daily => true,
        RecurrenceMode::Weekly => date.weekday() == base_date.weekday(),
        RecurrenceMode::Custom => selected_days.contains(&date.weekday()),
    }
}
