use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::calendar::{add_days, combine, DateSpan};
use crate::error::CoreError;
use crate::ids::IdGenerator;
use crate::models::{GeneratedSchedule, SubjectConfig, Task, WeeklySchedule};

/// ScheduleTemplateExpander: turns a weekly timetable into dated tasks.
///
/// Every date in the requested range is visited in order; on each date the
/// subjects are walked in list order and each of their weekly slots that
/// falls on that weekday yields one task. All tasks of a call share a single
/// freshly minted group id so the whole timetable can later be edited or
/// removed together.
///
/// The range is not capped here. A multi-year range produces a
/// proportionally large batch, so callers taking untrusted input should
/// bound it first.
#[derive(Debug)]
pub struct ScheduleTemplateExpander<G> {
    ids: G,
}

impl<G: IdGenerator> ScheduleTemplateExpander<G> {
    pub fn new(ids: G) -> Self {
        Self { ids }
    }

    /// Expands `subjects` over `[start_date, end_date]`.
    ///
    /// # Errors
    /// * [`CoreError::InvalidRange`] when `end_date < start_date`
    /// * [`CoreError::NoInstancesGenerated`] when no slot falls inside the range
    /// * [`CoreError::GenerationFailed`] when an overnight slot would end past
    ///   the last representable date
    pub fn expand(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        subjects: &[SubjectConfig],
    ) -> Result<GeneratedSchedule, CoreError> {
        if end_date < start_date {
            return Err(CoreError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }

        let group_id = self.ids.new_group_id();
        debug!(
            %start_date,
            %end_date,
            subjects = subjects.len(),
            group_id = %group_id,
            "expanding weekly timetable"
        );

        let mut tasks = Vec::new();
        for date in DateSpan::inclusive(start_date, end_date) {
            let weekday = date.weekday();
            for subject in subjects {
                for slot in subject.schedules.iter().filter(|s| s.day_of_week == weekday) {
                    tasks.push(self.instance(date, subject, slot, &group_id)?);
                }
            }
        }

        if tasks.is_empty() {
            warn!(%start_date, %end_date, "timetable produced no tasks");
            return Err(CoreError::NoInstancesGenerated);
        }

        info!(count = tasks.len(), group_id = %group_id, "timetable expanded");
        Ok(GeneratedSchedule {
            group_id,
            count: tasks.len(),
            tasks,
        })
    }

    fn instance(
        &self,
        date: NaiveDate,
        subject: &SubjectConfig,
        slot: &WeeklySchedule,
        group_id: &str,
    ) -> Result<Task, CoreError> {
        // A slot ending before it starts runs past midnight.
        let end_date = if slot.end_time < slot.start_time {
            add_days(date, 1)?
        } else {
            date
        };

        Ok(Task {
            id: self.ids.new_id(),
            title: subject.name.clone(),
            description: None,
            start_time: combine(date, slot.start_time),
            end_time: combine(end_date, slot.end_time),
            is_all_day: false,
            icon_id: subject.icon_id.clone(),
            color_hex: subject.color_hex.clone(),
            group_id: Some(group_id.to_string()),
            is_completed: false,
            is_inbox_item: false,
            active_alerts: BTreeSet::new(),
        })
    }
}
