use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calendar::combine;
use crate::error::CoreError;
use crate::models::{GapItem, Task, TimelineItem};

/// Free intervals of `[day_start, day_end]` not covered by any timed task.
///
/// All-day and inbox items are ignored. Tasks are sorted by start time
/// before the sweep, so callers may pass them in any order. Overlapping
/// tasks are merged: the sweep tracks the latest end seen so far, so a
/// short task nested inside a long one never opens a gap. Together, the
/// gaps and the task intervals clipped to the day cover the bounds exactly.
pub fn compute_gaps(day_start: NaiveDateTime, day_end: NaiveDateTime, tasks: &[Task]) -> Vec<GapItem> {
    let mut gaps = Vec::new();
    let mut cursor = day_start;

    for task in timed_tasks(tasks) {
        if cursor >= day_end {
            break;
        }
        let gap_end = task.start_time.min(day_end);
        if gap_end > cursor {
            gaps.push(GapItem::new(cursor, gap_end));
        }
        cursor = cursor.max(task.end_time);
    }

    if cursor < day_end {
        gaps.push(GapItem::new(cursor, day_end));
    }
    gaps
}

/// Timed tasks and the gaps between them, in time order.
///
/// Only tasks overlapping `[day_start, day_end)` get a row, and a task that
/// crosses a bound is clipped to it, so every row lies inside the bounds.
pub fn build_timeline(day_start: NaiveDateTime, day_end: NaiveDateTime, tasks: &[Task]) -> Vec<TimelineItem> {
    let gaps = compute_gaps(day_start, day_end, tasks);
    let mut items: Vec<TimelineItem> = timed_tasks(tasks)
        .into_iter()
        .filter(|t| t.end_time > day_start && t.start_time < day_end)
        .map(|t| Task {
            start_time: t.start_time.max(day_start),
            end_time: t.end_time.min(day_end),
            ..t.clone()
        })
        .map(TimelineItem::Task)
        .chain(gaps.into_iter().map(TimelineItem::Gap))
        .collect();
    items.sort_by_key(TimelineItem::start);
    items
}

fn timed_tasks(tasks: &[Task]) -> Vec<&Task> {
    let mut timed: Vec<&Task> = tasks
        .iter()
        .filter(|t| !t.is_all_day && !t.is_inbox_item)
        .collect();
    timed.sort_by_key(|t| t.start_time);
    timed
}

/// TimelineGapCalculator: fixed daily bounds applied to any date.
///
/// A `day_end` at or before `day_start` (typically `00:00`) is read as that
/// time on the following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineGapCalculator {
    day_start: NaiveTime,
    day_end: NaiveTime,
}

impl TimelineGapCalculator {
    pub fn new(day_start: NaiveTime, day_end: NaiveTime) -> Self {
        Self { day_start, day_end }
    }

    /// Absolute bounds of `day`.
    pub fn bounds(&self, day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let start = combine(day, self.day_start);
        let end = if self.day_end > self.day_start {
            combine(day, self.day_end)
        } else {
            day.succ_opt()
                .map_or(NaiveDateTime::MAX, |next| combine(next, self.day_end))
        };
        (start, end)
    }

    pub fn compute_gaps(&self, day: NaiveDate, tasks: &[Task]) -> Vec<GapItem> {
        let (start, end) = self.bounds(day);
        compute_gaps(start, end, tasks)
    }

    pub fn build_timeline(&self, day: NaiveDate, tasks: &[Task]) -> Vec<TimelineItem> {
        let (start, end) = self.bounds(day);
        build_timeline(start, end, tasks)
    }
}

/// Maps a duration to a rendered row height.
///
/// Three breakpoints at 60, 120 and 180 minutes: flat `normal` up to an
/// hour, linear towards `medium` over the second hour, linear towards
/// `large` over the third, flat `large` from three hours on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualScale {
    normal: f32,
    medium: f32,
    large: f32,
}

impl VisualScale {
    const NORMAL_UNTIL: f32 = 60.0;
    const MEDIUM_AT: f32 = 120.0;
    const LARGE_FROM: f32 = 180.0;

    /// Sizes must be finite and satisfy `0 <= normal <= medium <= large`.
    pub fn new(normal: f32, medium: f32, large: f32) -> Result<Self, CoreError> {
        let sizes = [normal, medium, large];
        if sizes.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(CoreError::Validation(
                "Timeline heights must be finite and non-negative.".to_string(),
            ));
        }
        if normal > medium || medium > large {
            return Err(CoreError::Validation(format!(
                "Timeline heights must not decrease: normal {} <= medium {} <= large {}.",
                normal, medium, large
            )));
        }
        Ok(Self { normal, medium, large })
    }

    pub fn normal(&self) -> f32 {
        self.normal
    }

    pub fn medium(&self) -> f32 {
        self.medium
    }

    pub fn large(&self) -> f32 {
        self.large
    }

    pub fn height_for(&self, duration_minutes: i64) -> f32 {
        let minutes = duration_minutes.max(0) as f32;
        if minutes <= Self::NORMAL_UNTIL {
            self.normal
        } else if minutes <= Self::MEDIUM_AT {
            lerp(self.normal, self.medium, (minutes - Self::NORMAL_UNTIL) / 60.0)
        } else if minutes < Self::LARGE_FROM {
            lerp(self.medium, self.large, (minutes - Self::MEDIUM_AT) / 60.0)
        } else {
            self.large
        }
    }
}

impl Default for VisualScale {
    fn default() -> Self {
        Self {
            normal: 64.0,
            medium: 112.0,
            large: 160.0,
        }
    }
}

#[inline]
fn lerp(from: f32, to: f32, fraction: f32) -> f32 {
    from + (to - from) * fraction
}
