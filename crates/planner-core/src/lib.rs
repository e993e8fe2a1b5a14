//! # Planner Core Library
//!
//! Schedule generation for a task/calendar planner: weekly timetables and
//! simple recurrence rules are expanded into concrete, dated tasks, and a
//! day's tasks are turned into a timeline with the free gaps between them.
//!
//! ## Features
//!
//! - **Timetable Expansion**: Weekly subject slots become dated tasks over
//!   an inclusive date range, all tagged with one group id
//! - **Simple Recurrence**: Once, daily, weekly and custom-weekday copies of
//!   a base task, preserving wall-clock times and overnight spans
//! - **Timeline Gaps**: Free-time intervals around and between a day's tasks,
//!   plus a piecewise-linear duration-to-height mapping for rendering
//! - **Deterministic**: Generation never reads the clock; identifiers come
//!   from an injected [`ids::IdGenerator`]
//! - **Pluggable Storage**: Batches are persisted through the
//!   [`repository::Repository`] traits (SQLite implementation included)
//!
//! ## Core Modules
//!
//! - [`models`]: Tasks, subject templates, recurrence modes, timeline items
//! - [`schedule`]: Weekly timetable expansion
//! - [`recurrence`]: Simple recurrence expansion
//! - [`timeline`]: Gap computation and visual scale
//! - [`calendar`]: Date iteration and minute arithmetic
//! - [`timezone`]: Timezone utilities and DST-aware durations
//! - [`ids`]: Identifier generation
//! - [`db`]: Database connection and migration management
//! - [`repository`]: Data access layer with Repository pattern
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::{NaiveDate, NaiveTime, Weekday};
//! use planner_core::{
//!     db, ids::UuidGenerator, models::SubjectConfig,
//!     repository::{SqliteRepository, TaskRepository},
//!     schedule::ScheduleTemplateExpander,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("planner.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let physics = SubjectConfig::new("Physics").with_schedule(
//!         Weekday::Mon,
//!         NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
//!         NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
//!     );
//!
//!     let expander = ScheduleTemplateExpander::new(UuidGenerator);
//!     let schedule = expander.expand(
//!         NaiveDate::from_ymd_opt(2025, 10, 6).unwrap(),
//!         NaiveDate::from_ymd_opt(2025, 12, 19).unwrap(),
//!         &[physics],
//!     )?;
//!
//!     repo.save_tasks(&schedule.tasks).await?;
//!     println!("Created {} classes in group {}", schedule.count, schedule.group_id);
//!
//!     Ok(())
//! }
//! ```

pub mod calendar;
pub mod db;
pub mod error;
pub mod ids;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod schedule;
pub mod timeline;
pub mod timezone;
