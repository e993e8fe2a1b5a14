use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use planner_core::calendar::DateSpan;
use planner_core::error::CoreError;

use crate::config::Config;

pub mod add;
pub mod delete;
pub mod done;
pub mod edit;
pub mod group;
pub mod inbox;
pub mod timeline;
pub mod wizard;

/// Rejects date ranges longer than `generation.max_range_days`. Reversed
/// ranges pass through so the expanders can report them.
pub fn check_range(start: NaiveDate, end: NaiveDate, config: &Config) -> Result<()> {
    let days = DateSpan::len_days(start, end);
    let limit = config.generation.max_range_days as usize;
    if days > limit {
        return Err(anyhow!(CoreError::Validation(format!(
            "Range {} to {} covers {} days; the limit is {} (generation.max_range_days)",
            start, end, days, limit
        ))));
    }
    Ok(())
}
