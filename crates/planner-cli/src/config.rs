use chrono_tz::Tz;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use planner_core::calendar::parse_clock_time;
use planner_core::error::CoreError;
use planner_core::timeline::{TimelineGapCalculator, VisualScale};
use planner_core::timezone::parse_timezone;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    /// SQLite file holding all tasks
    pub database_path: String,
    /// User's default timezone (IANA format), used to resolve "today"
    pub default_timezone: String,
    pub timeline: TimelineConfig,
    pub generation: GenerationConfig,
}

/// Bounds and row sizes for the day timeline
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct TimelineConfig {
    /// First minute shown on the timeline ("HH:MM")
    pub day_start: String,
    /// Last minute shown; "00:00" means midnight at the end of the day
    pub day_end: String,
    /// Row height up to one hour
    pub normal_height: f32,
    /// Row height at two hours
    pub medium_height: f32,
    /// Row height from three hours on
    pub large_height: f32,
}

/// Limits applied before handing input to the expanders
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct GenerationConfig {
    /// Longest date range the timetable wizard and recurring tasks may cover
    pub max_range_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "planner.db".to_string(),
            default_timezone: detect_system_timezone(),
            timeline: TimelineConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        let scale = VisualScale::default();
        Self {
            day_start: "08:00".to_string(),
            day_end: "22:00".to_string(),
            normal_height: scale.normal(),
            medium_height: scale.medium(),
            large_height: scale.large(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { max_range_days: 366 }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("planner.toml"))
            .merge(Env::prefixed("PLANNER_").split("__"))
            .extract()
    }

    pub fn timezone(&self) -> Result<Tz, CoreError> {
        parse_timezone(&self.default_timezone)
    }

    pub fn gap_calculator(&self) -> Result<TimelineGapCalculator, CoreError> {
        Ok(TimelineGapCalculator::new(
            parse_clock_time(&self.timeline.day_start)?,
            parse_clock_time(&self.timeline.day_end)?,
        ))
    }

    pub fn visual_scale(&self) -> Result<VisualScale, CoreError> {
        VisualScale::new(
            self.timeline.normal_height,
            self.timeline.medium_height,
            self.timeline.large_height,
        )
    }
}

/// Detects the system timezone, falling back to UTC if detection fails
pub fn detect_system_timezone() -> String {
    if let Ok(tz) = std::env::var("TZ") {
        if !tz.is_empty() && parse_timezone(&tz).is_ok() {
            return tz;
        }
    }

    if let Ok(tz) = iana_time_zone::get_timezone() {
        if parse_timezone(&tz).is_ok() {
            return tz;
        }
    }

    "UTC".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_usable() {
        let config = Config::default();
        assert!(config.timezone().is_ok());
        assert!(config.gap_calculator().is_ok());
        assert!(config.visual_scale().is_ok());
        assert_eq!(config.generation.max_range_days, 366);
    }

    #[test]
    fn test_bad_timeline_values_are_reported() {
        let mut config = Config::default();
        config.timeline.day_start = "late".to_string();
        assert!(matches!(config.gap_calculator(), Err(CoreError::Validation(_))));

        config.timeline.medium_height = 1.0;
        assert!(matches!(config.visual_scale(), Err(CoreError::Validation(_))));

        config.default_timezone = "Mars/Olympus".to_string();
        assert!(matches!(config.timezone(), Err(CoreError::InvalidTimezone(_))));
    }
}
