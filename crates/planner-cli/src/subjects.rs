use anyhow::{Context, Result};
use figment::{
    providers::{Format, Toml},
    Figment,
};
use planner_core::models::SubjectConfig;
use serde::Deserialize;
use std::path::Path;

/// A timetable file:
///
/// ```toml
/// [[subjects]]
/// name = "Physics"
/// color_hex = "#3366FF"
///
/// [[subjects.schedules]]
/// day_of_week = "Mon"
/// start_time = "09:00"
/// end_time = "10:30"
/// ```
#[derive(Deserialize, Debug)]
pub struct Timetable {
    #[serde(default)]
    pub subjects: Vec<SubjectConfig>,
}

pub fn load_timetable(path: &Path) -> Result<Timetable> {
    if !path.exists() {
        anyhow::bail!("Timetable file '{}' does not exist", path.display());
    }
    Figment::from(Toml::file(path))
        .extract()
        .with_context(|| format!("Failed to read timetable '{}'", path.display()))
}
