#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness for running CLI commands against a temporary database
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with a temporary database
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self { temp_dir, db_path }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("planner").expect("Failed to find planner binary");

        // Run inside the temp dir so a planner.toml written by a test is picked up
        cmd.current_dir(self.temp_dir.path());
        cmd.env("PLANNER_DATABASE_PATH", &self.db_path);
        cmd.env("PLANNER_DEFAULT_TIMEZONE", "UTC");
        cmd.env_remove("RUST_LOG");

        cmd
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Write a file into the harness directory and return its path
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Runs a command and returns its stdout as a string
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self.run_success(args).get_output().stdout.clone();
        String::from_utf8(output).expect("stdout is not UTF-8")
    }

    /// Pulls the value printed after `label` (e.g. "Group ID:") out of command output
    pub fn extract_after(output: &str, label: &str) -> String {
        output
            .lines()
            .find_map(|line| line.split(label).nth(1))
            .map(|rest| strip_ansi(rest.trim()))
            .unwrap_or_else(|| panic!("'{}' not found in output:\n{}", label, output))
    }
}

/// Removes terminal color codes
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Common test fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Physics on Monday and Thursday, Reading on Wednesday evenings
    pub fn timetable() -> &'static str {
        r##"
[[subjects]]
name = "Physics"
color_hex = "#3366FF"

[[subjects.schedules]]
day_of_week = "Mon"
start_time = "09:00"
end_time = "10:30"

[[subjects.schedules]]
day_of_week = "Thu"
start_time = "14:00"
end_time = "15:00"

[[subjects]]
name = "Reading"

[[subjects.schedules]]
day_of_week = "Wed"
start_time = "19:00"
end_time = "20:00"
"##
    }

    /// A timetable whose only slot is on Sunday
    pub fn sunday_only() -> &'static str {
        r##"
[[subjects]]
name = "Choir"

[[subjects.schedules]]
day_of_week = "Sun"
start_time = "10:00"
end_time = "11:00"
"##
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    pub fn task_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("✓").and(predicate::str::contains("Created"))
    }

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error")
    }

    pub fn empty_result() -> impl Predicate<str> {
        predicate::str::contains("No tasks found")
    }
}
