#![allow(dead_code)]

use tempfile::TempDir;
use timegrid_domain::{Config, DatabaseConfig, OwnerId};
use timegrid_lib::{AppContext, ScheduleItemInput};

/// App context over a throwaway database; the directory lives as long as
/// the harness.
pub struct TestApp {
    pub ctx: AppContext,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temporary directory");
        let db_path = temp_dir.path().join("timegrid.db");

        let config = Config {
            database: DatabaseConfig {
                path: db_path.to_string_lossy().to_string(),
                ..DatabaseConfig::default()
            },
            ..Config::default()
        };

        let ctx = AppContext::new_with_config(config).expect("failed to build app context");
        Self { ctx, _temp_dir: temp_dir }
    }
}

pub fn owner(name: &str) -> OwnerId {
    OwnerId::new(name)
}

pub fn input(title: &str, date: &str, time: &str, minutes: u32) -> ScheduleItemInput {
    ScheduleItemInput {
        title: title.into(),
        date: date.into(),
        time: time.into(),
        duration_minutes: Some(minutes),
        ..ScheduleItemInput::default()
    }
}
