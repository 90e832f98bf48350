//! Application context - dependency injection container

use std::sync::Arc;

use timegrid_core::{CalendarService, ScheduleItemRepository, ScheduleService};
use timegrid_domain::{Config, Result};
use timegrid_infra::{config, DbManager, SqliteScheduleItemRepository};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub schedule_items: Arc<dyn ScheduleItemRepository>,
    pub schedule_service: Arc<ScheduleService>,
    pub calendar_service: Arc<CalendarService>,
}

impl AppContext {
    /// Create a new application context from the environment or a config
    /// file, falling back to built-in defaults when neither is present.
    pub fn new() -> Result<Self> {
        let config = config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "no configuration found, using defaults");
            Config::default()
        });
        Self::new_with_config(config)
    }

    /// Create a new application context with custom configuration
    ///
    /// Tests use this to point the context at a temporary database.
    pub fn new_with_config(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::from_config(&config.database)?);
        db.run_migrations()?;

        let schedule_items: Arc<dyn ScheduleItemRepository> =
            Arc::new(SqliteScheduleItemRepository::new(Arc::clone(&db)));

        let schedule_service = Arc::new(
            ScheduleService::new(Arc::clone(&schedule_items))
                .with_overlap_scope(config.schedule.overlap_scope)
                .with_upcoming_limit(config.schedule.upcoming_limit),
        );
        let calendar_service = Arc::new(CalendarService::new(Arc::clone(&schedule_items)));

        tracing::info!(
            db_path = %db.path().display(),
            overlap_scope = %config.schedule.overlap_scope,
            "application context initialised"
        );

        Ok(Self { config, db, schedule_items, schedule_service, calendar_service })
    }
}
