//! Application state shared across handlers

use std::path::PathBuf;

use sqlx::PgPool;

use crate::{
    notifications::Dispatcher,
    repositories::{SessionRepository, SettingsRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub session_repository: SessionRepository,
    pub settings_repository: SettingsRepository,
    pub dispatcher: Dispatcher,
    pub static_dir: PathBuf,
}

impl AppState {
    /// Wire repositories over `pool` together with an already built dispatcher
    pub fn new(pool: PgPool, dispatcher: Dispatcher, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            session_repository: SessionRepository::new(pool.clone()),
            settings_repository: SettingsRepository::new(pool),
            dispatcher,
            static_dir: static_dir.into(),
        }
    }
}
