//! Photo booth backend
//!
//! Serves the booth front-end, delivers photo strips by email and SMS, and
//! records booth sessions and runtime settings in PostgreSQL.

pub mod config;
pub mod error;
pub mod models;
pub mod notifications;
pub mod repositories;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use notifications::Dispatcher;
pub use routes::create_router;
pub use state::AppState;
