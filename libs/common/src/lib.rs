//! Common library for the photo booth backend
//!
//! Shared PostgreSQL connectivity and error handling used by the booth
//! service and its integration tests.

pub mod database;
pub mod error;
