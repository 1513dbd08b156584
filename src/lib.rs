//! postbox library entrypoint.
//!
//! Modules:
//! - `app`: startup, configuration, shared state
//! - `http`: Axum router and handlers
//! - `db`: migrations, seed data and SQLite helpers
//! - `models`: typed records used across layers
//! - `store`: transactional data access for emails and attachments
//! - `util`: tracing setup and preview derivation

pub mod app;
pub mod db;
pub mod http;
pub mod models;
pub mod store;
pub mod util;
