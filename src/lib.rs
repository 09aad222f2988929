//! Campus CMS: marketing site and back-office server for an educational
//! institute.
//!
//! The crate is organized the way the binary uses it:
//!
//! - [`db`]: rusqlite-backed persistence with versioned migrations.
//! - [`cache`]: the optional key-value cache in front of navigation data.
//! - [`nav`]: the cache-aside navigation loader.
//! - [`quiz`]: the branching-questionnaire graph, walker, and fetch client.
//! - [`api`]: the axum router and request handlers.
//! - [`models`]: serde domain models shared by all of the above.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod models;
pub mod nav;
pub mod quiz;
