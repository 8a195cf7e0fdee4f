//! DORA delivery-performance metrics derived from GitHub webhook deliveries.
//!
//! Inbound push and workflow-run events are normalized to a
//! (repository, branch) pair; the [`engine::MetricsEngine`] then queries the
//! trailing window of pipeline runs and incident issues, reduces them to four
//! indicators, and publishes them to a [`store::MetricsStore`] that backs the
//! Prometheus exposition endpoint.

pub mod api;
pub mod calculators;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod models;
pub mod providers;
pub mod store;
pub mod webhook;

pub use error::{AppError, Result};
