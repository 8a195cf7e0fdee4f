pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::{engine::MetricsEngine, store::MetricsStore};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MetricsEngine>,
    pub store: Arc<MetricsStore>,
    pub webhook_secret: Arc<str>,
}

impl AppState {
    pub fn new(engine: Arc<MetricsEngine>, webhook_secret: impl Into<Arc<str>>) -> Self {
        Self {
            store: Arc::clone(engine.store()),
            engine,
            webhook_secret: webhook_secret.into(),
        }
    }
}
