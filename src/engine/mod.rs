mod orchestrator;

pub use orchestrator::{EngineSettings, MetricsEngine};
