use dora_metrics::{
    api::{build_router, AppState},
    config::{load_dotenv, Config, Credentials},
    engine::{EngineSettings, MetricsEngine},
    providers::GitHubClient,
    store::MetricsStore,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Secrets and overrides may come from a local .env file
    let dotenv = load_dotenv(None);

    // Load configuration
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_tracing(&config);

    if let Some(e) = config_error {
        tracing::warn!("Failed to load configuration: {}", e);
        tracing::warn!("Using default configuration");
    }

    tracing::info!(
        "Starting {} v{}",
        config.observability.service_name,
        env!("CARGO_PKG_VERSION")
    );

    match dotenv {
        Ok(Some(path)) => tracing::info!(path = %path.display(), "Loaded environment from .env file"),
        Ok(None) => tracing::info!("No .env file found, reading secrets from the environment"),
        Err(e) => tracing::warn!("{}", e),
    }

    // Missing credentials are the only fatal startup condition
    let credentials = Credentials::from_env(&config.github).map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;

    let github = Arc::new(GitHubClient::new(&config.github, &credentials.github_token)?);
    tracing::info!(api_url = %github.base_url(), "GitHub client initialized");

    let store = Arc::new(MetricsStore::new()?);
    let engine = Arc::new(
        MetricsEngine::new(github.clone(), github, store)
            .with_settings(EngineSettings::from_config(&config)),
    );
    tracing::info!(
        window_days = engine.settings().window_days,
        page_size = engine.settings().page_size,
        "Metrics engine initialized"
    );

    let app_state = AppState::new(engine, credentials.webhook_secret);
    let app = build_router(app_state, &config.server);

    let http_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("Server is running on http://{}", http_addr);
    tracing::info!("   Webhook: http://{}{}", http_addr, config.server.webhook_path);
    tracing::info!("   Metrics: http://{}{}", http_addr, config.server.metrics_path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down gracefully");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "dora_metrics={},tower_http={}",
            config.observability.log_level, config.observability.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.observability.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
