use clap::{Parser, Subcommand};
use dora_metrics::{
    config::{resolve_secret, Config, ServerConfig},
    engine::{EngineSettings, MetricsEngine},
    providers::GitHubClient,
    store::MetricsStore,
};
use reqwest::Client;
use std::error::Error;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "dora-cli")]
#[command(about = "DORA metrics CLI", long_about = None)]
struct Cli {
    #[arg(short, long, global = true, default_value = "http://localhost:4040")]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute metrics for a branch directly against GitHub
    Compute {
        /// Repository as owner/name
        #[arg(short, long)]
        repository: String,

        #[arg(short, long, default_value = "main")]
        branch: String,

        /// Print the snapshot as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Print a running server's metrics feed
    Scrape {
        /// Metrics path; defaults to `server.metrics_path` from configuration
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Check server health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            repository,
            branch,
            json,
        } => {
            let config = Config::load()?;
            let token = resolve_secret(&config.github.token_env, &|name: &str| {
                std::env::var(name).ok()
            })?;

            let github = Arc::new(GitHubClient::new(&config.github, &token)?);
            let store = Arc::new(MetricsStore::new()?);
            let engine = MetricsEngine::new(github.clone(), github, store)
                .with_settings(EngineSettings::from_config(&config));

            let snapshot = engine.compute(&repository, &branch).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("Repository:               {}", repository);
                println!("Branch:                   {}", snapshot.branch);
                println!("Deployment frequency:     {:.3} runs/day", snapshot.deployment_frequency);
                println!("Lead time for changes:    {:.2} min", snapshot.lead_time_minutes);
                println!("Time to restore service:  {:.2} h", snapshot.restore_time_hours);
                println!("Change failure rate:      {:.3}", snapshot.change_failure_rate);
                println!("Successful deployments:   {}", snapshot.successful_count);
                println!("Failed deployments:       {}", snapshot.failed_count);
            }
        }

        Commands::Scrape { path } => {
            let path = path.unwrap_or_else(|| {
                Config::load()
                    .map(|config| config.server.metrics_path)
                    .unwrap_or_else(|_| ServerConfig::default().metrics_path)
            });
            let response = Client::new()
                .get(endpoint_url(&cli.endpoint, &path))
                .send()
                .await?
                .error_for_status()?;
            print!("{}", response.text().await?);
        }

        Commands::Health => {
            let response = Client::new()
                .get(endpoint_url(&cli.endpoint, "/health"))
                .send()
                .await?;
            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}

/// Join a server base URL and a route path
fn endpoint_url(endpoint: &str, path: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
