/// Moodtune Server - mood log, playlist recommendations and chat assistant
use anyhow::Context;
use clap::{Parser, Subcommand};
use moodtune_core::{Clock, IntentClassifier, SystemClock};
use moodtune_gemini::GeminiClient;
use moodtune_server::{api, config::ServerConfig, services::MoodAggregator, state::AppState};
use moodtune_spotify::SpotifyClient;
use moodtune_storage::LocalStorageContext;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "moodtune-server")]
#[command(about = "Moodtune mood tracking backend", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml if present)
    #[arg(short, long, global = true, env = "MOODTUNE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print statistics for the last 30 days as JSON
    Stats,
    /// Print the mood heatmap as JSON
    Heatmap,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "moodtune_server=info,moodtune_spotify=info,moodtune_gemini=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::Stats => print_stats(config).await?,
        Commands::Heatmap => print_heatmap(config).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Moodtune Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let storage = open_storage(&config).await?;
    tracing::info!("Database connected");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let spotify = SpotifyClient::with_clock(config.spotify.client_config(), Arc::clone(&clock))
        .context("Invalid Spotify configuration")?;
    let gemini =
        GeminiClient::new(config.gemini.client_config()).context("Invalid Gemini configuration")?;

    let app_state = AppState::new(
        storage,
        Arc::new(spotify),
        Arc::new(gemini),
        IntentClassifier::new(&config.assistant.analysis_keywords),
        clock,
    );

    let app = api::app(app_state, &config.server)?;

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn print_stats(config: ServerConfig) -> anyhow::Result<()> {
    let stats = offline_aggregator(&config).await?.recent_stats().await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

async fn print_heatmap(config: ServerConfig) -> anyhow::Result<()> {
    let buckets = offline_aggregator(&config).await?.heatmap().await?;
    println!("{}", serde_json::to_string_pretty(&buckets)?);
    Ok(())
}

/// Aggregator over the local database, no external services needed
async fn offline_aggregator(config: &ServerConfig) -> anyhow::Result<MoodAggregator> {
    let storage = open_storage(config).await?;
    Ok(MoodAggregator::new(storage, Arc::new(SystemClock)))
}

async fn open_storage(config: &ServerConfig) -> anyhow::Result<Arc<LocalStorageContext>> {
    let url = &config.storage.database_url;

    if let Some(path) = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .filter(|path| !path.starts_with(":memory:"))
    {
        let path = path.split('?').next().unwrap_or(path);
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
    }

    let storage = LocalStorageContext::connect(url)
        .await
        .with_context(|| format!("Failed to open database {url}"))?;
    Ok(Arc::new(storage))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutting down"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
