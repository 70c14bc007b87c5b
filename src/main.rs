use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use discotui_api::{DiscogsClient, DiscogsProbe, UserCatalog};
use discotui_auth::{ConsumerCredentials, OAuthHandshake, SessionManager};
use discotui_config::{Config, ConfigWatcher};
use discotui_store::EncryptedFileStore;
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "discotui", version, about = "Browse your Discogs collection in the terminal")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Browse collection, wishlist and orders (default).
    Run,
    /// Delete the stored Discogs authorization.
    Logout,
    /// Show whether a token is stored and who it belongs to.
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, path) =
        Config::load(cli.config.as_deref()).map_err(|e| anyhow::anyhow!("config error: {e}"))?;
    let _log_guard = init_logging(&config)?;
    if let Some(p) = &path {
        tracing::info!(path = %p.display(), "configuration loaded");
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(config, path).await,
        Commands::Logout => cmd_logout().await,
        Commands::Status => cmd_status(config).await,
    }
}

/// File logging: the TUI owns the terminal.
fn init_logging(config: &Config) -> Result<WorkerGuard> {
    let file = match &config.log.file {
        Some(f) => f.clone(),
        None => discotui_config::paths::log_path()?,
    };
    let dir = file
        .parent()
        .map_or_else(|| PathBuf::from("."), std::path::Path::to_path_buf);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let name = file
        .file_name()
        .map_or_else(|| "discotui.log".into(), |n| n.to_os_string());

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();
    Ok(guard)
}

struct Wiring {
    http: reqwest::Client,
    consumer: ConsumerCredentials,
    sessions: SessionManager,
}

fn wire(config: &Config) -> Result<Wiring> {
    let consumer = ConsumerCredentials::resolve().map_err(|e| anyhow::anyhow!("{e}"))?;
    let http = discotui_api::http_client().map_err(|e| anyhow::anyhow!("{e}"))?;
    let store = EncryptedFileStore::at_default_location(&consumer.secret)
        .map_err(|e| anyhow::anyhow!("token store error: {e}"))?;
    tracing::debug!(path = %store.path().display(), "token store");

    let handshake = OAuthHandshake::new(http.clone(), consumer.clone(), &config.api.base_url)
        .with_callback_port(config.auth.callback_port)
        .with_timeout(Duration::from_secs(config.auth.timeout_secs));
    let probe = DiscogsProbe::new(http.clone(), config.api.clone(), consumer.clone());
    let sessions = SessionManager::new(Arc::new(store), Arc::new(handshake), Arc::new(probe));
    Ok(Wiring {
        http,
        consumer,
        sessions,
    })
}

async fn cmd_run(config: Config, path: Option<PathBuf>) -> Result<()> {
    let Wiring {
        http,
        consumer,
        sessions,
    } = wire(&config)?;
    eprintln!("🎵 Welcome to DiscoTUI!");
    let session = sessions
        .establish()
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let client = DiscogsClient::new(http, &config.api, consumer, session.token);
    let catalog = Arc::new(UserCatalog::new(client, session.identity.username.clone()));

    let watcher = Arc::new(ConfigWatcher::new(config, path));
    if let Err(e) = watcher.clone().watch() {
        tracing::warn!(error = %e, "config hot reload disabled");
    }

    eprintln!("Loading your Discogs data...");
    discotui_tui::run(catalog, watcher.arc(), session.identity.username).await
}

async fn cmd_logout() -> Result<()> {
    let path = discotui_config::paths::token_path().map_err(|e| anyhow::anyhow!("{e}"))?;
    EncryptedFileStore::discard(&path)
        .await
        .map_err(|e| anyhow::anyhow!("logout failed: {e}"))?;
    println!("Stored Discogs authorization removed.");
    Ok(())
}

async fn cmd_status(config: Config) -> Result<()> {
    let Wiring { sessions, .. } = wire(&config)?;
    match sessions.status().await {
        Ok(Some(identity)) => println!("authenticated as {}", identity.username),
        Ok(None) => println!("not authenticated"),
        Err(e) => println!("stored token is not usable: {e}"),
    }
    Ok(())
}
