use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use ytswrap_lib::config::{DEFAULT_IMDB_API_URL, DEFAULT_SUBSOURCE_API_URL};
use ytswrap_lib::{yts_api, Config, FanoutSettings, PortalClient};
use ytswrap_server::{router, AppState};

#[derive(Parser, Debug)]
#[command(name = "ytswrap")]
#[command(about = "Movie catalogue API in front of YTS, IMDb and Subsource")]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// YTS API root
    #[arg(long, env = "YTS_API_URL", default_value = yts_api::DEFAULT_BASE_URL)]
    yts_api_url: String,

    /// IMDb metadata API root
    #[arg(long, env = "IMDB_API_URL", default_value = DEFAULT_IMDB_API_URL)]
    imdb_api_url: String,

    /// Subsource API root
    #[arg(long, env = "SUBSOURCE_API_URL", default_value = DEFAULT_SUBSOURCE_API_URL)]
    subsource_api_url: String,

    /// Subsource API key; subtitle routes answer 503 without it
    #[arg(long, env = "SUBSOURCE_API_KEY", hide_env_values = true)]
    subsource_api_key: Option<String>,

    /// Timeout for each upstream request, in seconds
    #[arg(long, env = "YTSWRAP_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,

    /// Upstream pages fetched for a year-range listing
    #[arg(
        long,
        env = "YTSWRAP_FANOUT_PAGES",
        default_value_t = 20,
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    fanout_pages: u32,

    /// Page size requested from the upstream during a year-range listing
    #[arg(
        long,
        env = "YTSWRAP_FANOUT_PAGE_SIZE",
        default_value_t = 50,
        value_parser = clap::value_parser!(u32).range(1..=50)
    )]
    fanout_page_size: u32,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            yts_api_url: self.yts_api_url.clone(),
            imdb_api_url: self.imdb_api_url.clone(),
            subsource_api_url: self.subsource_api_url.clone(),
            subsource_api_key: self
                .subsource_api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            fanout: FanoutSettings {
                max_pages: self.fanout_pages,
                page_size: self.fanout_page_size,
                ..FanoutSettings::default()
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads its env fallbacks
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ytswrap=info".parse()?)
                .add_directive("yts_api=info".parse()?),
        )
        .with_target(false)
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let cli = Cli::parse();
    let config = cli.config();
    if config.subsource_api_key.is_none() {
        tracing::warn!("SUBSOURCE_API_KEY is not set; subtitle routes are disabled");
    }

    let client = PortalClient::new(&config)?;
    let app = router(AppState::shared(client));

    let addr = SocketAddr::new(cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Server running on port {}", cli.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
