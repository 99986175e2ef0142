//! WebSocket game server for fading tic-tac-toe.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use fade_server::config::Config;
use fade_server::server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "fade-server")]
#[clap(about = "Matchmaking and game server for fading tic-tac-toe")]
struct Cli {
    /// TOML config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Address to bind (overrides config and FADE_BIND_ADDR)
    #[clap(short, long)]
    bind: Option<String>,

    /// Port to listen on (overrides config and FADE_PORT)
    #[clap(short, long)]
    port: Option<u16>,

    /// Log filter used when RUST_LOG is unset
    #[clap(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    info!(
        bind = %config.bind_addr,
        port = config.port,
        max_clients = config.max_clients,
        "starting fade-server"
    );

    server::run(config).await
}
