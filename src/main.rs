//! admin-gate
//!
//! Redirects requests for the protected prefix to the login page unless
//! they carry the session cookie.
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ trace ─▶ timeout ─▶ route guard ─┬─▶ handler
//!                                                                    │
//!     ◀──────────────────────────── 307 Location: /auth/login ◀──────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use admin_gate::config::watcher::ConfigWatcher;
use admin_gate::config::{load_config, GatewayConfig};
use admin_gate::observability::{logging, metrics};
use admin_gate::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "admin-gate")]
#[command(about = "Session-cookie guard for admin routes", version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "ADMIN_GATE_CONFIG")]
    config: Option<PathBuf>,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,

    /// Reload the guard settings when the configuration file changes
    #[arg(long, requires = "config")]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    if cli.check {
        println!("configuration ok");
        return Ok(());
    }

    logging::init_logging(&config.observability.log_level)?;

    tracing::info!("admin-gate v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        protected_prefix = %config.guard.protected_prefix,
        login_path = %config.guard.login_path,
        session_cookie = %config.guard.session_cookie_name,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    // The watcher must outlive the server.
    let (_watcher, config_updates) = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config);
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
