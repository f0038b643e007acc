//! gd-daemon entry point.
//!
//! This file is intentionally thin: it loads config and seed data, sets up
//! tracing, wires middleware, and starts the HTTP server. All route handlers
//! live in `routes.rs`; all shared state types live in `state.rs`.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use clap::Parser;
use gd_config::{DaemonConfig, UnusedKeyPolicy};
use gd_daemon::{routes, seed, state};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "gd-daemon")]
#[command(about = "Dishes & orders HTTP service", long_about = None)]
struct Cli {
    /// Layered config paths in merge order (base -> env -> local)
    #[arg(long = "config")]
    config_paths: Vec<PathBuf>,

    /// Bind address. Wins over GD_DAEMON_ADDR and /server/addr.
    #[arg(long)]
    addr: Option<SocketAddr>,

    /// Refuse to boot when the config carries keys the daemon never reads.
    #[arg(long, default_value_t = false)]
    strict_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Silent if the file does not exist; production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    let paths: Vec<&str> = cli
        .config_paths
        .iter()
        .map(|p| p.to_str().context("config path is not valid UTF-8"))
        .collect::<anyhow::Result<_>>()?;
    let loaded = gd_config::load_layered_yaml(&paths)?;

    let policy = if cli.strict_config {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let report = gd_config::report_unused_keys(&loaded.config_json, policy)?;
    if !report.is_clean() {
        warn!(unused = ?report.unused_leaf_pointers, "config carries keys gd-daemon never reads");
    }

    let cfg = DaemonConfig::from_config_json(&loaded.config_json)?;
    info!(config_hash = %loaded.config_hash, layers = paths.len(), "config loaded");

    let dishes = seed::load_dishes(cfg.seed_dishes_path.as_deref())?;
    let orders = seed::load_orders(cfg.seed_orders_path.as_deref())?;
    info!(dishes = dishes.len(), orders = orders.len(), "seed data loaded");

    let shared = Arc::new(state::AppState::with_seed(dishes, orders));

    let app = routes::build_router(shared)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_from_config(&cfg.cors_allowed_origins));

    let addr = cli.addr.or_else(bind_addr_from_env).unwrap_or(cfg.addr);
    info!("gd-daemon listening on http://{}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server crashed")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn bind_addr_from_env() -> Option<SocketAddr> {
    std::env::var("GD_DAEMON_ADDR").ok()?.parse().ok()
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        warn!("ctrl-c handler unavailable; shutdown only on process kill");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

/// CORS: only the configured origins, only the methods the API serves.
fn cors_from_config(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(tower_http::cors::Any)
}
