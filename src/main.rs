use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use seg_red_broker::config;
use seg_red_broker::is_production;
use seg_red_broker::router::{self, RouterOptions};
use seg_red_broker::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "seg-red-broker")]
#[command(about = "Gateway in front of the auth and file services")]
#[command(version)]
struct Args {
    #[arg(long, help = "Listen port (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Environment file to load instead of ./.env")]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // An explicit env file must exist; the default .env is optional
    match &args.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
        }
        None => {
            let _ = dotenvy::dotenv();
        }
    }

    let config = config::init().context("invalid gateway configuration")?;
    init_tracing(&config.server.log_level);

    tracing::info!("Starting broker in {:?} mode", config.environment);
    tracing::info!(
        auth = %config.upstream.auth_service_url,
        files = %config.upstream.file_service_url,
        "upstream services"
    );

    let state = AppState::from_config(config);
    let app = router::app_with_options(state, &RouterOptions::from(config));

    let port = args.port.unwrap_or(config.server.port);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let handle = axum_server::Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    match config.tls_paths() {
        Some((cert, key)) => {
            let tls = RustlsConfig::from_pem_file(&cert, &key)
                .await
                .with_context(|| format!("failed to load TLS certificate {}", cert.display()))?;
            tracing::info!("Broker listening on https://{}", addr);
            axum_server::bind_rustls(addr, tls)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("server error")?;
        }
        None => {
            if is_production!() {
                tracing::warn!("CERTS_FOLDER is not set; serving plain HTTP in production");
            }
            tracing::info!("Broker listening on http://{}", addr);
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("server error")?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured level
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal(handle: axum_server::Handle) {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown requested");
        handle.graceful_shutdown(Some(Duration::from_secs(10)));
    }
}
