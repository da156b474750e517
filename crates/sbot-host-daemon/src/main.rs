//! sbot host daemon.
//!
//! - Config: YAML file + `ssb_appname` env + CLI flags
//! - Identity, plugin stack, manifest.json
//! - Discovery gate on /v1/discovery, operator menu on /v1/operator
//! - Exits 0 after the grace delay that follows Quit

use std::future::IntoFuture;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use sbot_host_core::Result;
use sbot_host_daemon::{app_state::AppState, cli::Cli, config, notify, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.client_code().as_str(), "sbot-host failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut cfg = config::load_or_default(&cli.config)?;
    config::apply_env(&mut cfg, std::env::var(config::APPNAME_ENV).ok())?;
    cli.apply(&mut cfg);
    cfg.validate()?;

    let listen = cfg.discovery.listen_addr()?;
    let sink = notify::sink_from_config(&cfg.notifications);
    let state = AppState::new(cfg, sink)?;
    tracing::info!(
        id = %state.keys().id,
        manifest = %state.manifest_path().display(),
        "server ready"
    );

    let shutdown = state.shutdown();
    let signal_shutdown = state.shutdown();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received");
            signal_shutdown.trigger_now();
        }
    });

    let app = router::build_router(state);
    tracing::info!(%listen, "sbot-host listening");
    let listener = tokio::net::TcpListener::bind(listen).await?;
    // Open discovery sockets must not hold the process past the grace delay.
    tokio::select! {
        served = axum::serve(listener, app).into_future() => served?,
        _ = shutdown.wait() => {}
    }

    tracing::info!("sbot-host stopped");
    Ok(())
}
