//! queuestack - local SQS/SNS topology emulator
//!
//! Loads the declarative environment description, bootstraps the in-memory
//! queue/topic topology, and serves read-only diagnostics over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use queuestack::config;
use queuestack::router;
use queuestack::state::AppState;
use queuestack::topology::Topology;

#[derive(Parser, Debug)]
#[command(name = "queuestack")]
#[command(about = "Local SQS/SNS topology emulator", long_about = None)]
struct Args {
    /// Path to the environments file
    #[arg(short, long, default_value = "queuestack.yaml", env = "QUEUESTACK_CONFIG")]
    config: PathBuf,

    /// Environment to activate
    #[arg(short, long, env = "QUEUESTACK_ENV")]
    env: Option<String>,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0", env = "QUEUESTACK_HOST")]
    host: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "QUEUESTACK_LOG_LEVEL")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("queuestack={},tower_http=debug", args.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Loading environments from {}", args.config.display());
    let environments = config::load_environments(&args.config)?;

    let mut environment = config::select_environment(&environments, args.env.as_deref());
    let ports = environment.resolve_ports();
    environment.apply_defaults();

    let topology = Topology::bootstrap(&environment).context("resolving topology")?;
    info!(
        queues = topology.queues().len(),
        topics = topology.topics().len(),
        ports = ?ports,
        "Topology ready"
    );

    let state = Arc::new(AppState::new(topology));
    let app = router::create_router(state);

    // The first resolved port carries the diagnostic surface.
    let port = ports.first().copied().unwrap_or(config::DEFAULT_PORT);
    let addr: SocketAddr = format!("{}:{}", args.host, port).parse()?;
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
