//! Frontend CLI Binary
//!
//! Live table of orders from the relay's WebSocket feed.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin frontend-cli -- --mode public --channel default
//! ```
//!
//! # Environment Variables
//!
//! - `WS_URL`: Private feed endpoint (default: <ws://localhost:8080/ws>)
//! - `JWT_SECRET`: Token signing secret (default: your-jwt-secret)
//! - `USER_ID`: Token subject (default: demo-user-123)
//! - `USER_NAME`: Token display name (default: Demo User)
//! - `JWT_TTL_SECS`: Token lifetime (default: 3600)
//! - `OTEL_ENABLED`: Enable OpenTelemetry export (default: false)
//! - `RUST_LOG`: Log filter (default: warn, info for this crate)

use std::io::{self, IsTerminal};
use std::time::Duration;

use clap::Parser;
use frontend_cli::{
    Cli, FeedClient, FeedViewer, FrontendConfig, feed_url, print_title, prompt_mode,
};
use relay_core::env::load_dotenv;
use relay_core::telemetry;
use tokio::signal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const EVENT_BUFFER: usize = 256;
const CLOSE_TIMEOUT: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| "failed to install rustls crypto provider")?;

    load_dotenv();

    let _telemetry_guard = telemetry::init("frontend-cli", "frontend_cli");

    let cli = Cli::parse();
    let config = FrontendConfig::from_env();

    let mut stdout = io::stdout();
    let clears_screen = stdout.is_terminal();
    print_title(&mut stdout, clears_screen)?;

    let mode = match cli.mode {
        Some(mode) => mode,
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            prompt_mode(stdin, &mut stdout).await?
        }
    };

    let url = feed_url(
        &config,
        mode,
        cli.channel.as_deref(),
        chrono::Utc::now().timestamp(),
    )?;
    tracing::info!(
        mode = mode.as_str(),
        channel = cli.channel.as_deref().unwrap_or_default(),
        "Configuration loaded"
    );

    let cancel = CancellationToken::new();
    let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);

    let client = FeedClient::new(url, event_tx, cancel.clone());
    let mut client_handle = tokio::spawn(client.run());
    let viewer_handle = tokio::spawn(FeedViewer::stdout().run(event_rx));

    await_shutdown().await;
    println!("\nShutting down...");
    cancel.cancel();

    match tokio::time::timeout(CLOSE_TIMEOUT, &mut client_handle).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => tracing::debug!(error = %e, "Feed client ended with error"),
        Ok(Err(e)) => tracing::error!(error = %e, "Feed client task failed"),
        Err(_) => {
            tracing::warn!("Feed client did not close in time");
            client_handle.abort();
        }
    }

    if let Err(e) = viewer_handle.await {
        tracing::error!(error = %e, "Viewer task failed");
    }

    Ok(())
}

/// Wait for SIGINT or SIGTERM.
///
/// The feed closing on its own does not end the process.
async fn await_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
