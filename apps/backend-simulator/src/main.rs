//! Backend Simulator Binary
//!
//! Interactive menu for posting orders to the relay.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin backend-simulator
//! ```
//!
//! # Environment Variables
//!
//! - `API_URL`: Private endpoint (default: <http://localhost:8080/update>)
//! - `PUBLISH_URL`: Public endpoint (default: <http://localhost:8080/publish>)
//! - `TIME_TOKEN_SECRET`: Shared HMAC secret (default: your-time-token-secret)
//! - `TIME_WINDOW_SECONDS`: Token window in seconds (default: 3600)
//! - `SIMULATOR_REQUEST_TIMEOUT_MS`: Per-request timeout (default: 5000)
//! - `SIMULATOR_ORDER_DELAY_MS`: Pause between batch orders (default: 500)
//! - `OTEL_ENABLED`: Enable OpenTelemetry export (default: false)
//! - `RUST_LOG`: Log filter (default: warn, info for this crate)

use backend_simulator::SimulatorConfig;
use relay_core::env::load_dotenv;
use relay_core::telemetry;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| "failed to install rustls crypto provider")?;

    load_dotenv();

    let _telemetry_guard = telemetry::init("backend-simulator", "backend_simulator");

    let config = SimulatorConfig::from_env()?;
    log_config(&config);

    tokio::select! {
        result = backend_simulator::run(&config) => {
            let summary = result?;
            tracing::info!(sent = summary.sent, failed = summary.failed, "Simulator finished");
        }
        () = await_interrupt() => {
            tracing::info!("Interrupted, exiting");
        }
    }

    Ok(())
}

/// Log the parsed configuration.
fn log_config(config: &SimulatorConfig) {
    tracing::info!(
        api_url = %config.api_url,
        publish_url = %config.publish_url,
        time_window_secs = config.time_window_secs,
        request_timeout_ms = config.request_timeout.as_millis(),
        order_delay_ms = config.order_delay.as_millis(),
        "Configuration loaded"
    );
}

/// Wait for SIGINT or SIGTERM.
async fn await_interrupt() {
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
