#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value
    )
)]

//! Backend Simulator - Interactive Order Publisher
//!
//! Stands in for an upstream service that pushes order events into the
//! relay. Orders are typed in or generated, then POSTed to the private
//! (`/update`) or public (`/publish`) endpoint carrying a fresh time-window
//! token in `X-API-Token`.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: synthetic order generation
//! - **Application**: ports (`OrderPublisher`, `Terminal`) and the menu
//!   session state machine
//! - **Infrastructure**: env config, reqwest publisher, stdin/stdout console
//!
//! # Flow
//!
//! ```text
//! menu ─► target + channel ─► action ─► OrderPublisher ─► POST /update | /publish
//!   ▲                                                            │
//!   └──────────────────── press Enter ◄──────── outcome ◄────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Order generation with no I/O.
pub mod domain;

/// Application layer - Ports and the menu session.
pub mod application;

/// Infrastructure layer - Config, HTTP, and console adapters.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::ports::{
    NoticeLevel, OrderPublisher, PromptError, PublishOutcome, PublishTarget, Terminal,
};
pub use application::session::{
    MenuAction, PublishRequest, SessionSettings, SessionState, SessionSummary, SimulatorSession,
};
pub use domain::order_generator::{ITEM_CATALOG, OrderGenerator};
pub use infrastructure::config::{ConfigError, SimulatorConfig, TokenSecret};
pub use infrastructure::console::ConsoleTerminal;
pub use infrastructure::http::{HttpOrderPublisher, PublishError};

/// Run an interactive session on stdin/stdout until the user exits.
///
/// # Errors
///
/// Fails if the publisher cannot be built from `config` or the console
/// reports an I/O error. End of input is a normal exit.
pub async fn run(config: &SimulatorConfig) -> anyhow::Result<SessionSummary> {
    use anyhow::Context as _;

    let publisher =
        HttpOrderPublisher::from_config(config).context("failed to build order publisher")?;
    let terminal = ConsoleTerminal::stdio();
    let mut session = SimulatorSession::new(
        publisher,
        terminal,
        OrderGenerator::from_os_rng(),
        SessionSettings::from(config),
    );

    session.run().await.context("console session failed")
}
