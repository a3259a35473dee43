#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::needless_pass_by_value
    )
)]

//! Frontend CLI - Live Order Feed Viewer
//!
//! Connects to the relay's WebSocket feed and keeps a table of every order
//! received on screen.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  token/channel   ┌─────────────┐  FeedEvent   ┌─────────────┐
//! │ Config+CLI  │ ───────────────> │ FeedClient  │ ───(mpsc)──> │ FeedViewer  │
//! └─────────────┘                  └─────────────┘              └─────────────┘
//!                                         ^                            │
//!                                   CancellationToken            OrderBoard table
//! ```
//!
//! - **Domain**: [`OrderBoard`], the append-only list of received orders
//! - **Infrastructure**: configuration, feed URL and client, console display
//! - **CLI**: clap flags selecting the mode and channel

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Command line flags.
pub mod cli;

/// Viewer state.
pub mod domain;

/// Config, feed connection, and console display.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

pub use cli::Cli;
pub use domain::order_board::{BoardEntry, OrderBoard};
pub use infrastructure::config::{FrontendConfig, JwtSecret};
pub use infrastructure::display::{FeedViewer, print_title, prompt_mode, render_board};
pub use infrastructure::feed::{ConnectionMode, FeedClient, FeedClientError, FeedEvent, feed_url};
