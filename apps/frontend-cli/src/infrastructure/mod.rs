//! Infrastructure Layer - Adapters and external integrations.

/// Environment configuration.
pub mod config;

/// Terminal rendering of the order board.
pub mod display;

/// WebSocket feed connection.
pub mod feed;
