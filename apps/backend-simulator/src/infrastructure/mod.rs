//! Infrastructure Layer - Adapters and external integrations.

/// Environment configuration.
pub mod config;

/// Console adapter for the terminal port.
pub mod console;

/// reqwest adapter for the publisher port.
pub mod http;
