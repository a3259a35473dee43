//! Configuration Module
//!
//! Viewer settings loaded from the environment.

mod settings;

pub use settings::{DEFAULT_JWT_SECRET, DEFAULT_WS_URL, FrontendConfig, JwtSecret};
