//! Configuration Module
//!
//! Simulator settings loaded from the environment.

mod settings;

pub use settings::{
    ConfigError, DEFAULT_API_URL, DEFAULT_PUBLISH_URL, DEFAULT_TIME_TOKEN_SECRET,
    SimulatorConfig, TokenSecret,
};
