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

//! Relay Core - Shared primitives for the order relay demo tools
//!
//! Both demo CLIs talk to the same real-time order relay backend. This crate
//! holds everything they share:
//!
//! - `token`: Time-window HMAC tokens (`X-API-Token`) for the publish endpoints
//! - `jwt`: HS256 signed-claims tokens for the private WebSocket feed
//! - `order`: Order wire model and feed frame decoding
//! - `env`: `.env` loading and typed environment parsing
//! - `telemetry`: tracing subscriber with optional OTLP export
//!
//! # Token Layout
//!
//! ```text
//! base64url( "<window_index>" ":" base64url(HMAC-SHA256(secret, "<window_index>")) )
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Environment loading and parsing helpers.
pub mod env;

/// HS256 signed-claims tokens.
pub mod jwt;

/// Order wire model.
pub mod order;

/// Tracing and OpenTelemetry setup.
pub mod telemetry;

/// Time-window HMAC tokens.
pub mod token;

// =============================================================================
// Re-exports
// =============================================================================

pub use jwt::{Claims, JwtError};
pub use order::{Order, OrderError, decode_orders};
pub use telemetry::{TelemetryConfig, TelemetryGuard};
pub use token::{
    API_TOKEN_HEADER, DEFAULT_ALLOWED_CLOCK_SKEW, DEFAULT_TIME_WINDOW_SECS, DecodedToken,
    TimeTokenSigner, TokenError, VerifyError, decode_token, generate_token, verify_token,
};
