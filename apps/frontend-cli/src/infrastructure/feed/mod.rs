//! Feed Module
//!
//! WebSocket connection to the relay's order feed.
//!
//! # Components
//!
//! - [`feed_url`]: Builds the private or public feed URL
//! - [`FeedClient`]: Single-attempt WebSocket client emitting [`FeedEvent`]s

mod client;
mod endpoint;

pub use client::{FeedClient, FeedClientError, FeedEvent};
pub use endpoint::{ConnectionMode, feed_url};
