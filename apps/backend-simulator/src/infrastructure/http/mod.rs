//! HTTP Adapters
//!
//! reqwest implementation of the order publisher port.

mod publisher;

pub use publisher::{HttpOrderPublisher, PublishError};
