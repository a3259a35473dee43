//! Order Publisher Port
//!
//! Interface for delivering orders to the relay.

use async_trait::async_trait;
use relay_core::Order;
use serde_json::Value;

/// Relay endpoint an order is posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishTarget {
    /// Authenticated backend endpoint (`/update`).
    #[default]
    Private,
    /// Public endpoint (`/publish`).
    Public,
}

impl PublishTarget {
    /// Short name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Private => "Private (backend) - requires time token",
            Self::Public => "Public - no authentication",
        }
    }
}

/// Result of one publish attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    /// Relay answered 2xx. `response` holds the body, if it had one.
    Sent {
        /// Response body, parsed as JSON when possible.
        response: Option<Value>,
    },
    /// Token, transport, timeout, or non-2xx failure.
    Failed {
        /// Human-readable reason.
        error: String,
    },
}

impl PublishOutcome {
    /// Whether the relay accepted the order.
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Port for delivering orders.
///
/// Implementations never return an error: every failure is folded into
/// [`PublishOutcome::Failed`] so one bad request cannot end the session.
#[async_trait]
pub trait OrderPublisher: Send + Sync {
    /// Post `order` to `target`, tagged with `channel`.
    async fn publish(&self, order: &Order, target: PublishTarget, channel: &str) -> PublishOutcome;
}
