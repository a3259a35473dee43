//! Order Wire Model
//!
//! The JSON object posted by the simulator and fanned out by the backend to
//! WebSocket subscribers: `{"id": "...", "item": "...", "amount": 123}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Order rejected by the backend's validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// `id` is empty.
    #[error("order id cannot be empty")]
    MissingId,
    /// `item` is empty.
    #[error("order item cannot be empty")]
    MissingItem,
    /// `amount` is zero, negative, or not a number.
    #[error("order amount must be positive, got {0}")]
    NonPositiveAmount(String),
}

/// A single order event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub id: String,
    /// Item name.
    pub item: String,
    /// Order amount.
    pub amount: f64,
}

impl Order {
    /// Create an order.
    #[must_use]
    pub fn new(id: impl Into<String>, item: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            item: item.into(),
            amount,
        }
    }

    /// Apply the backend's acceptance rule (non-empty id and item, positive amount).
    ///
    /// # Errors
    ///
    /// Returns the first rule the order breaks.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.id.is_empty() {
            return Err(OrderError::MissingId);
        }
        if self.item.is_empty() {
            return Err(OrderError::MissingItem);
        }
        if self.amount.is_nan() || self.amount <= 0.0 {
            return Err(OrderError::NonPositiveAmount(self.amount.to_string()));
        }
        Ok(())
    }

    /// Amount as shown in the order table, e.g. `$100` or `$12.5`.
    #[must_use]
    pub fn amount_display(&self) -> String {
        format!("${}", self.amount)
    }
}

/// Decode every order in one WebSocket frame.
///
/// The backend coalesces queued messages into a single frame by writing the
/// JSON objects back to back, so a frame may hold several orders.
///
/// # Errors
///
/// Returns the JSON error for the first object that fails to decode.
pub fn decode_orders(frame: &str) -> Result<Vec<Order>, serde_json::Error> {
    serde_json::Deserializer::from_str(frame)
        .into_iter::<Order>()
        .collect()
}
