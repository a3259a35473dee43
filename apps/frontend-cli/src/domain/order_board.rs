//! Order Board
//!
//! Every order received since the viewer started, in arrival order. Rows are
//! never evicted; the table grows for the life of the process.

use chrono::{DateTime, Local};
use relay_core::Order;

/// One received order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardEntry {
    /// The order as decoded from the feed.
    pub order: Order,
    /// Local time the frame carrying it arrived.
    pub received_at: DateTime<Local>,
}

/// Append-only list of received orders.
#[derive(Debug, Clone, Default)]
pub struct OrderBoard {
    entries: Vec<BoardEntry>,
}

impl OrderBoard {
    /// Empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record every order from one frame with a shared arrival time.
    pub fn record<I>(&mut self, orders: I, received_at: DateTime<Local>)
    where
        I: IntoIterator<Item = Order>,
    {
        self.entries.extend(orders.into_iter().map(|order| BoardEntry {
            order,
            received_at,
        }));
    }

    /// Rows in arrival order.
    #[must_use]
    pub fn entries(&self) -> &[BoardEntry] {
        &self.entries
    }

    /// Total orders received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has arrived yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_arrival_order() {
        let mut board = OrderBoard::new();
        let now = Local::now();

        board.record([Order::new("a", "Webcam", 75.0)], now);
        board.record(
            [
                Order::new("b", "Tablet", 310.0),
                Order::new("c", "Monitor", 99.0),
            ],
            now,
        );

        let ids: Vec<&str> = board.entries().iter().map(|e| e.order.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(board.len(), 3);
        assert!(!board.is_empty());
    }

    #[test]
    fn empty_frame_adds_nothing() {
        let mut board = OrderBoard::new();
        board.record(Vec::new(), Local::now());
        assert!(board.is_empty());
    }
}
