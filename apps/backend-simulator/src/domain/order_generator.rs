//! Synthetic Order Generation
//!
//! Random orders for the "multiple" and "random" menu actions. The RNG is a
//! type parameter so tests can seed it.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use relay_core::Order;

/// Item names a generated order picks from.
pub const ITEM_CATALOG: [&str; 12] = [
    "Laptop Computer",
    "Smartphone",
    "Headphones",
    "Coffee Maker",
    "Desk Chair",
    "Wireless Mouse",
    "External Hard Drive",
    "Webcam",
    "Keyboard",
    "Monitor",
    "Tablet",
    "Smart Watch",
];

/// Smallest generated amount.
pub const MIN_AMOUNT: u32 = 50;

/// Largest generated amount.
pub const MAX_AMOUNT: u32 = 1049;

/// Exclusive upper bound of the id suffix.
const ID_SUFFIX_RANGE: u32 = 1000;

/// Random order source.
#[derive(Debug, Clone)]
pub struct OrderGenerator<R = StdRng> {
    rng: R,
}

impl OrderGenerator<StdRng> {
    /// Generator seeded from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Deterministic generator for tests and reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> OrderGenerator<R> {
    /// Wrap an RNG.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Random order stamped with the current time.
    pub fn generate(&mut self) -> Order {
        self.generate_at(Utc::now().timestamp_millis())
    }

    /// Random order whose id embeds `unix_millis`.
    ///
    /// Id is `order-<unix_millis>-<0..999>`, item one of [`ITEM_CATALOG`],
    /// amount a whole number in `[MIN_AMOUNT, MAX_AMOUNT]`.
    pub fn generate_at(&mut self, unix_millis: i64) -> Order {
        let item = ITEM_CATALOG[self.rng.random_range(0..ITEM_CATALOG.len())];
        let amount = self.rng.random_range(MIN_AMOUNT..=MAX_AMOUNT);
        let suffix = self.rng.random_range(0..ID_SUFFIX_RANGE);

        Order::new(
            format!("order-{unix_millis}-{suffix}"),
            item,
            f64::from(amount),
        )
    }
}
