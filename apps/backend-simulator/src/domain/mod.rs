//! Domain Layer
//!
//! Synthetic order generation. No I/O.

pub mod order_generator;
