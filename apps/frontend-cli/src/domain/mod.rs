//! Domain Layer - Viewer state.

/// Orders received so far.
pub mod order_board;
