//! Application Layer - Ports and the menu session.

/// Port interfaces for publishing orders and talking to the operator.
pub mod ports;

/// Menu state machine driving one interactive session.
pub mod session;
