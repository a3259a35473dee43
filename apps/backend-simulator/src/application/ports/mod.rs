//! Port Interfaces
//!
//! ## Driven Ports (Outbound)
//!
//! - `OrderPublisher`: delivers one order to the relay's private or public endpoint
//!
//! ## Driver Ports (Inbound)
//!
//! - `Terminal`: prompts the operator and shows results

mod publisher_port;
mod terminal_port;

pub use publisher_port::{OrderPublisher, PublishOutcome, PublishTarget};
pub use terminal_port::{NoticeLevel, PromptError, Terminal};
