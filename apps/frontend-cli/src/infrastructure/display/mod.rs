//! Display Module
//!
//! Console output for the viewer: the startup mode prompt, the order table,
//! and the event loop that redraws it.

mod prompt;
mod table;
mod viewer;

pub use prompt::prompt_mode;
pub use table::{print_title, render_board};
pub use viewer::FeedViewer;
