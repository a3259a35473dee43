//! Console Adapter
//!
//! Line-oriented implementation of the terminal port over any async reader
//! and blocking writer (stdin/stdout in the binary, byte buffers in tests).

mod terminal;

pub use terminal::ConsoleTerminal;
