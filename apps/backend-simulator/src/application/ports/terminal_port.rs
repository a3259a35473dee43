//! Terminal Port
//!
//! Everything the session needs from the operator's console: list choices,
//! free-text and numeric input, a pause, and status lines.

use async_trait::async_trait;

/// Prompt failure.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Input stream reached end of file.
    #[error("input closed")]
    Closed,

    /// Console read or write failed.
    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a status line is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Heading.
    Title,
    /// Neutral information.
    Info,
    /// De-emphasised detail.
    Muted,
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Failure,
    /// Leaving the session.
    Farewell,
}

/// Port for the interactive console.
#[async_trait]
pub trait Terminal: Send {
    /// Pick one of `choices`; returns its index. `default` is used on empty input.
    async fn select(
        &mut self,
        message: &str,
        choices: &[&str],
        default: usize,
    ) -> Result<usize, PromptError>;

    /// Free-text answer; `default` is used on empty input.
    async fn input(&mut self, message: &str, default: &str) -> Result<String, PromptError>;

    /// Numeric answer; `default` is used on empty input.
    async fn number(&mut self, message: &str, default: f64) -> Result<f64, PromptError>;

    /// Wait for the operator to press Enter.
    async fn pause(&mut self, message: &str) -> Result<(), PromptError>;

    /// Print one status line.
    fn notify(&mut self, level: NoticeLevel, text: &str);

    /// Clear the screen before redrawing the menu.
    fn clear(&mut self);
}
