//! Feed event loop.

use std::io::{self, IsTerminal, Stdout, Write};

use chrono::{DateTime, Local};
use crossterm::style::Stylize;
use tokio::sync::mpsc;

use super::table::{clear_screen, render_board};
use crate::domain::order_board::OrderBoard;
use crate::infrastructure::feed::FeedEvent;

/// Consumes [`FeedEvent`]s and keeps the order table on screen.
pub struct FeedViewer<W = Stdout> {
    board: OrderBoard,
    out: W,
    clears_screen: bool,
}

impl FeedViewer<Stdout> {
    /// Viewer on stdout; redraws clear the screen only on a TTY.
    #[must_use]
    pub fn stdout() -> Self {
        let stdout = io::stdout();
        let clears_screen = stdout.is_terminal();
        Self::new(stdout, clears_screen)
    }
}

impl<W: Write> FeedViewer<W> {
    /// Viewer over an arbitrary writer.
    pub const fn new(out: W, clears_screen: bool) -> Self {
        Self {
            board: OrderBoard::new(),
            out,
            clears_screen,
        }
    }

    /// Orders shown so far.
    pub const fn board(&self) -> &OrderBoard {
        &self.board
    }

    /// Consume the viewer, returning the writer.
    pub fn into_writer(self) -> W {
        self.out
    }

    /// Handle events until every sender is gone.
    pub async fn run(mut self, mut events: mpsc::Receiver<FeedEvent>) -> Self {
        while let Some(event) = events.recv().await {
            if let Err(e) = self.handle(event, Local::now()) {
                tracing::debug!(error = %e, "Console write failed");
            }
        }
        self
    }

    /// Apply one event, stamping any orders with `now`.
    pub fn handle(&mut self, event: FeedEvent, now: DateTime<Local>) -> io::Result<()> {
        match event {
            FeedEvent::Connected => {
                writeln!(self.out, "{}", "Connected to WebSocket server".green())?;
                writeln!(self.out, "{}", "Waiting for order updates...".dark_grey())?;
            }
            FeedEvent::Orders(orders) => {
                self.board.record(orders, now);
                if self.clears_screen {
                    clear_screen(&mut self.out)?;
                }
                write!(self.out, "{}", render_board(&self.board, now))?;
            }
            FeedEvent::ParseError(e) => {
                writeln!(self.out, "{}", format!("Error parsing message: {e}").red())?;
            }
            FeedEvent::Error(e) => {
                writeln!(self.out, "{}", format!("WebSocket error: {e}").red())?;
            }
            FeedEvent::Closed => {
                writeln!(self.out, "{}", "WebSocket connection closed".yellow())?;
            }
        }
        self.out.flush()
    }
}
