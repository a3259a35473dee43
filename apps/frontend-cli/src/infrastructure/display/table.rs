//! Order table rendering.

use std::io::{self, Write};

use chrono::{DateTime, Local};
use comfy_table::{Cell, Color, ColumnConstraint, Table, Width, presets::UTF8_FULL};
use crossterm::QueueableCommand;
use crossterm::cursor::MoveTo;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};

use crate::domain::order_board::OrderBoard;

const TITLE: &str = "Real-Time Order Updates Demo";
const HEADERS: [&str; 4] = ["Order ID", "Item", "Amount", "Received At"];
const WIDTHS: [u16; 4] = [20, 30, 10, 20];

/// Clear the screen (when `clears_screen`) and print the title.
pub fn print_title<W: Write>(out: &mut W, clears_screen: bool) -> io::Result<()> {
    if clears_screen {
        clear_screen(out)?;
    }
    writeln!(out, "{}\n", TITLE.green().bold())?;
    out.flush()
}

pub(super) fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
    Ok(())
}

/// Full screen contents for `board` as of `now`.
#[must_use]
pub fn render_board(board: &OrderBoard, now: DateTime<Local>) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(HEADERS.map(|h| Cell::new(h).fg(Color::Cyan)));
    table.set_constraints(
        WIDTHS.map(|w| ColumnConstraint::Absolute(Width::Fixed(w))),
    );

    for entry in board.entries() {
        table.add_row(vec![
            entry.order.id.clone(),
            entry.order.item.clone(),
            entry.order.amount_display(),
            entry.received_at.format("%H:%M:%S").to_string(),
        ]);
    }

    format!(
        "{}\nConnected - {}\n\n{table}\n\nTotal orders received: {}\n",
        TITLE.green().bold(),
        now.format("%Y-%m-%d %H:%M:%S"),
        board.len()
    )
}
