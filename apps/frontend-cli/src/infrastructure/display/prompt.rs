//! Startup connection mode prompt.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::infrastructure::feed::ConnectionMode;

/// Ask which feed to join. End of input selects [`ConnectionMode::Auth`].
pub async fn prompt_mode<R, W>(reader: R, out: &mut W) -> io::Result<ConnectionMode>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "Select connection mode:")?;
    writeln!(out, "  1) Authenticated (private channel) - requires JWT token")?;
    writeln!(out, "  2) Public (no auth)")?;
    write!(out, "Choose connection mode (1=auth, 2=public) [1]: ")?;
    out.flush()?;

    let answer = reader.lines().next_line().await?;
    Ok(answer.map_or(ConnectionMode::Auth, |a| ConnectionMode::from_answer(&a)))
}
