//! Line-based console terminal.

use std::io::{self, IsTerminal, Stdout, Write};

use async_trait::async_trait;
use crossterm::QueueableCommand;
use crossterm::cursor::MoveTo;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::application::ports::{NoticeLevel, PromptError, Terminal};

/// [`Terminal`] over a line reader and a writer.
pub struct ConsoleTerminal<R = BufReader<Stdin>, W = Stdout> {
    lines: Lines<R>,
    out: W,
    clears_screen: bool,
}

impl ConsoleTerminal<BufReader<Stdin>, Stdout> {
    /// Terminal on the process's stdin and stdout.
    ///
    /// The screen is only cleared when stdout is a TTY.
    #[must_use]
    pub fn stdio() -> Self {
        let stdout = io::stdout();
        let clears_screen = stdout.is_terminal();
        Self::new(BufReader::new(tokio::io::stdin()), stdout, clears_screen)
    }
}

impl<R, W> ConsoleTerminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    /// Terminal over arbitrary streams.
    pub fn new(reader: R, out: W, clears_screen: bool) -> Self {
        Self {
            lines: reader.lines(),
            out,
            clears_screen,
        }
    }

    /// Consume the terminal, returning the writer.
    pub fn into_writer(self) -> W {
        self.out
    }

    async fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.out, "{} {prompt} ", "?".green())?;
        self.out.flush()?;

        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(PromptError::Closed),
        }
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
        self.out.flush()
    }

    fn hint(&mut self, text: &str) -> Result<(), PromptError> {
        writeln!(self.out, "{}", text.red())?;
        Ok(())
    }
}

#[async_trait]
impl<R, W> Terminal for ConsoleTerminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn select(
        &mut self,
        message: &str,
        choices: &[&str],
        default: usize,
    ) -> Result<usize, PromptError> {
        let default = default.min(choices.len().saturating_sub(1));

        writeln!(self.out, "{} {}", "?".green(), message.bold())?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.out, "  {}) {choice}", i + 1)?;
        }

        loop {
            let prompt = format!("Choose [1-{}] ({}):", choices.len(), default + 1);
            let answer = self.ask(&prompt).await?;
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
                _ => {
                    let hint = format!("Please enter a number between 1 and {}", choices.len());
                    self.hint(&hint)?;
                }
            }
        }
    }

    async fn input(&mut self, message: &str, default: &str) -> Result<String, PromptError> {
        let answer = self.ask(&format!("{message} ({default})")).await?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    async fn number(&mut self, message: &str, default: f64) -> Result<f64, PromptError> {
        loop {
            let answer = self.ask(&format!("{message} ({default})")).await?;
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse::<f64>() {
                Ok(value) if value.is_finite() => return Ok(value),
                _ => self.hint("Please enter a number")?,
            }
        }
    }

    async fn pause(&mut self, message: &str) -> Result<(), PromptError> {
        self.ask(message).await.map(|_| ())
    }

    fn notify(&mut self, level: NoticeLevel, text: &str) {
        let result = match level {
            NoticeLevel::Title => writeln!(self.out, "{}", text.blue().bold()),
            NoticeLevel::Info => writeln!(self.out, "{text}"),
            NoticeLevel::Muted => writeln!(self.out, "{}", text.dark_grey()),
            NoticeLevel::Success => writeln!(self.out, "{}", text.green()),
            NoticeLevel::Failure => writeln!(self.out, "{}", text.red()),
            NoticeLevel::Farewell => writeln!(self.out, "{}", text.yellow()),
        };
        if let Err(e) = result.and_then(|()| self.out.flush()) {
            tracing::debug!(error = %e, "Console write failed");
        }
    }

    fn clear(&mut self) {
        if !self.clears_screen {
            return;
        }
        if let Err(e) = self.clear_screen() {
            tracing::debug!(error = %e, "Console clear failed");
        }
    }
}
