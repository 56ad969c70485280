//! Terminal input and output behind a small trait, so the session loop can be
//! driven by a script in tests.

use async_trait::async_trait;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use inquire::{InquireError, Text};
use std::{
    io::{self, BufRead, IsTerminal, Write},
    time::Duration,
};

/// What came back from a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// The user pressed Ctrl-C.
    Interrupted,
    /// Input is exhausted or unreadable.
    Closed,
}

#[async_trait]
pub trait Console: Send {
    async fn read_line(&mut self, prompt: &str) -> Input;

    fn show(&mut self, text: &str);

    /// Print `text` followed by a growing run of dots, one frame per `delay`.
    async fn animate(&mut self, text: &str, frames: usize, delay: Duration);

    async fn sleep(&mut self, delay: Duration);

    fn clear(&mut self);
}

#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Console for TerminalConsole {
    async fn read_line(&mut self, prompt: &str) -> Input {
        let prompt = prompt.to_owned();

        // Both readers block; keep them off the runtime threads.
        tokio::task::spawn_blocking(move || {
            if io::stdin().is_terminal() {
                prompt_tty(&prompt)
            } else {
                read_piped(io::stdin().lock(), io::stdout(), &prompt)
            }
        })
        .await
        .unwrap_or(Input::Closed)
    }

    fn show(&mut self, text: &str) {
        println!("{text}");
    }

    async fn animate(&mut self, text: &str, frames: usize, delay: Duration) {
        let mut stdout = io::stdout();
        for i in 0..frames {
            let dots = ".".repeat(i % 3 + 1);
            let _ = write!(stdout, "\r{text}{dots}  ");
            let _ = stdout.flush();
            tokio::time::sleep(delay).await;
        }
        println!();
    }

    async fn sleep(&mut self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }

    fn clear(&mut self) {
        // Cosmetic only.
        let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
    }
}

fn prompt_tty(prompt: &str) -> Input {
    match Text::new(prompt).prompt() {
        Ok(line) => Input::Line(line),
        Err(InquireError::OperationInterrupted) => Input::Interrupted,
        // Esc clears the line rather than leaving the app.
        Err(InquireError::OperationCanceled) => Input::Line(String::new()),
        Err(err) => {
            tracing::warn!(%err, "prompt failed");
            Input::Closed
        }
    }
}

fn read_piped(mut reader: impl BufRead, mut out: impl Write, prompt: &str) -> Input {
    let _ = write!(out, "{prompt} ");
    let _ = out.flush();

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => Input::Closed,
        Ok(_) => Input::Line(line),
        Err(err) => {
            tracing::warn!(%err, "failed to read stdin");
            Input::Closed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piped_read_echoes_only_the_prompt() {
        let mut out = Vec::new();
        let input = read_piped("paris\n".as_bytes(), &mut out, "City:");

        assert_eq!(input, Input::Line("paris\n".to_string()));
        assert_eq!(String::from_utf8(out).unwrap(), "City: ");
    }

    #[test]
    fn piped_read_reports_end_of_input() {
        let mut out = Vec::new();
        assert_eq!(read_piped("".as_bytes(), &mut out, "City:"), Input::Closed);
    }
}
