use anyhow::{Context, Result};
use forecast_core::Console;
use inquire::{InquireError, Text};
use std::io::{self, BufRead, Write};

/// Console on the real terminal.
///
/// Prompts go through `inquire`; when stdin is not a TTY (piped input) it falls back to
/// plain line reads so the tool stays scriptable.
#[derive(Debug, Default)]
pub struct TerminalConsole {
    plain: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_plain(&self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}")
            .context("Failed to write prompt")?;
        stdout.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl Console for TerminalConsole {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        if self.plain {
            return self.read_plain(prompt);
        }

        match Text::new(prompt.trim_end()).prompt() {
            Ok(line) => Ok(Some(line)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(InquireError::NotTTY) => {
                tracing::debug!("stdin is not a terminal, using plain line input");
                self.plain = true;
                self.read_plain(prompt)
            }
            Err(err) => Err(err).context("Failed to read terminal input"),
        }
    }

    fn say(&mut self, line: &str) {
        println!("{line}");
    }
}
