//! Line-oriented console with bounded re-prompting.

use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::warn;

/// Attempts allowed per prompt before returning to the main menu.
pub const MAX_ATTEMPTS: usize = 3;

pub struct Console<R, W> {
    input: R,
    out: W,
    eof: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self {
            input,
            out,
            eof: false,
        }
    }

    /// `true` once stdin has been exhausted.
    pub fn at_eof(&self) -> bool {
        self.eof
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.out, "{text}").context("failed to write to output")
    }

    pub fn success(&mut self, text: impl Display) -> Result<()> {
        let line = format!("✓ {text}");
        self.say(line.as_str().green())
    }

    pub fn error(&mut self, text: impl Display) -> Result<()> {
        let line = text.to_string();
        self.say(line.as_str().red())
    }

    pub fn heading(&mut self, text: impl Display) -> Result<()> {
        let line = text.to_string();
        self.say(line.as_str().bold())
    }

    /// Prints `label` and reads one line without its terminator.
    /// Returns `None` at end of input.
    pub fn read_line(&mut self, label: &str) -> Result<Option<String>> {
        if self.eof {
            return Ok(None);
        }
        write!(self.out, "{label}").context("failed to write prompt")?;
        self.out.flush().context("failed to flush output")?;

        let mut buf = String::new();
        let read = self
            .input
            .read_line(&mut buf)
            .context("failed to read input")?;
        if read == 0 {
            self.eof = true;
            writeln!(self.out).context("failed to write to output")?;
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_owned()))
    }

    /// Reads until `parse` accepts the trimmed input, at most [`MAX_ATTEMPTS`]
    /// times. Each rejection prints the message `parse` returned.
    ///
    /// Returns `None` when input ends or the attempts run out.
    pub fn ask<T>(
        &mut self,
        label: &str,
        mut parse: impl FnMut(&str) -> std::result::Result<T, String>,
    ) -> Result<Option<T>> {
        for attempt in 1..=MAX_ATTEMPTS {
            let Some(line) = self.read_line(label)? else {
                return Ok(None);
            };
            match parse(line.trim()) {
                Ok(value) => return Ok(Some(value)),
                Err(message) => {
                    warn!(attempt, input = %line, reason = %message, "input rejected");
                    self.error(message)?;
                }
            }
        }
        self.error("Too many invalid attempts.")?;
        Ok(None)
    }

    /// Free-text prompt; any line, including an empty one, is accepted.
    pub fn ask_text(&mut self, label: &str) -> Result<Option<String>> {
        Ok(self.read_line(label)?.map(|s| s.trim().to_owned()))
    }
}
