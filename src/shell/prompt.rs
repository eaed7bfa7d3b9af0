use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::helpers::{status_line, StatusKind};
use crate::error::ShellError;

/// Format accepted for trip dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Line-oriented terminal I/O. Holds the input and output streams so the shell
/// can be driven by stdin/stdout or by scripted buffers in tests.
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    pub(crate) fn into_output(self) -> W {
        self.output
    }

    pub(crate) fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}").context("failed to write output")
    }

    pub(crate) fn status(&mut self, kind: StatusKind, text: &str) -> Result<()> {
        let line = status_line(kind, text, self.color);
        self.say(&line)
    }

    /// Print `label` and read one answer, trimmed. Fails with
    /// [`ShellError::InputClosed`] at end of input.
    pub(crate) fn prompt_text(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            return Err(ShellError::InputClosed.into());
        }
        Ok(line.trim().to_string())
    }

    /// Keep asking until the answer parses as `T`.
    pub(crate) fn prompt_parsed<T: FromStr>(&mut self, label: &str, expected: &str) -> Result<T> {
        loop {
            let answer = self.prompt_text(label)?;
            match answer.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => self.status(
                    StatusKind::Error,
                    &format!("`{answer}` is not {expected}, please try again."),
                )?,
            }
        }
    }

    pub(crate) fn prompt_id(&mut self, label: &str) -> Result<i64> {
        self.prompt_parsed(label, "a valid ID")
    }

    pub(crate) fn prompt_passengers(&mut self, label: &str) -> Result<u32> {
        self.prompt_parsed(label, "a whole number of passengers")
    }

    pub(crate) fn prompt_date(&mut self, label: &str) -> Result<NaiveDate> {
        loop {
            let answer = self.prompt_text(label)?;
            match NaiveDate::parse_from_str(&answer, DATE_FORMAT) {
                Ok(date) => return Ok(date),
                Err(_) => self.status(
                    StatusKind::Error,
                    &format!("`{answer}` is not a date in YYYY-MM-DD form, please try again."),
                )?,
            }
        }
    }
}
