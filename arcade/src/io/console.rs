//! Console abstraction for line-oriented prompts.
//!
//! The [`Console`] trait decouples the session handlers from the terminal.
//! Tests drive sessions through a scripted console that replays canned
//! replies and records everything printed.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Line-oriented console.
pub trait Console {
    /// Print one line of output.
    fn say(&mut self, line: &str);

    /// Show `prompt` and read one line without its trailing newline.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Console backed by the process stdin/stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn say(&mut self, line: &str) {
        println!("{line}");
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(prompt.as_bytes())
            .context("write prompt")?;
        stdout.flush().context("flush prompt")?;

        read_trimmed(&mut io::stdin().lock())
    }
}

/// Read one line from `reader`, dropping the line ending. `None` at end of input.
fn read_trimmed(reader: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line).context("read stdin")? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}
