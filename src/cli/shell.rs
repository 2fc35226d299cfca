//! Interactive assistant shell
//!
//! Reads one command per line until `close`, `exit` or end of input.
//! Mistakes (unknown commands, bad arguments, missing contacts) are
//! answered in place and never end the session.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use super::router::{self, Command};
use crate::domain::AddressBook;

const PROMPT: &str = "Enter a command: ";

/// Runs the shell over `input`, writing replies to `out`
pub fn run<R: BufRead, W: Write>(
    book: &mut AddressBook,
    input: R,
    mut out: W,
    window_days: u32,
) -> Result<()> {
    writeln!(out, "Welcome to the assistant bot!")?;

    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            writeln!(out, "Good bye!")?;
            break;
        };
        let line = line.context("Failed to read command")?;

        let command = match router::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{}", err)?;
                continue;
            }
        };

        let reply = match router::execute(book, &command, window_days) {
            Ok(reply) => reply.to_text(),
            Err(err) => {
                tracing::debug!(kind = ?err.kind(), error = %err, "command failed");
                router::describe(&err)
            }
        };
        writeln!(out, "{}", reply)?;

        if command == Command::Exit {
            break;
        }
    }

    Ok(())
}
