//! # Command-Line Interface
//!
//! User-facing commands, the interactive shell and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `add <name> [phone]` | Create a contact or add a phone to it |
//! | `change <name> <old> <new>` | Replace a phone |
//! | `phone <name>` | Show a contact's phones |
//! | `all` | List every contact |
//! | `add-birthday <name> <DD.MM.YYYY>` | Set a birthday |
//! | `show-birthday <name>` | Show a birthday |
//! | `birthdays` | Whom to congratulate in the next days |
//! | `delete <name>`, `remove-phone <name> <phone>` | Remove data |
//! | `shell` (default) | Interactive assistant using the same words |
//!
//! ## Output Formats
//!
//! One-shot commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug logs on stderr; `RUST_LOG`
//! overrides the level.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod router;
mod shell;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
pub use router::{describe, execute, parse_line, Command, ParseError, Reply};
pub use shell::run as run_shell;
