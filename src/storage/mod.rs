//! # Storage Layer
//!
//! Persistence for the contact book.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Contacts | JSONL (one contact per line) | `<data dir>/contacts.jsonl` or `--book` |
//! | Config | TOML | `<config dir>/config.toml` or `--config` |
//!
//! The snapshot is read once when a session starts and written once when
//! it ends. Writes are atomic (temp file + rename) and locked with `fs2`.

mod snapshot;
mod config;

pub use snapshot::{ContactEntry, SnapshotStore};
pub use config::{Config, ConfigError, OutputFormat, BOOK_FILE};
