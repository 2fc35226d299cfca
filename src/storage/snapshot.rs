//! JSONL snapshot of the address book
//!
//! Contacts are stored one JSON object per line, in book order:
//!
//! ```text
//! {"name":"Ann","phones":["0991234567"],"birthday":"03.01.1990"}
//! {"name":"Bo","phones":[],"birthday":null}
//! ```
//!
//! Lines are decoded into [`ContactEntry`] and re-validated through the
//! domain constructors, so a hand-edited file can't smuggle an invalid
//! phone into a record. Writes go to a temp file that is renamed over the
//! snapshot, under an exclusive lock.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::{AddressBook, Birthday, Phone, Record};

/// On-disk shape of one contact
///
/// Phones and birthdays are decoded through their validating serde impls,
/// so a malformed value fails the line rather than reaching a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEntry {
    pub name: String,
    #[serde(default)]
    pub phones: Vec<Phone>,
    #[serde(default)]
    pub birthday: Option<Birthday>,
}

impl ContactEntry {
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.name().to_string(),
            phones: record.phones().to_vec(),
            birthday: record.birthday().copied(),
        }
    }

    /// Rebuilds a record; only the name is left to check
    pub fn into_record(self) -> Result<Record> {
        Ok(Record::from_parts(&self.name, self.phones, self.birthday)?)
    }
}

/// Loads and saves the whole address book
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the address book, or an empty one if nothing was saved yet
    pub fn load(&self) -> Result<AddressBook> {
        let mut book = AddressBook::new();

        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no snapshot, starting empty");
            return Ok(book);
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open address book: {}", self.path.display()))?;

        // Acquire shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on address book")?;

        let reader = BufReader::new(&file);

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: ContactEntry = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse contact at line {}", line_num + 1))?;
            let record = entry
                .into_record()
                .with_context(|| format!("Invalid contact at line {}", line_num + 1))?;
            book.add_record(record)
                .with_context(|| format!("Invalid contact at line {}", line_num + 1))?;
        }

        // Lock is released when file is dropped

        tracing::debug!(path = %self.path.display(), contacts = book.len(), "loaded address book");
        Ok(book)
    }

    /// Writes the whole address book (full rewrite)
    pub fn save(&self, book: &AddressBook) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("jsonl.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            // Acquire exclusive lock
            file.lock_exclusive()
                .context("Failed to acquire write lock on address book")?;

            let mut writer = BufWriter::new(&file);

            // Book order is the display order, keep it on disk
            for record in book.records() {
                let line = serde_json::to_string(&ContactEntry::from_record(record))
                    .context("Failed to serialize contact")?;
                writeln!(writer, "{}", line).context("Failed to write contact")?;
            }

            writer.flush().context("Failed to flush address book")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        tracing::debug!(path = %self.path.display(), contacts = book.len(), "saved address book");
        Ok(())
    }
}
