//! Main CLI application structure

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::router::{self, Command};
use super::shell;
use crate::storage::{Config, SnapshotStore};

#[derive(Parser)]
#[command(name = "contacts")]
#[command(author, version, about = "Personal contact book with birthday reminders")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Address book file
    #[arg(long, global = true, env = "CONTACT_BOOK")]
    pub book: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true, env = "CONTACT_BOOK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a contact, or add a phone to an existing one
    Add {
        /// Contact name
        name: String,

        /// Phone number (10 digits)
        phone: Option<String>,
    },

    /// Replace one of a contact's phones
    Change {
        /// Contact name
        name: String,

        /// Phone to replace
        old: String,

        /// New phone
        new: String,
    },

    /// Show a contact's phones
    Phone {
        /// Contact name
        name: String,
    },

    /// List all contacts
    All,

    /// Set a contact's birthday
    AddBirthday {
        /// Contact name
        name: String,

        /// Birthday as DD.MM.YYYY
        birthday: String,
    },

    /// Show a contact's birthday
    ShowBirthday {
        /// Contact name
        name: String,
    },

    /// Show whom to congratulate in the coming days
    Birthdays {
        /// Window size in days (defaults to the configured window)
        #[arg(long)]
        days: Option<u32>,

        /// Reference date as DD.MM.YYYY (defaults to today)
        #[arg(long, value_parser = router::parse_today)]
        today: Option<NaiveDate>,
    },

    /// Delete a contact
    Delete {
        /// Contact name
        name: String,
    },

    /// Remove one of a contact's phones
    RemovePhone {
        /// Contact name
        name: String,

        /// Phone to remove
        phone: String,
    },

    /// Start the interactive assistant
    Shell,

    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

impl Commands {
    /// Maps a one-shot subcommand to a router command
    fn into_command(self) -> Option<Command> {
        let command = match self {
            Commands::Add { name, phone } => Command::Add { name, phone },
            Commands::Change { name, old, new } => Command::Change { name, old, new },
            Commands::Phone { name } => Command::Phone { name },
            Commands::All => Command::All,
            Commands::AddBirthday { name, birthday } => Command::AddBirthday { name, birthday },
            Commands::ShowBirthday { name } => Command::ShowBirthday { name },
            Commands::Birthdays { days, today } => Command::Birthdays { days, today },
            Commands::Delete { name } => Command::Delete { name },
            Commands::RemovePhone { name, phone } => Command::RemovePhone { name, phone },
            Commands::Shell | Commands::Config { .. } => return None,
        };
        Some(command)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let output = Output::new(cli.format.unwrap_or(config.default_format));
    let store = SnapshotStore::new(config.book_path(cli.book.as_deref()));
    tracing::debug!(book = %store.path().display(), "contacts starting");

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => run_shell(&store, &config)?,
        Commands::Config { init } => show_config(&output, &config, &store, cli.config.as_deref(), init)?,
        other => {
            if let Some(command) = other.into_command() {
                run_once(&output, &store, &config, &command)?;
            }
        }
    }

    tracing::debug!("command completed successfully");
    Ok(())
}

/// Runs the interactive shell, saving the book once when it ends
fn run_shell(store: &SnapshotStore, config: &Config) -> Result<()> {
    let mut book = store.load()?;

    let stdin = io::stdin();
    let result = shell::run(
        &mut book,
        stdin.lock(),
        io::stdout().lock(),
        config.birthday_window_days,
    );

    // Save even when the shell failed, then report the first error
    let saved = store.save(&book);
    result?;
    saved
}

/// Runs a single command, saving the book if it changed
fn run_once(output: &Output, store: &SnapshotStore, config: &Config, command: &Command) -> Result<()> {
    let mut book = store.load()?;

    let reply = router::execute(&mut book, command, config.birthday_window_days).map_err(|err| {
        tracing::debug!(kind = ?err.kind(), error = %err, "command failed");
        anyhow::anyhow!(router::describe(&err))
    })?;

    if command.is_mutation() {
        store.save(&book)?;
    }

    output.reply(&reply);
    Ok(())
}

fn show_config(
    output: &Output,
    config: &Config,
    store: &SnapshotStore,
    config_path: Option<&Path>,
    init: bool,
) -> Result<()> {
    let path = config_path.map(Path::to_path_buf).or_else(Config::default_path);

    if init {
        match &path {
            Some(path) if path.exists() => {
                output.success(&format!("Config already exists at {}", path.display()));
            }
            Some(path) => {
                config.save(path)?;
                output.success(&format!("Wrote default config to {}", path.display()));
            }
            None => anyhow::bail!("Could not determine config directory"),
        }
        return Ok(());
    }

    let config_file = path.map(|p| p.display().to_string());
    if output.is_json() {
        output.data(&serde_json::json!({
            "config_file": config_file,
            "book_path": store.path().display().to_string(),
            "birthday_window_days": config.birthday_window_days,
            "default_format": config.default_format,
        }));
    } else {
        println!("config file:          {}", config_file.as_deref().unwrap_or("(none)"));
        println!("book path:            {}", store.path().display());
        println!("birthday window days: {}", config.birthday_window_days);
        println!(
            "default format:       {}",
            match config.default_format {
                OutputFormat::Text => "text",
                OutputFormat::Json => "json",
            }
        );
    }

    Ok(())
}
