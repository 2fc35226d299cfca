//! Command routing
//!
//! Both the interactive shell and the one-shot subcommands end up here:
//! a [`Command`] is executed against the address book and produces a
//! [`Reply`]. Core errors come back as [`BookError`] and are turned into
//! user text by [`describe`]; the core itself never formats messages.

use chrono::{Local, NaiveDate};
use serde_json::json;
use thiserror::Error;

use crate::domain::{format_date, parse_date, AddressBook, BookError, Record, UpcomingBirthday};
use crate::storage::ContactEntry;

/// A parsed user command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hello,
    Exit,
    Add {
        name: String,
        phone: Option<String>,
    },
    Change {
        name: String,
        old: String,
        new: String,
    },
    Phone {
        name: String,
    },
    All,
    AddBirthday {
        name: String,
        birthday: String,
    },
    ShowBirthday {
        name: String,
    },
    Birthdays {
        days: Option<u32>,
        today: Option<NaiveDate>,
    },
    Delete {
        name: String,
    },
    RemovePhone {
        name: String,
        phone: String,
    },
}

impl Command {
    /// Returns true if the command can change the address book
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::Add { .. }
                | Command::Change { .. }
                | Command::AddBirthday { .. }
                | Command::Delete { .. }
                | Command::RemovePhone { .. }
        )
    }
}

/// Errors from parsing a shell line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid command.")]
    Unknown(String),

    #[error("{0}")]
    Usage(&'static str),
}

/// Parses one shell line; blank lines yield `None`
///
/// The command word is case-insensitive, arguments are split on
/// whitespace and extra arguments are ignored.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let args: Vec<String> = words.map(str::to_string).collect();
    let arg = |idx: usize, usage: &'static str| -> Result<String, ParseError> {
        args.get(idx).cloned().ok_or(ParseError::Usage(usage))
    };

    let command = match word.to_lowercase().as_str() {
        "hello" => Command::Hello,
        "close" | "exit" => Command::Exit,
        "add" => Command::Add {
            name: arg(0, "Usage: add <name> [phone]")?,
            phone: args.get(1).cloned(),
        },
        "change" => {
            const USAGE: &str = "Usage: change <name> <old phone> <new phone>";
            Command::Change {
                name: arg(0, USAGE)?,
                old: arg(1, USAGE)?,
                new: arg(2, USAGE)?,
            }
        }
        "phone" => Command::Phone {
            name: arg(0, "Usage: phone <name>")?,
        },
        "all" => Command::All,
        "add-birthday" => {
            const USAGE: &str = "Usage: add-birthday <name> <DD.MM.YYYY>";
            Command::AddBirthday {
                name: arg(0, USAGE)?,
                birthday: arg(1, USAGE)?,
            }
        }
        "show-birthday" => Command::ShowBirthday {
            name: arg(0, "Usage: show-birthday <name>")?,
        },
        "birthdays" => {
            let days = match args.first() {
                Some(raw) => Some(
                    raw.parse::<u32>()
                        .map_err(|_| ParseError::Usage("Usage: birthdays [days]"))?,
                ),
                None => None,
            };
            Command::Birthdays { days, today: None }
        }
        "delete" => Command::Delete {
            name: arg(0, "Usage: delete <name>")?,
        },
        "remove-phone" => {
            const USAGE: &str = "Usage: remove-phone <name> <phone>";
            Command::RemovePhone {
                name: arg(0, USAGE)?,
                phone: arg(1, USAGE)?,
            }
        }
        other => return Err(ParseError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

/// Parses a `--today` value
pub fn parse_today(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw.trim()).ok_or_else(|| format!("expected DD.MM.YYYY, got '{}'", raw))
}

/// Result of a command, rendered as text or JSON by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Message(String),
    Phones {
        name: String,
        phones: Vec<String>,
    },
    Contacts(Vec<ContactEntry>),
    Birthday {
        name: String,
        birthday: Option<String>,
    },
    Upcoming(Vec<UpcomingBirthday>),
}

impl Reply {
    fn message(text: &str) -> Self {
        Reply::Message(text.to_string())
    }

    pub fn to_text(&self) -> String {
        match self {
            Reply::Message(text) => text.clone(),
            Reply::Phones { name, phones } => {
                if phones.is_empty() {
                    format!("The contact \"{}\" has no phones.", name)
                } else {
                    phones.join("\n")
                }
            }
            Reply::Contacts(entries) => {
                if entries.is_empty() {
                    return "The address book is empty.".to_string();
                }
                entries
                    .iter()
                    .map(|e| {
                        let phones: Vec<&str> = e.phones.iter().map(|p| p.as_str()).collect();
                        format!("{}: {}", e.name, phones.join(", "))
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Reply::Birthday { birthday, .. } => birthday
                .clone()
                .unwrap_or_else(|| "Contact date of birth is not specified.".to_string()),
            Reply::Upcoming(entries) => {
                if entries.is_empty() {
                    return "No upcoming birthdays.".to_string();
                }
                entries
                    .iter()
                    .map(|e| format!("{}: {}", e.name, format_date(e.greeting_date)))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Reply::Message(text) => json!({ "success": true, "message": text }),
            Reply::Phones { name, phones } => json!({ "name": name, "phones": phones }),
            Reply::Contacts(entries) => json!(entries),
            Reply::Birthday { name, birthday } => json!({ "name": name, "birthday": birthday }),
            Reply::Upcoming(entries) => {
                let items: Vec<_> = entries
                    .iter()
                    .map(|e| {
                        json!({
                            "name": e.name,
                            "birthday": format_date(e.birthday),
                            "greeting_date": format_date(e.greeting_date),
                        })
                    })
                    .collect();
                json!(items)
            }
        }
    }
}

/// Runs a command against the book
///
/// `window_days` is used by `birthdays` when the command has no explicit
/// window.
pub fn execute(
    book: &mut AddressBook,
    command: &Command,
    window_days: u32,
) -> Result<Reply, BookError> {
    tracing::debug!(?command, "executing command");

    match command {
        Command::Hello => Ok(Reply::message("How can I help you?")),
        Command::Exit => Ok(Reply::message("Good bye!")),

        Command::Add { name, phone } => match book.find_mut(name) {
            Some(record) => {
                if let Some(phone) = phone {
                    record.add_phone(phone)?;
                }
                Ok(Reply::message("Contact updated."))
            }
            None => {
                let mut record = Record::new(name)?;
                if let Some(phone) = phone {
                    record.add_phone(phone)?;
                }
                book.add_record(record)?;
                Ok(Reply::message("Contact added."))
            }
        },

        Command::Change { name, old, new } => {
            find_mut(book, name)?.edit_phone(old, new)?;
            Ok(Reply::message("Contact updated."))
        }

        Command::Phone { name } => {
            let record = find(book, name)?;
            Ok(Reply::Phones {
                name: record.name().to_string(),
                phones: record.phones().iter().map(|p| p.to_string()).collect(),
            })
        }

        Command::All => Ok(Reply::Contacts(
            book.records().map(ContactEntry::from_record).collect(),
        )),

        Command::AddBirthday { name, birthday } => {
            find_mut(book, name)?.add_birthday(birthday)?;
            Ok(Reply::message("Contact birthday added."))
        }

        Command::ShowBirthday { name } => {
            let record = find(book, name)?;
            Ok(Reply::Birthday {
                name: record.name().to_string(),
                birthday: record.birthday().map(|b| b.to_string()),
            })
        }

        Command::Birthdays { days, today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let window = days.unwrap_or(window_days);
            Ok(Reply::Upcoming(book.upcoming_birthdays(today, window)))
        }

        Command::Delete { name } => {
            book.delete(name)?;
            Ok(Reply::message("Contact deleted."))
        }

        Command::RemovePhone { name, phone } => {
            find_mut(book, name)?.remove_phone(phone)?;
            Ok(Reply::message("Phone removed."))
        }
    }
}

fn find<'a>(book: &'a AddressBook, name: &str) -> Result<&'a Record, BookError> {
    book.find(name)
        .ok_or_else(|| BookError::ContactNotFound(name.trim().to_string()))
}

fn find_mut<'a>(book: &'a mut AddressBook, name: &str) -> Result<&'a mut Record, BookError> {
    book.find_mut(name)
        .ok_or_else(|| BookError::ContactNotFound(name.trim().to_string()))
}

/// Turns a core error into the text shown to the user
pub fn describe(err: &BookError) -> String {
    match err {
        BookError::ContactNotFound(name) => format!("Contact \"{}\" does not exist.", name),
        BookError::PhoneNotFound(phone) => format!("Phone \"{}\" does not exist.", phone),
        other => other.to_string(),
    }
}
