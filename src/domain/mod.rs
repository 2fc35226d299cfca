//! Domain models for the contact book
//!
//! Contains the core business logic without any I/O concerns.

mod error;
mod phone;
mod birthday;
mod record;
mod book;

pub use error::{BookError, ErrorKind};
pub use phone::{Phone, PHONE_DIGITS};
pub use birthday::{format_date, parse_date, Birthday};
pub use record::Record;
pub use book::{greeting_date, AddressBook, UpcomingBirthday, DEFAULT_WINDOW_DAYS};
