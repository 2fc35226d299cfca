//! Contact Book - a personal contact directory with birthday reminders
//!
//! Contacts have a unique name, any number of phones and an optional
//! birthday. The book answers exact-name lookups and lists whom to
//! congratulate in the coming days, moving weekend greetings to Monday.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{AddressBook, Birthday, BookError, ErrorKind, Phone, Record, UpcomingBirthday};
