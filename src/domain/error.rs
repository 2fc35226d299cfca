//! Errors raised by the contact book core

use thiserror::Error;

/// Broad category of a [`BookError`], used by callers to pick a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input was malformed and rejected at construction
    Validation,
    /// A contact or phone lookup came up empty
    NotFound,
    /// A contact with the same name already exists
    Duplicate,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("Invalid phone number '{0}': expected 10 digits")]
    InvalidPhone(String),

    #[error("Invalid birthday '{0}': use DD.MM.YYYY")]
    InvalidBirthday(String),

    #[error("Contact name cannot be empty")]
    EmptyName,

    #[error("Contact not found: {0}")]
    ContactNotFound(String),

    #[error("Phone not found: {0}")]
    PhoneNotFound(String),

    #[error("Contact already exists: {0}")]
    DuplicateContact(String),
}

impl BookError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookError::InvalidPhone(_) | BookError::InvalidBirthday(_) | BookError::EmptyName => {
                ErrorKind::Validation
            }
            BookError::ContactNotFound(_) | BookError::PhoneNotFound(_) => ErrorKind::NotFound,
            BookError::DuplicateContact(_) => ErrorKind::Duplicate,
        }
    }
}
