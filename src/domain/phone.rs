//! Phone number value
//!
//! A phone is stored as exactly ten ASCII digits. Common separators
//! (spaces, `-`, `.`, parentheses) are stripped before validation, so
//! `(099) 123-45-67` and `0991234567` are the same phone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::BookError;

/// Number of digits in a valid phone
pub const PHONE_DIGITS: usize = 10;

const SEPARATORS: [char; 5] = [' ', '-', '.', '(', ')'];

/// Validated, normalized phone number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Validates `raw` and returns its canonical form
    pub fn new(raw: &str) -> Result<Self, BookError> {
        let digits: String = raw
            .trim()
            .chars()
            .filter(|c| !SEPARATORS.contains(c))
            .collect();

        if digits.len() != PHONE_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(BookError::InvalidPhone(raw.trim().to_string()));
        }

        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Phone {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Phone {
    type Error = BookError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}
