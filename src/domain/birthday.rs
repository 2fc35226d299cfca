//! Birthday value
//!
//! Birthdays are written as `DD.MM.YYYY` (e.g. `06.01.1990`). Only that
//! exact shape is accepted, which keeps `Display` a faithful round-trip of
//! the input.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::BookError;

/// Parses a `DD.MM.YYYY` date, returning `None` for any other shape or an
/// impossible calendar date
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'.' || bytes[5] != b'.' {
        return None;
    }

    let digits = |range: std::ops::Range<usize>| -> Option<u32> {
        let part = raw.get(range)?;
        if part.bytes().all(|b| b.is_ascii_digit()) {
            part.parse().ok()
        } else {
            None
        }
    };

    let day = digits(0..2)?;
    let month = digits(3..5)?;
    let year = digits(6..10)?;

    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Renders a date as `DD.MM.YYYY`
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02}.{:02}.{:04}", date.day(), date.month(), date.year())
}

/// Validated date of birth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday(NaiveDate);

impl Birthday {
    /// Parses a `DD.MM.YYYY` birthday
    pub fn new(raw: &str) -> Result<Self, BookError> {
        let raw = raw.trim();
        parse_date(raw)
            .map(Self)
            .ok_or_else(|| BookError::InvalidBirthday(raw.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Returns `(month, day)`; the year plays no part in recurrence
    pub fn month_day(&self) -> (u32, u32) {
        (self.0.month(), self.0.day())
    }

    /// Returns the anniversary of this birthday in `year`
    ///
    /// A Feb 29 birthday is celebrated on Feb 28 in non-leap years.
    pub fn occurrence_in(&self, year: i32) -> Option<NaiveDate> {
        let (month, day) = self.month_day();
        NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
            if (month, day) == (2, 29) {
                NaiveDate::from_ymd_opt(year, 2, 28)
            } else {
                None
            }
        })
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_date(self.0))
    }
}

impl FromStr for Birthday {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Birthday {
    type Error = BookError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Birthday> for String {
    fn from(birthday: Birthday) -> Self {
        birthday.to_string()
    }
}
