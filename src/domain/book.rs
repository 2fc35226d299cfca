//! Address book and upcoming-birthday schedule
//!
//! The book keeps records keyed by name in insertion order. Names are
//! unique: adding a second record under a taken name is rejected rather
//! than overwriting the first.
//!
//! ## Upcoming birthdays
//!
//! For each record with a birthday, the next anniversary on or after
//! `today` is found (wrapping into next year when this year's has passed).
//! It is reported when it falls in the half-open window
//! `[today, today + window_days)`. Greetings are never scheduled on a
//! weekend: Saturday and Sunday anniversaries move to the next Monday.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use indexmap::IndexMap;

use super::birthday::Birthday;
use super::error::BookError;
use super::record::Record;

/// Default width of the upcoming-birthday window, in days
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// One entry of the upcoming-birthday schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday {
    pub name: String,
    /// The anniversary itself
    pub birthday: NaiveDate,
    /// When to congratulate, moved off weekends
    pub greeting_date: NaiveDate,
}

/// All contacts, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    data: IndexMap<String, Record>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record under its name
    pub fn add_record(&mut self, record: Record) -> Result<(), BookError> {
        if self.data.contains_key(record.name()) {
            return Err(BookError::DuplicateContact(record.name().to_string()));
        }
        self.data.insert(record.name().to_string(), record);
        Ok(())
    }

    /// Looks up a record by name; surrounding whitespace is ignored like in
    /// [`Record::new`]
    pub fn find(&self, name: &str) -> Option<&Record> {
        self.data.get(name.trim())
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.data.get_mut(name.trim())
    }

    /// Removes a record, keeping the order of the rest
    pub fn delete(&mut self, name: &str) -> Result<Record, BookError> {
        let name = name.trim();
        self.data
            .shift_remove(name)
            .ok_or_else(|| BookError::ContactNotFound(name.to_string()))
    }

    /// Iterates records in insertion order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.data.values()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Lists birthdays in `[today, today + window_days)`, earliest first
    pub fn upcoming_birthdays(&self, today: NaiveDate, window_days: u32) -> Vec<UpcomingBirthday> {
        let mut upcoming: Vec<UpcomingBirthday> = self
            .records()
            .filter_map(|record| {
                let birthday = record.birthday()?;
                let occurrence = next_occurrence(birthday, today)?;

                let delta = (occurrence - today).num_days();
                if delta < 0 || delta >= i64::from(window_days) {
                    return None;
                }

                Some(UpcomingBirthday {
                    name: record.name().to_string(),
                    birthday: occurrence,
                    greeting_date: greeting_date(occurrence)?,
                })
            })
            .collect();

        // Stable: same-day birthdays stay in book order
        upcoming.sort_by_key(|entry| entry.birthday);
        upcoming
    }
}

/// First anniversary of `birthday` on or after `today`
fn next_occurrence(birthday: &Birthday, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = birthday.occurrence_in(today.year())?;
    if this_year < today {
        birthday.occurrence_in(today.year() + 1)
    } else {
        Some(this_year)
    }
}

/// Moves Saturday and Sunday to the following Monday
pub fn greeting_date(date: NaiveDate) -> Option<NaiveDate> {
    let shift = match date.weekday() {
        Weekday::Sat => 2,
        Weekday::Sun => 1,
        _ => 0,
    };
    date.checked_add_days(Days::new(shift))
}
