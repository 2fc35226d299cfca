//! Contact record
//!
//! A record is one contact: a name, its phones in the order they were
//! added, and an optional birthday. All values are validated before they
//! reach the record, so a failed mutation leaves it untouched.

use super::birthday::Birthday;
use super::error::BookError;
use super::phone::Phone;

/// A single contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: String,
    phones: Vec<Phone>,
    birthday: Option<Birthday>,
}

impl Record {
    /// Creates a record with no phones and no birthday
    pub fn new(name: &str) -> Result<Self, BookError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BookError::EmptyName);
        }

        Ok(Self {
            name: name.to_string(),
            phones: Vec::new(),
            birthday: None,
        })
    }

    /// Reassembles a record from values that were already validated
    pub fn from_parts(
        name: &str,
        phones: Vec<Phone>,
        birthday: Option<Birthday>,
    ) -> Result<Self, BookError> {
        let mut record = Self::new(name)?;
        record.phones = phones;
        record.birthday = birthday;
        Ok(record)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    /// Validates and appends a phone
    pub fn add_phone(&mut self, raw: &str) -> Result<(), BookError> {
        let phone = Phone::new(raw)?;
        self.phones.push(phone);
        Ok(())
    }

    /// Finds a phone equal to the canonical form of `raw`
    pub fn find_phone(&self, raw: &str) -> Option<&Phone> {
        self.position_of(raw).map(|idx| &self.phones[idx])
    }

    /// Replaces the first phone matching `old` with `new`, keeping its position
    pub fn edit_phone(&mut self, old: &str, new: &str) -> Result<(), BookError> {
        let idx = self
            .position_of(old)
            .ok_or_else(|| BookError::PhoneNotFound(old.trim().to_string()))?;
        self.phones[idx] = Phone::new(new)?;
        Ok(())
    }

    /// Removes the first phone matching `raw`
    pub fn remove_phone(&mut self, raw: &str) -> Result<Phone, BookError> {
        let idx = self
            .position_of(raw)
            .ok_or_else(|| BookError::PhoneNotFound(raw.trim().to_string()))?;
        Ok(self.phones.remove(idx))
    }

    /// Sets the birthday, replacing any earlier one
    pub fn add_birthday(&mut self, raw: &str) -> Result<(), BookError> {
        self.birthday = Some(Birthday::new(raw)?);
        Ok(())
    }

    fn position_of(&self, raw: &str) -> Option<usize> {
        // A malformed lookup value can't match a stored phone
        let wanted = Phone::new(raw).ok()?;
        self.phones.iter().position(|p| *p == wanted)
    }
}
