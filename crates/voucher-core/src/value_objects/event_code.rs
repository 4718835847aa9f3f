//! Event codes: `ATK-` followed by a zero-padded sequence number
//!
//! Codes are assigned as `max(existing) + 1` and padded to at least three
//! digits (`ATK-001`, `ATK-042`, `ATK-1000`).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// Canonical event code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventCode(u32);

impl EventCode {
    pub const PREFIX: &'static str = "ATK-";
    pub const MIN_WIDTH: usize = 3;

    /// The code given to the first event ever created.
    pub const FIRST: EventCode = EventCode(1);

    pub fn from_number(number: u32) -> Self {
        Self(number)
    }

    /// Parse a code in canonical form. Non-canonical spellings such as
    /// `ATK-0001` or `atk-001` are rejected so that each event has exactly
    /// one textual code.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidEventCode(input.to_string());

        let digits = input.strip_prefix(Self::PREFIX).ok_or_else(invalid)?;
        if digits.len() < Self::MIN_WIDTH || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number = digits.parse::<u32>().map_err(|_| invalid())?;
        let code = Self(number);
        if code.to_string() != input {
            return Err(invalid());
        }
        Ok(code)
    }

    #[inline]
    pub const fn number(self) -> u32 {
        self.0
    }

    /// Next code after the highest existing one, or `ATK-001` when there is none.
    pub fn next_after(max_existing: Option<u32>) -> Self {
        match max_existing {
            Some(n) => Self(n.saturating_add(1)),
            None => Self::FIRST,
        }
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:0width$}", Self::PREFIX, self.0, width = Self::MIN_WIDTH)
    }
}

impl std::str::FromStr for EventCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for EventCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EventCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
