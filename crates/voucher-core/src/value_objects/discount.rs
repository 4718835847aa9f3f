//! Discount percentage carried by a voucher

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

/// Whole-number discount percentage in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Discount(u8);

impl Discount {
    pub const MAX: u8 = 100;

    pub fn new(percent: u8) -> Result<Self, DomainError> {
        if percent > Self::MAX {
            return Err(DomainError::InvalidDiscount(percent.to_string()));
        }
        Ok(Self(percent))
    }

    /// Parse form input: digits only (no sign, no `%`), value at most 100.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidDiscount(input.to_string()));
        }
        // long digit strings overflow u8 and are out of range anyway
        let value = input
            .parse::<u8>()
            .map_err(|_| DomainError::InvalidDiscount(input.to_string()))?;
        Self::new(value)
    }

    #[inline]
    pub const fn percent(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i16> for Discount {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| DomainError::InvalidDiscount(value.to_string()))
            .and_then(Self::new)
    }
}

impl From<Discount> for i16 {
    fn from(discount: Discount) -> Self {
        i16::from(discount.0)
    }
}

impl<'de> Deserialize<'de> for Discount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Discount::new(value).map_err(serde::de::Error::custom)
    }
}
