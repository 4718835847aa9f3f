//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Voucher forms use camelCase keys, matching the QR payload.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};
use voucher_core::{Discount, EventCode};

// ============================================================================
// Field rules
// ============================================================================

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Required, and no digits anywhere in the name
fn validate_person_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(field_error("required", "Name is required"));
    }
    if name.chars().any(|c| c.is_ascii_digit()) {
        return Err(field_error("name_digits", "Name must not contain numbers"));
    }
    Ok(())
}

/// 10 to 13 ASCII digits, nothing else
fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    let digits_only = phone.bytes().all(|b| b.is_ascii_digit());
    if !digits_only || !(10..=13).contains(&phone.len()) {
        return Err(field_error(
            "phone_format",
            "Phone number must be 10 to 13 digits",
        ));
    }
    Ok(())
}

/// The domain needs a dot with text on both sides (`example.com`, not `localhost`)
fn validate_email_domain(email: &str) -> Result<(), ValidationError> {
    let dotted = email
        .rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .is_some_and(|(name, tld)| !name.is_empty() && !tld.is_empty());
    if !dotted {
        return Err(field_error("email_domain", "Email domain must contain a dot"));
    }
    Ok(())
}

fn validate_discount(discount: &str) -> Result<(), ValidationError> {
    Discount::parse(discount)
        .map(|_| ())
        .map_err(|_| field_error("discount_range", "Discount must be a whole number from 0 to 100"))
}

fn validate_event_code(code: &str) -> Result<(), ValidationError> {
    EventCode::parse(code)
        .map(|_| ())
        .map_err(|_| field_error("event_code_format", "Event code must look like ATK-001"))
}

/// Forms submit the discount as text; API clients often send a number
fn discount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

fn optional_discount_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    discount_text(deserializer).map(Some)
}

// ============================================================================
// Voucher Requests
// ============================================================================

/// Issue a voucher to a recipient under an event
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IssueVoucherRequest {
    #[serde(rename = "firstName")]
    #[validate(custom(function = "validate_person_name"))]
    pub first_name: String,

    #[serde(rename = "lastName")]
    #[validate(custom(function = "validate_person_name"))]
    pub last_name: String,

    #[validate(
        email(message = "Invalid email format"),
        custom(function = "validate_email_domain")
    )]
    pub email: String,

    #[serde(rename = "phoneNumber")]
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,

    /// Percentage as digits, e.g. "20"
    #[serde(deserialize_with = "discount_text")]
    #[validate(custom(function = "validate_discount"))]
    pub discount: String,

    #[serde(rename = "eventCode")]
    #[validate(custom(function = "validate_event_code"))]
    pub event_code: String,
}

/// Edit a voucher and its recipient. Absent fields are left unchanged;
/// status can never be changed here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVoucherRequest {
    #[serde(rename = "firstName", default)]
    #[validate(custom(function = "validate_person_name"))]
    pub first_name: Option<String>,

    #[serde(rename = "lastName", default)]
    #[validate(custom(function = "validate_person_name"))]
    pub last_name: Option<String>,

    #[serde(default)]
    #[validate(
        email(message = "Invalid email format"),
        custom(function = "validate_email_domain")
    )]
    pub email: Option<String>,

    #[serde(rename = "phoneNumber", default)]
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,

    #[serde(default, deserialize_with = "optional_discount_text")]
    #[validate(custom(function = "validate_discount"))]
    pub discount: Option<String>,
}

impl UpdateVoucherRequest {
    /// True when any recipient field is being changed
    pub fn touches_customer(&self) -> bool {
        self.first_name.is_some()
            || self.last_name.is_some()
            || self.email.is_some()
            || self.phone_number.is_some()
    }
}

// ============================================================================
// Event Requests
// ============================================================================

/// Create an event; the code is assigned by the server
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 100, message = "Event name must be 1-100 characters"))]
    pub name: String,
}

// ============================================================================
// Scan Requests
// ============================================================================

/// Raw text decoded from a QR image
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScanRequest {
    #[validate(length(min = 1, max = 4096, message = "Scan data must be 1-4096 characters"))]
    pub data: String,
}
