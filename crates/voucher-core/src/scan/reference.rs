//! Classify a raw scanned string into a lookup reference
//!
//! Printed vouchers exist in several payload generations (bare ids, JSON
//! with assorted key names, opaque cached strings), so classification never
//! fails: anything unrecognised becomes a release candidate.

use std::fmt;

use serde_json::Value;

/// What a scanned string points at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    /// A release id, or an opaque string that is treated as one
    ByRelease(String),
    /// A voucher id taken from a payload with no release id
    ByVoucher(String),
}

impl Reference {
    /// The identifier text, whichever kind it is
    pub fn id(&self) -> &str {
        match self {
            Self::ByRelease(id) | Self::ByVoucher(id) => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ByRelease(_) => "release",
            Self::ByVoucher(_) => "voucher",
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}

/// Pure classification of a scanned string.
///
/// JSON objects are searched for `releasedID`, then `voucherID`, then `id`;
/// the first present key wins. A key counts as present only when it holds a
/// non-empty string or a non-zero number. Everything else (invalid JSON,
/// JSON that is not an object, objects with no usable key) yields
/// `ByRelease(raw)` with the input untouched.
pub fn normalize(raw: &str) -> Reference {
    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(raw) else {
        return Reference::ByRelease(raw.to_string());
    };

    if let Some(id) = fields.get("releasedID").and_then(usable_id) {
        return Reference::ByRelease(id);
    }
    if let Some(id) = fields.get("voucherID").and_then(usable_id) {
        return Reference::ByVoucher(id);
    }
    if let Some(id) = fields.get("id").and_then(usable_id) {
        return Reference::ByRelease(id);
    }

    Reference::ByRelease(raw.to_string())
}

fn usable_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}
