//! Axum extractors for request handling
//!
//! Custom extractors for path parameters and validated JSON bodies.

mod path;
mod validated;

pub use path::{ApiPath, DeviceIdPath, EventCodePath, VoucherIdPath, MAX_DEVICE_ID_LEN};
pub use validated::{JsonBody, OptionalValidatedJson, ValidatedJson};
