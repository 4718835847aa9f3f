//! # voucher-service
//!
//! Application layer: resolving and claiming scanned vouchers, issuing
//! vouchers, and event and voucher administration, plus the DTOs the API
//! speaks.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
