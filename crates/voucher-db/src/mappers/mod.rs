//! Entity to model mappers
//!
//! Conversions from database rows to domain entities (voucher-core).
//! Rows whose values fall outside domain rules convert with `TryFrom`.

mod customer;
mod event;
mod qr_record;
mod release;
mod voucher;

pub use event::event_number;
