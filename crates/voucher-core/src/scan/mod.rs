//! Scanner-side building blocks: payload format, classification and
//! frame debouncing. All of it is pure and free of I/O.

mod gate;
mod payload;
mod reference;

pub use gate::{ScanGate, ScanPermit};
pub use payload::QrPayload;
pub use reference::{normalize, Reference};
