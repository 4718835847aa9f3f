//! Value objects - immutable types that represent domain concepts

mod discount;
mod event_code;
mod snowflake;

pub use discount::Discount;
pub use event_code::EventCode;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
