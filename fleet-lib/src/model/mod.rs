//! Data model types

mod booking;
mod estimate;
mod vehicle;

pub use booking::*;
pub use estimate::*;
pub use vehicle::*;
