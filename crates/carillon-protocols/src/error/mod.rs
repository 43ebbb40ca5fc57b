//! Error types for carillon protocols.

mod job;
mod trigger;

pub use job::*;
pub use trigger::*;
