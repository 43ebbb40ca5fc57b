//! # Carillon Protocols
//!
//! Core protocol definitions (traits) for the carillon scheduling library.
//! Contains the contracts an external scheduler loop composes - no
//! implementations.
//!
//! ## Core Traits
//!
//! - [`Trigger`] - Trait for schedule computation ("when does this run next")
//! - [`Job`] - Trait for units of work a scheduler executes

pub mod error;
pub mod job;
pub mod trigger;
pub mod types;

// Re-export core traits and shared types
pub use error::{JobError, TriggerError};
pub use job::{Job, JobContext, Status};
pub use trigger::Trigger;
pub use types::{millis_to_utc, now_millis, SEP};
