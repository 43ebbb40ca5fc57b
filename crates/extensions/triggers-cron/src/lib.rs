//! # Carillon Cron Trigger Extension
//!
//! Cron-expression implementation of the [`carillon_protocols::Trigger`]
//! contract. Expressions use the standard 5-field dialect (minute, hour,
//! day-of-month, month, day-of-week) plus `@hourly`-style descriptors, and
//! are evaluated in a configurable time-zone location.

pub mod trigger;

pub use trigger::CronTrigger;
