//! Record model for reminder collections.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use reminders_model_rs::prelude::*;
//! ```
//!
//! This re-exports [`Record`], [`PriorityBucket`], [`RawReminder`] and the
//! model error types.
//!
//! [`Record`]: models::Record
//! [`PriorityBucket`]: models::PriorityBucket
//! [`RawReminder`]: models::RawReminder

pub mod error;
pub mod models;
pub mod prelude;
