//! Convenient re-exports for common model types.
//!
//! ```
//! use reminders_model_rs::prelude::*;
//!
//! let record = Record::new("1", "Buy milk").with_priority(PriorityBucket::High);
//! assert_eq!(record.priority_bucket.as_str(), "high");
//! ```

pub use crate::error::{ModelError, ModelResult};
pub use crate::models::{
    normalize_tags, parse_timestamp, PriorityBucket, RawPriority, RawReminder, Record,
};
