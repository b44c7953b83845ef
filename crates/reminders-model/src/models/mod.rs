//! Data types for reminder records.
//!
//! [`Record`] is what the query engine consumes; [`RawReminder`] is the
//! payload the reminders server returns and converts into a `Record`.

mod priority;
mod raw;
mod record;

pub use priority::*;
pub use raw::*;
pub use record::*;
