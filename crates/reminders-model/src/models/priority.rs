//! Coarse priority buckets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A coarse priority label derived from the reminders server's numeric priority.
///
/// The numeric scale follows the reminders convention where `1` is the most
/// urgent value and `9` the least, with `0` meaning "no priority":
///
/// | Numeric | Bucket   |
/// |---------|----------|
/// | 0       | `none`   |
/// | 1–4     | `high`   |
/// | 5       | `medium` |
/// | 6–9     | `low`    |
///
/// # Example
///
/// ```
/// use reminders_model_rs::models::PriorityBucket;
///
/// assert_eq!(PriorityBucket::from_level(1), PriorityBucket::High);
/// assert_eq!(PriorityBucket::from_level(5), PriorityBucket::Medium);
/// assert_eq!("LOW".parse::<PriorityBucket>().unwrap(), PriorityBucket::Low);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityBucket {
    /// No priority set.
    #[default]
    None,
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
}

impl PriorityBucket {
    /// Maps a numeric priority level onto its bucket.
    ///
    /// Values outside `0..=9` fall back to [`PriorityBucket::None`].
    pub fn from_level(level: i64) -> Self {
        match level {
            1..=4 => PriorityBucket::High,
            5 => PriorityBucket::Medium,
            6..=9 => PriorityBucket::Low,
            _ => PriorityBucket::None,
        }
    }

    /// Returns the wire name of the bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityBucket::None => "none",
            PriorityBucket::Low => "low",
            PriorityBucket::Medium => "medium",
            PriorityBucket::High => "high",
        }
    }
}

impl fmt::Display for PriorityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityBucket {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(PriorityBucket::None),
            "low" => Ok(PriorityBucket::Low),
            "medium" => Ok(PriorityBucket::Medium),
            "high" => Ok(PriorityBucket::High),
            _ => Err(ModelError::invalid_priority(s)),
        }
    }
}
