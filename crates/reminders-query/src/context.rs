//! Evaluation context.

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Utc,
};
use chrono_tz::Tz;

/// The calendar that instants are read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calendar {
    /// A constant UTC offset.
    Fixed(FixedOffset),
    /// An IANA timezone. Each instant is read with the offset in effect at that instant.
    Zone(Tz),
}

impl Calendar {
    /// Returns the UTC offset in effect at `instant`.
    pub fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        match self {
            Calendar::Fixed(offset) => *offset,
            Calendar::Zone(tz) => tz.offset_from_utc_datetime(&instant.naive_utc()).fix(),
        }
    }

    /// Converts a wall-clock time into a UTC instant.
    ///
    /// A time repeated by a backward transition maps to its earlier instant.
    /// A time skipped by a forward transition maps to the first instant after
    /// the jump.
    fn to_utc(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Calendar::Fixed(offset) => fixed_to_utc(local, *offset),
            Calendar::Zone(tz) => match tz.from_local_datetime(&local) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                    Some(dt.with_timezone(&Utc))
                }
                LocalResult::None => skipped_to_utc(*tz, local),
            },
        }
    }
}

fn fixed_to_utc(local: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let shift = TimeDelta::try_seconds(i64::from(offset.local_minus_utc()))?;
    local.checked_sub_signed(shift).map(|naive| naive.and_utc())
}

fn skipped_to_utc(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    (1..=180)
        .filter_map(|minutes| local.checked_add_signed(TimeDelta::minutes(minutes)))
        .find_map(|later| tz.from_local_datetime(&later).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Ambient inputs for a single query.
///
/// The reference instant is always passed in explicitly; the engine never
/// reads the system clock. The [`Calendar`] defines start-of-day
/// computations, weekday arithmetic and date bucket labels.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use reminders_query_rs::QueryContext;
///
/// let now = Utc.with_ymd_and_hms(2025, 1, 8, 15, 30, 0).unwrap();
/// let context = QueryContext::utc(now);
/// assert_eq!(context.today().to_string(), "2025-01-08");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryContext {
    now: DateTime<Utc>,
    calendar: Calendar,
}

impl QueryContext {
    /// Creates a context anchored at `now`, using `now`'s offset as a fixed calendar.
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: now.with_timezone(&Utc),
            calendar: Calendar::Fixed(*now.offset()),
        }
    }

    /// Creates a context anchored at a UTC instant with a UTC calendar.
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self {
            now,
            calendar: Calendar::Fixed(Utc.fix()),
        }
    }

    /// Creates a context anchored at `now`, read in the timezone `tz`.
    pub fn in_timezone(now: DateTime<Utc>, tz: Tz) -> Self {
        Self {
            now,
            calendar: Calendar::Zone(tz),
        }
    }

    /// Returns the calendar.
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Returns the reference instant in the local calendar.
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.to_local(self.now)
    }

    /// Returns the reference instant in UTC.
    pub fn now_utc(&self) -> DateTime<Utc> {
        self.now
    }

    /// Returns today's date in the local calendar.
    pub fn today(&self) -> NaiveDate {
        self.local_date(self.now)
    }

    /// Reads an instant in the local calendar, with the offset in effect at that instant.
    pub fn to_local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.calendar.offset_at(instant))
    }

    /// Converts a local wall-clock time into a UTC instant.
    ///
    /// Returns `None` if the result is outside the representable range.
    pub fn local_to_utc(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.calendar.to_utc(local)
    }

    /// Returns the instant at which `date` starts in the local calendar.
    pub fn start_of_day(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        self.local_to_utc(date.and_time(NaiveTime::MIN))
    }

    /// Returns the local calendar date of an instant.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.to_local(instant).date_naive()
    }
}
