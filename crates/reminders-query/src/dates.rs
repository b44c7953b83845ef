//! Natural-language and ISO-8601 date resolution.
//!
//! [`resolve_date`] turns an operand such as `"tomorrow"`, `"next friday"`,
//! `"end of month"` or `"2025-01-10T09:00:00Z"` into an absolute instant,
//! relative to the reference instant in a [`QueryContext`].
//!
//! Attempts are made in a fixed order and the first success wins:
//!
//! 1. Keywords: `now`, `today`, `tomorrow`, `yesterday`, `next week`,
//!    `last week`, `next month`, `last month`
//! 2. Relative weekdays: `next <weekday>`, `last <weekday>`
//! 3. Date components (see [`parse_components`])
//! 4. ISO-8601, with optional fractional seconds
//!
//! Literals whose arithmetic leaves the representable date range resolve to
//! `None`, like any other unparsable operand.

use chrono::{
    DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, TimeDelta, Utc, Weekday,
};

use crate::context::QueryContext;

/// Resolves a date literal against the context's reference instant.
///
/// Returns `None` if the literal is not understood.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use reminders_query_rs::{resolve_date, QueryContext};
///
/// let context = QueryContext::utc(Utc.with_ymd_and_hms(2025, 1, 8, 15, 30, 0).unwrap());
///
/// assert_eq!(
///     resolve_date("Tomorrow", &context),
///     Some(Utc.with_ymd_and_hms(2025, 1, 9, 0, 0, 0).unwrap())
/// );
/// assert_eq!(resolve_date("someday", &context), None);
/// ```
pub fn resolve_date(literal: &str, context: &QueryContext) -> Option<DateTime<Utc>> {
    let normalized = normalize(literal);
    if normalized.is_empty() {
        return None;
    }

    resolve_keyword(&normalized, context)
        .or_else(|| resolve_relative_weekday(&normalized, context))
        .or_else(|| parse_components(&normalized).and_then(|c| c.resolve(context)))
        .or_else(|| parse_iso(literal.trim(), context))
}

/// Trims, lowercases, strips a trailing `()`, turns `_` into spaces and
/// collapses runs of whitespace.
fn normalize(literal: &str) -> String {
    let lower = literal.trim().to_lowercase();
    let stripped = lower.strip_suffix("()").unwrap_or(&lower);
    stripped
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn resolve_keyword(normalized: &str, context: &QueryContext) -> Option<DateTime<Utc>> {
    let today = context.today();
    let date = match normalized {
        "now" => return Some(context.now_utc()),
        "today" => today,
        "tomorrow" => today.succ_opt()?,
        "yesterday" => today.pred_opt()?,
        "next week" => today.checked_add_signed(Duration::days(7))?,
        "last week" => today.checked_sub_signed(Duration::days(7))?,
        "next month" => today.checked_add_months(Months::new(1))?,
        "last month" => today.checked_sub_months(Months::new(1))?,
        _ => return None,
    };
    context.start_of_day(date)
}

/// Resolves `next <weekday>` to the first matching day starting strictly
/// after now, and `last <weekday>` to the latest matching day starting
/// strictly before now.
fn resolve_relative_weekday(normalized: &str, context: &QueryContext) -> Option<DateTime<Utc>> {
    let (forward, name) = if let Some(rest) = normalized.strip_prefix("next ") {
        (true, rest)
    } else if let Some(rest) = normalized.strip_prefix("last ") {
        (false, rest)
    } else {
        return None;
    };

    let weekday = parse_weekday(name)?;
    let today = context.today();
    let now = context.now_utc();

    (0..=7).find_map(|step| {
        let delta = Duration::days(if forward { step } else { -step });
        let date = today.checked_add_signed(delta)?;
        let start = context.start_of_day(date)?;
        let on_side = if forward { start > now } else { start < now };
        (date.weekday() == weekday && on_side).then_some(start)
    })
}

/// Parses a full or abbreviated weekday name, ignoring case.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let name = name.trim().to_lowercase();
    match name.as_str() {
        "tues" => Some(Weekday::Tue),
        "weds" => Some(Weekday::Wed),
        "thur" | "thurs" => Some(Weekday::Thu),
        _ => name.parse::<Weekday>().ok(),
    }
}

/// A calendar period used by `start of …` and `end of …`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarUnit {
    Day,
    Week,
    Month,
    Year,
}

impl CalendarUnit {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "day" => Some(CalendarUnit::Day),
            "week" => Some(CalendarUnit::Week),
            "month" => Some(CalendarUnit::Month),
            "year" => Some(CalendarUnit::Year),
            _ => None,
        }
    }

    /// First day of the period containing `date`. Weeks start on Monday.
    fn first_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            CalendarUnit::Day => Some(date),
            CalendarUnit::Week => date.checked_sub_signed(Duration::days(i64::from(
                date.weekday().num_days_from_monday(),
            ))),
            CalendarUnit::Month => date.with_day(1),
            CalendarUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        }
    }

    /// First day of the period following the one containing `date`.
    fn next_first_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        let first = self.first_day(date)?;
        match self {
            CalendarUnit::Day => first.succ_opt(),
            CalendarUnit::Week => first.checked_add_signed(Duration::days(7)),
            CalendarUnit::Month => first.checked_add_months(Months::new(1)),
            CalendarUnit::Year => first.checked_add_months(Months::new(12)),
        }
    }
}

/// A unit for relative offsets such as `in 3 days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl OffsetUnit {
    fn from_name(name: &str) -> Option<Self> {
        let singular = name.strip_suffix('s').unwrap_or(name);
        match singular {
            "minute" | "min" => Some(OffsetUnit::Minute),
            "hour" | "hr" => Some(OffsetUnit::Hour),
            "day" => Some(OffsetUnit::Day),
            "week" | "wk" => Some(OffsetUnit::Week),
            "month" => Some(OffsetUnit::Month),
            "year" | "yr" => Some(OffsetUnit::Year),
            _ => None,
        }
    }
}

/// Structured date components extracted from a natural-language phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateComponents {
    /// The next occurrence of `weekday` on or after today, shifted by whole weeks.
    Weekday { weekday: Weekday, week_offset: i64 },
    /// The first instant of the current period.
    StartOf(CalendarUnit),
    /// The last instant of the current period.
    EndOf(CalendarUnit),
    /// A signed offset from now.
    Offset { amount: i64, unit: OffsetUnit },
}

/// Parses natural-language date components.
///
/// Recognized forms:
///
/// - `friday`, `fri+2`, `monday-1`
/// - `start of day|week|month|year`, `end of day|week|month|year`
/// - `in 3 days`, `2 weeks ago`, `+4 hours`, `-1 month`
///
/// # Example
///
/// ```
/// use chrono::Weekday;
/// use reminders_query_rs::dates::{parse_components, CalendarUnit, DateComponents};
///
/// assert_eq!(
///     parse_components("friday+2"),
///     Some(DateComponents::Weekday { weekday: Weekday::Fri, week_offset: 2 })
/// );
/// assert_eq!(
///     parse_components("End of Month"),
///     Some(DateComponents::EndOf(CalendarUnit::Month))
/// );
/// ```
pub fn parse_components(input: &str) -> Option<DateComponents> {
    let normalized = normalize(input);
    let text = normalized.as_str();

    if let Some(unit) = text.strip_prefix("start of ") {
        return CalendarUnit::from_name(unit).map(DateComponents::StartOf);
    }
    if let Some(unit) = text.strip_prefix("end of ") {
        return CalendarUnit::from_name(unit).map(DateComponents::EndOf);
    }
    if let Some(rest) = text.strip_prefix("in ") {
        return parse_offset(rest, 1);
    }
    if let Some(rest) = text.strip_suffix(" ago") {
        return parse_offset(rest, -1);
    }
    if let Some(rest) = text.strip_prefix('+') {
        return parse_offset(rest, 1);
    }
    if let Some(rest) = text.strip_prefix('-') {
        return parse_offset(rest, -1);
    }

    parse_weekday_offset(text)
}

fn parse_offset(text: &str, sign: i64) -> Option<DateComponents> {
    let mut parts = text.split_whitespace();
    let amount: i64 = parts.next()?.parse().ok()?;
    let unit = OffsetUnit::from_name(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some(DateComponents::Offset {
        amount: amount.checked_mul(sign)?,
        unit,
    })
}

fn parse_weekday_offset(text: &str) -> Option<DateComponents> {
    let Some(split) = text.find(|c: char| c == '+' || c == '-') else {
        return parse_weekday(text).map(|weekday| DateComponents::Weekday {
            weekday,
            week_offset: 0,
        });
    };

    let weekday = parse_weekday(&text[..split])?;
    let sign: i64 = if text[split..].starts_with('-') { -1 } else { 1 };
    let weeks: i64 = text[split + 1..].trim().parse().ok()?;

    Some(DateComponents::Weekday {
        weekday,
        week_offset: weeks.checked_mul(sign)?,
    })
}

impl DateComponents {
    /// Converts the components into an absolute instant.
    ///
    /// Minute and hour offsets are exact durations from now. Day, week, month
    /// and year offsets move the local wall-clock time, so `in 1 day` keeps
    /// the time of day across a daylight saving change.
    pub fn resolve(&self, context: &QueryContext) -> Option<DateTime<Utc>> {
        let today = context.today();
        match *self {
            DateComponents::Weekday {
                weekday,
                week_offset,
            } => {
                let ahead = (i64::from(weekday.num_days_from_monday())
                    - i64::from(today.weekday().num_days_from_monday()))
                .rem_euclid(7);
                let days = week_offset.checked_mul(7)?.checked_add(ahead)?;
                let date = today.checked_add_signed(TimeDelta::try_days(days)?)?;
                context.start_of_day(date)
            }
            DateComponents::StartOf(unit) => context.start_of_day(unit.first_day(today)?),
            DateComponents::EndOf(unit) => {
                let next = context.start_of_day(unit.next_first_day(today)?)?;
                next.checked_sub_signed(Duration::nanoseconds(1))
            }
            DateComponents::Offset { amount, unit } => {
                let now = context.now_utc();
                let local = context.now().naive_local();
                match unit {
                    OffsetUnit::Minute => now.checked_add_signed(TimeDelta::try_minutes(amount)?),
                    OffsetUnit::Hour => now.checked_add_signed(TimeDelta::try_hours(amount)?),
                    OffsetUnit::Day => context
                        .local_to_utc(local.checked_add_signed(TimeDelta::try_days(amount)?)?),
                    OffsetUnit::Week => context
                        .local_to_utc(local.checked_add_signed(TimeDelta::try_weeks(amount)?)?),
                    OffsetUnit::Month => context.local_to_utc(shift_months(local, amount)?),
                    OffsetUnit::Year => {
                        context.local_to_utc(shift_months(local, amount.checked_mul(12)?)?)
                    }
                }
            }
        }
    }
}

fn shift_months(local: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        local.checked_add_months(magnitude)
    } else {
        local.checked_sub_months(magnitude)
    }
}

/// Parses ISO-8601 timestamps and dates.
///
/// Timestamps without an offset, and bare dates, are read in the context's
/// local calendar.
fn parse_iso(literal: &str, context: &QueryContext) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(literal) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(literal, format) {
            return context.local_to_utc(naive);
        }
    }

    NaiveDate::parse_from_str(literal, "%Y-%m-%d")
        .ok()
        .and_then(|date| context.start_of_day(date))
}
