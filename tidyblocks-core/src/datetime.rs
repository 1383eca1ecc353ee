//! DateTime type for TidyBlocks literals
//!
//! Millisecond-precision UTC instants over the same range as a JavaScript
//! `Date` (±100,000,000 days around the Unix epoch). Persisted as canonical
//! ISO 8601 text: `YYYY-MM-DDTHH:MM:SS.sssZ`, with expanded `±YYYYYY` years
//! outside 0..=9999.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Days in each month (non-leap year)
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days from 0000-03-01 to 1970-01-01
const UNIX_EPOCH_DAYS: i64 = 719_468;

// ============================================================================
// DateTime
// ============================================================================

/// A UTC instant with millisecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    /// Milliseconds since Unix epoch (negative for pre-1970 instants)
    millis: i64,
}

impl DateTime {
    /// Largest representable distance from the epoch, in milliseconds
    pub const MAX_MILLIS: i64 = 100_000_000 * MILLIS_PER_DAY;

    // ========== Construction ==========

    /// Create from milliseconds since Unix epoch
    pub fn from_unix_millis(millis: i64) -> Result<Self, DateTimeError> {
        if millis.unsigned_abs() > Self::MAX_MILLIS as u64 {
            return Err(DateTimeError::OutOfRange(millis));
        }
        Ok(Self { millis })
    }

    /// Create from calendar components
    pub fn from_ymd_hms_milli(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        milli: u32,
    ) -> Result<Self, DateTimeError> {
        if !(1..=12).contains(&month) {
            return Err(DateTimeError::InvalidMonth(month));
        }
        if day < 1 || day > days_in_month(year, month) {
            return Err(DateTimeError::InvalidDay { day, month, year });
        }
        if hour > 23 {
            return Err(DateTimeError::InvalidHour(hour));
        }
        if minute > 59 {
            return Err(DateTimeError::InvalidMinute(minute));
        }
        if second > 59 {
            return Err(DateTimeError::InvalidSecond(second));
        }
        if milli > 999 {
            return Err(DateTimeError::InvalidMillisecond(milli));
        }

        let days = days_from_civil(year, month, day);
        let millis = days
            .checked_mul(MILLIS_PER_DAY)
            .and_then(|m| {
                m.checked_add(
                    hour as i64 * MILLIS_PER_HOUR
                        + minute as i64 * MILLIS_PER_MINUTE
                        + second as i64 * MILLIS_PER_SECOND
                        + milli as i64,
                )
            })
            .ok_or(DateTimeError::OutOfRange(i64::MAX))?;
        Self::from_unix_millis(millis)
    }

    // ========== Accessors ==========

    pub fn as_unix_millis(&self) -> i64 {
        self.millis
    }

    pub fn year(&self) -> i32 {
        self.to_ymd().0
    }

    /// Month (1-12)
    pub fn month(&self) -> u32 {
        self.to_ymd().1
    }

    /// Day of month (1-31)
    pub fn day(&self) -> u32 {
        self.to_ymd().2
    }

    /// Day of week (1=Monday, 7=Sunday, ISO 8601)
    pub fn weekday(&self) -> u32 {
        let days = self.millis.div_euclid(MILLIS_PER_DAY);
        // 1970-01-01 was a Thursday
        let dow = (days + 4).rem_euclid(7);
        if dow == 0 {
            7
        } else {
            dow as u32
        }
    }

    pub fn hours(&self) -> u32 {
        (self.millis.rem_euclid(MILLIS_PER_DAY) / MILLIS_PER_HOUR) as u32
    }

    pub fn minutes(&self) -> u32 {
        (self.millis.rem_euclid(MILLIS_PER_HOUR) / MILLIS_PER_MINUTE) as u32
    }

    pub fn seconds(&self) -> u32 {
        (self.millis.rem_euclid(MILLIS_PER_MINUTE) / MILLIS_PER_SECOND) as u32
    }

    pub fn millisecond(&self) -> u32 {
        self.millis.rem_euclid(MILLIS_PER_SECOND) as u32
    }

    /// Decompose into year, month, day
    pub fn to_ymd(&self) -> (i32, u32, u32) {
        civil_from_days(self.millis.div_euclid(MILLIS_PER_DAY))
    }

    // ========== Formatting ==========

    /// Format as canonical ISO 8601 text
    pub fn to_iso_string(&self) -> String {
        let (year, month, day) = self.to_ymd();
        let year = if (0..=9999).contains(&year) {
            format!("{:04}", year)
        } else if year < 0 {
            format!("-{:06}", -(year as i64))
        } else {
            format!("+{:06}", year)
        };
        format!(
            "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            year,
            month,
            day,
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.millisecond()
        )
    }

    // ========== Parsing ==========

    /// Parse canonical ISO 8601 text as produced by [`DateTime::to_iso_string`].
    ///
    /// Anything else (date-only forms, missing milliseconds, offsets other
    /// than `Z`, non-canonical year widths) is rejected so that parsing and
    /// formatting are exact inverses.
    pub fn parse_iso(s: &str) -> Result<Self, DateTimeError> {
        let parse_error = || DateTimeError::ParseError(s.to_string());

        let (year, rest) = match s.as_bytes().first() {
            Some(sign @ (b'+' | b'-')) => {
                let year: i32 = digits(s.get(1..7)).ok_or_else(parse_error)?;
                // Expanded form is only canonical outside 0..=9999.
                if year <= 9999 && (*sign == b'+' || year == 0) {
                    return Err(parse_error());
                }
                let year = if *sign == b'-' { -year } else { year };
                (year, s.get(7..).ok_or_else(parse_error)?)
            }
            _ => {
                let year: i32 = digits(s.get(0..4)).ok_or_else(parse_error)?;
                (year, s.get(4..).ok_or_else(parse_error)?)
            }
        };

        // -MM-DDTHH:MM:SS.sssZ
        let b = rest.as_bytes();
        if b.len() != 20
            || b[0] != b'-'
            || b[3] != b'-'
            || b[6] != b'T'
            || b[9] != b':'
            || b[12] != b':'
            || b[15] != b'.'
            || b[19] != b'Z'
        {
            return Err(parse_error());
        }

        let month = digits(rest.get(1..3)).ok_or_else(parse_error)?;
        let day = digits(rest.get(4..6)).ok_or_else(parse_error)?;
        let hour = digits(rest.get(7..9)).ok_or_else(parse_error)?;
        let minute = digits(rest.get(10..12)).ok_or_else(parse_error)?;
        let second = digits(rest.get(13..15)).ok_or_else(parse_error)?;
        let milli = digits(rest.get(16..19)).ok_or_else(parse_error)?;

        Self::from_ymd_hms_milli(year, month, day, hour, minute, second, milli)
    }
}

/// Parse an all-ASCII-digit slice
fn digits<T: FromStr>(s: Option<&str>) -> Option<T> {
    let s = s?;
    if !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl Serialize for DateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse_iso(&text).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur with datetime construction and parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    #[error("Invalid month: {0} (must be 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid day: {day} for {month}/{year}")]
    InvalidDay { day: u32, month: u32, year: i32 },

    #[error("Invalid hour: {0} (must be 0-23)")]
    InvalidHour(u32),

    #[error("Invalid minute: {0} (must be 0-59)")]
    InvalidMinute(u32),

    #[error("Invalid second: {0} (must be 0-59)")]
    InvalidSecond(u32),

    #[error("Invalid millisecond: {0} (must be 0-999)")]
    InvalidMillisecond(u32),

    #[error("Instant out of range: {0} ms from epoch")]
    OutOfRange(i64),

    #[error("Expected YYYY-MM-DDTHH:MM:SS.sssZ, got '{0}'")]
    ParseError(String),
}

// ============================================================================
// Calendar Utilities (Gregorian proleptic)
// ============================================================================

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        m @ 1..=12 => DAYS_IN_MONTH[(m - 1) as usize],
        _ => 0,
    }
}

/// Convert civil date to days since Unix epoch
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = year as i64 - if month <= 2 { 1 } else { 0 };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400; // [0, 399]
    let m = month as i64;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + day as i64 - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * 146097 + doe - UNIX_EPOCH_DAYS
}

/// Convert days since Unix epoch to civil date
fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + UNIX_EPOCH_DAYS;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = z - era * 146097; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // [0, 399]
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = if mp < 10 { mp + 3 } else { mp - 9 }; // [1, 12]
    let year = if m <= 2 { y + 1 } else { y };
    (year as i32, m as u32, d as u32)
}
