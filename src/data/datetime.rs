// src/data/datetime.rs

//! Functions to perform regular expression ("regex") searches on bytes and
//! transform matches to chrono [`DateTime`] instances.
//!
//! Two timestamp styles found at the start of server log lines are
//! recognized:
//! 1. ISO-8601 style, e.g. `2021-01-01T00:00:00.123+0000`, which always
//!    carries a year and may carry an offset.
//! 2. ctime style, e.g. `Wed Jan  1 00:00:00.123`, which carries no year.
//!    The year must be supplied by the caller; these are the datetimes that
//!    may need year "rollover" correction, see [`datetime_year_decrement`].
//!
//! Either may be wrapped in square brackets, e.g. `[2021-01-01T00:00:00]`.
//!
//! The most relevant function is [`bytes_to_regex_to_datetime`].
//!
//! [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html

#[cfg(any(debug_assertions, test))]
use crate::debug::printers::buffer_to_String_noraw;

#[doc(hidden)]
pub use ::chrono::{
    DateTime,
    Datelike, // adds method `.year()` onto `DateTime`
    FixedOffset,
    NaiveDate,
    NaiveDateTime,
    Offset, // adds method `.fix()` onto `Utc`
    TimeZone,
    Utc,
};
use ::lazy_static::lazy_static;
use ::regex::bytes::{Captures, Regex};
#[allow(unused_imports)]
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime typing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A _Year_ in a date.
pub type Year = i32;

/// A chrono [`DateTime`] type used in _logfile_ff_.
///
/// [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html
pub type DateTimeL = DateTime<FixedOffset>;
pub type DateTimeLOpt = Option<DateTimeL>;

/// Offset `+00:00`.
pub fn offset_utc() -> FixedOffset {
    Utc.fix()
}

/// Create a [`DateTimeL`] from the passed values.
///
/// Panics if the values do not describe a valid datetime. Intended for
/// constant values, mostly in tests.
pub fn ymdhms(
    fixedoffset: &FixedOffset,
    year: Year,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTimeL {
    fixedoffset
        .with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Return the passed `DateTimeL` one year earlier.
///
/// The heuristic behind log-file "rollover" correction: a file whose
/// timestamps lack a year and whose last timestamp appears to precede its
/// first timestamp is assumed to span exactly one new-year.
///
/// Returns `None` when the earlier date does not exist (February 29).
pub fn datetime_year_decrement(dt: &DateTimeL) -> DateTimeLOpt {
    dt.with_year(dt.year() - 1)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime Regex matching
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Regex capture group name for the year.
const CGN_YEAR: &str = "year";
/// Regex capture group name for the numeric month.
const CGN_MONTH: &str = "month";
/// Regex capture group name for the abbreviated month name.
const CGN_MONTH_B: &str = "monthb";
/// Regex capture group name for the day of month.
const CGN_DAY: &str = "day";
/// Regex capture group name for the hour.
const CGN_HOUR: &str = "hour";
/// Regex capture group name for the minute.
const CGN_MINUTE: &str = "minute";
/// Regex capture group name for the second.
const CGN_SECOND: &str = "second";
/// Regex capture group name for fractional seconds.
const CGN_FRACTIONAL: &str = "fractional";
/// Regex capture group name for the timezone offset.
const CGN_TZ: &str = "tz";

/// ISO-8601 style datetime at the start of a line.
const RP_ISO8601: &str = concat!(
    r"^\[?",
    r"(?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})",
    r"[T ]",
    r"(?P<hour>\d{2}):(?P<minute>\d{2}):(?P<second>\d{2})",
    r"(?:[\.,](?P<fractional>\d{1,9}))?",
    r"(?P<tz>Z|[+\-]\d{2}:?\d{2})?",
    r"(?:\]|\s|$)",
);

/// ctime style datetime at the start of a line, no year.
const RP_CTIME: &str = concat!(
    r"^\[?",
    r"(?:(?:Mon|Tue|Wed|Thu|Fri|Sat|Sun) +)?",
    r"(?P<monthb>Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec) +",
    r"(?P<day>\d{1,2}) +",
    r"(?P<hour>\d{2}):(?P<minute>\d{2}):(?P<second>\d{2})",
    r"(?:\.(?P<fractional>\d{1,9}))?",
    r"(?:\]|\s|$)",
);

lazy_static! {
    static ref REGEX_ISO8601: Regex = Regex::new(RP_ISO8601).unwrap();
    static ref REGEX_CTIME: Regex = Regex::new(RP_CTIME).unwrap();
}

/// strftime pattern for a buffer built from [`RP_ISO8601`] captures that
/// carry a timezone.
const DTP_ISO8601_TZ: &str = "%Y-%m-%dT%H:%M:%S%.f%z";
/// strftime pattern for a buffer built from [`RP_ISO8601`] captures without
/// a timezone.
const DTP_ISO8601: &str = "%Y-%m-%dT%H:%M:%S%.f";
/// strftime pattern for a buffer built from [`RP_CTIME`] captures, with the
/// year prefixed.
const DTP_CTIME: &str = "%Y %b %d %H:%M:%S%.f";

/// Copy capture group `name` onto the end of `buffer`.
fn copy_capture_to_buffer(
    captures: &Captures,
    name: &str,
    buffer: &mut Vec<u8>,
) -> Option<()> {
    buffer.extend_from_slice(captures.name(name)?.as_bytes());

    Some(())
}

/// Copy the time of day and fractional seconds from `captures` onto the end
/// of `buffer`, as `HH:MM:SS.f`.
fn copy_time_to_buffer(
    captures: &Captures,
    buffer: &mut Vec<u8>,
) -> Option<()> {
    copy_capture_to_buffer(captures, CGN_HOUR, buffer)?;
    buffer.push(b':');
    copy_capture_to_buffer(captures, CGN_MINUTE, buffer)?;
    buffer.push(b':');
    copy_capture_to_buffer(captures, CGN_SECOND, buffer)?;
    buffer.push(b'.');
    match captures.name(CGN_FRACTIONAL) {
        Some(match_) => buffer.extend_from_slice(match_.as_bytes()),
        None => buffer.push(b'0'),
    }

    Some(())
}

/// Copy the timezone from `captures` onto the end of `buffer` in `%z` form,
/// `+HHMM`. Returns `false` if there is no timezone capture.
fn copy_tz_to_buffer(
    captures: &Captures,
    buffer: &mut Vec<u8>,
) -> bool {
    match captures.name(CGN_TZ) {
        Some(match_) if match_.as_bytes() == b"Z" => {
            buffer.extend_from_slice(b"+0000");
            true
        }
        Some(match_) => {
            buffer.extend(match_.as_bytes().iter().filter(|b| **b != b':'));
            true
        }
        None => false,
    }
}

/// Parse `data` with the strftime `pattern`.
///
/// If `has_tz` then `pattern` has a `%z` and `data` its offset, else
/// `tz_offset` is the offset of the parsed local datetime.
fn datetime_parse_from_str(
    data: &str,
    pattern: &str,
    has_tz: bool,
    tz_offset: &FixedOffset,
) -> DateTimeLOpt {
    dpfn!("({:?}, {:?}, has_tz {}, {:?})", data, pattern, has_tz, tz_offset);
    if has_tz {
        return match DateTime::parse_from_str(data, pattern) {
            Ok(dt) => {
                dpfx!("return {:?}", dt);
                Some(dt)
            }
            Err(_err) => {
                dpfx!("DateTime::parse_from_str failed: {}", _err);
                None
            }
        };
    }
    let dt_naive: NaiveDateTime = match NaiveDateTime::parse_from_str(data, pattern) {
        Ok(val) => val,
        Err(_err) => {
            dpfx!("NaiveDateTime::parse_from_str failed: {}", _err);
            return None;
        }
    };
    let result = tz_offset
        .from_local_datetime(&dt_naive)
        .earliest();
    dpfx!("return {:?}", result);

    result
}

/// Transform [`RP_ISO8601`] `captures` to a `DateTimeL`.
///
/// `tz_offset` fills in when the captures have no timezone.
fn captures_iso8601_to_datetime(
    captures: &Captures,
    tz_offset: &FixedOffset,
) -> DateTimeLOpt {
    let mut buffer: Vec<u8> = Vec::with_capacity(40);
    copy_capture_to_buffer(captures, CGN_YEAR, &mut buffer)?;
    buffer.push(b'-');
    copy_capture_to_buffer(captures, CGN_MONTH, &mut buffer)?;
    buffer.push(b'-');
    copy_capture_to_buffer(captures, CGN_DAY, &mut buffer)?;
    buffer.push(b'T');
    copy_time_to_buffer(captures, &mut buffer)?;
    let has_tz: bool = copy_tz_to_buffer(captures, &mut buffer);
    let pattern: &str = match has_tz {
        true => DTP_ISO8601_TZ,
        false => DTP_ISO8601,
    };

    datetime_parse_from_str(std::str::from_utf8(&buffer).ok()?, pattern, has_tz, tz_offset)
}

/// Transform [`RP_CTIME`] `captures` to a `DateTimeL`.
///
/// ctime style datetimes have no year nor timezone so `year` and `tz_offset`
/// fill in.
fn captures_ctime_to_datetime(
    captures: &Captures,
    year: Year,
    tz_offset: &FixedOffset,
) -> DateTimeLOpt {
    let mut buffer: Vec<u8> = Vec::with_capacity(32);
    buffer.extend_from_slice(format!("{:04} ", year).as_bytes());
    copy_capture_to_buffer(captures, CGN_MONTH_B, &mut buffer)?;
    buffer.push(b' ');
    copy_capture_to_buffer(captures, CGN_DAY, &mut buffer)?;
    buffer.push(b' ');
    copy_time_to_buffer(captures, &mut buffer)?;

    datetime_parse_from_str(std::str::from_utf8(&buffer).ok()?, DTP_CTIME, false, tz_offset)
}

/// Search the beginning of `data` for a datetime substring and transform it
/// to a `DateTimeL`.
///
/// `year` is used for datetime formats without a year.
/// `tz_offset` is used for datetime formats without a timezone.
///
/// Returns `None` if no recognizable datetime begins `data`.
pub fn bytes_to_regex_to_datetime(
    data: &[u8],
    year: Year,
    tz_offset: &FixedOffset,
) -> DateTimeLOpt {
    #[cfg(any(debug_assertions, test))]
    dpfn!("({:?}, {:?}, {:?})", buffer_to_String_noraw(data), year, tz_offset);

    let result = match REGEX_ISO8601.captures(data) {
        Some(captures) => captures_iso8601_to_datetime(&captures, tz_offset),
        None => match REGEX_CTIME.captures(data) {
            Some(captures) => captures_ctime_to_datetime(&captures, year, tz_offset),
            None => None,
        },
    };
    dpfx!("return {:?}", result);

    result
}
