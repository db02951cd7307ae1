// src/data/logline.rs

//! The [`LineParser`] trait, which turns one raw line into a [`LogRecord`],
//! and the default implementation [`LogLineParser`].
//!
//! The readers never interpret the text of a line themselves (aside from
//! restart banner detection, see [`restart`]); all timestamp semantics
//! belong to the `LineParser`.
//!
//! [`restart`]: crate::data::restart

use crate::common::{CRu8, NLu8};
use crate::data::datetime::{
    bytes_to_regex_to_datetime,
    offset_utc,
    Datelike,
    FixedOffset,
    Utc,
    Year,
};
use crate::data::logrecord::LogRecord;
use crate::data::restart::find_restart;

/// Turn one raw line into a [`LogRecord`].
///
/// `line` may or may not include its terminating newline.
pub trait LineParser {
    fn parse(
        &self,
        line: &[u8],
    ) -> LogRecord;
}

impl<F> LineParser for F
where
    F: Fn(&[u8]) -> LogRecord,
{
    fn parse(
        &self,
        line: &[u8],
    ) -> LogRecord {
        self(line)
    }
}

/// Remove a trailing `'\n'` or `"\r\n"`.
pub fn trim_line_terminator(line: &[u8]) -> &[u8] {
    let mut line = line;
    if line.last() == Some(&NLu8) {
        line = &line[..line.len() - 1];
        if line.last() == Some(&CRu8) {
            line = &line[..line.len() - 1];
        }
    }

    line
}

/// The default [`LineParser`].
///
/// Recognizes an ISO-8601 or ctime style timestamp at the start of a line
/// and any restart banner within the line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LogLineParser {
    /// Offset for timestamps that do not carry one.
    tz_offset: FixedOffset,
    /// Year for timestamps that do not carry one.
    year: Year,
}

impl LogLineParser {
    pub fn new(
        tz_offset: FixedOffset,
        year: Year,
    ) -> LogLineParser {
        LogLineParser { tz_offset, year }
    }

    pub const fn tz_offset(&self) -> &FixedOffset {
        &self.tz_offset
    }

    pub const fn year(&self) -> Year {
        self.year
    }
}

impl Default for LogLineParser {
    /// UTC and the current year.
    fn default() -> Self {
        LogLineParser::new(offset_utc(), Utc::now().year())
    }
}

impl LineParser for LogLineParser {
    fn parse(
        &self,
        line: &[u8],
    ) -> LogRecord {
        let line = trim_line_terminator(line);
        let timestamp = bytes_to_regex_to_datetime(line, self.year, &self.tz_offset);
        let restart = find_restart(line);

        LogRecord::new(String::from_utf8_lossy(line).into_owned(), timestamp, restart)
    }
}
