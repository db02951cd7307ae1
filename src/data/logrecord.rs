// src/data/logrecord.rs

//! Implement [`LogRecord`], the parsed form of one line of a log file.

use crate::data::datetime::{DateTimeL, DateTimeLOpt};

use std::fmt;

/// The two known kinds of server process that write restart banners.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BinaryKind {
    /// The database server process.
    Mongod,
    /// The sharding router process.
    Mongos,
}

impl BinaryKind {
    /// Name of the process binary.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BinaryKind::Mongod => "mongod",
            BinaryKind::Mongos => "mongos",
        }
    }
}

impl fmt::Display for BinaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A process restart banner found on a line: the process version and which
/// kind of process wrote the banner.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RestartMarker {
    /// dotted numeric version, e.g. `"4.2.1"`
    pub version: String,
    pub kind: BinaryKind,
}

/// One parsed line.
///
/// Created by a [`LineParser`]. A `LogRecord` knows nothing about where in
/// the file its line was found.
///
/// [`LineParser`]: crate::data::logline::LineParser
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LogRecord {
    /// The line text without the line terminator.
    pub raw: String,
    /// `None` if the line has no recognizable timestamp, e.g. continuation
    /// lines of a multi-line message.
    pub timestamp: DateTimeLOpt,
    /// `Some` only on process-start banner lines.
    pub restart: Option<RestartMarker>,
}

impl LogRecord {
    pub fn new(
        raw: String,
        timestamp: DateTimeLOpt,
        restart: Option<RestartMarker>,
    ) -> LogRecord {
        LogRecord {
            raw,
            timestamp,
            restart,
        }
    }

    /// Does this record have a timestamp?
    #[inline(always)]
    pub const fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }

    /// Is the timestamp of this record at or after `dt`?
    ///
    /// A record without a timestamp is never at or after anything.
    pub fn at_or_after(
        &self,
        dt: &DateTimeL,
    ) -> bool {
        match self.timestamp {
            Some(ts) => &ts >= dt,
            None => false,
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
