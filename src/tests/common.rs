// src/tests/common.rs

//! Common data and helpers shared by tests.

#![allow(non_upper_case_globals)]
#![allow(non_snake_case)]

use crate::common::{FPath, FileOffset};
use crate::data::datetime::{offset_utc, ymdhms, DateTimeL, FixedOffset};
use crate::data::logline::{LineParser, LogLineParser};
use crate::debug::helpers::open_seekable;
use crate::readers::logfile::{LogFile, LogFileSettings};

use ::lazy_static::lazy_static;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

lazy_static! {
    pub static ref FO_0: FixedOffset = offset_utc();
    /// parser for test data; ctime timestamps are in year 2021
    pub static ref PARSER_2021: LogLineParser = LogLineParser::new(offset_utc(), 2021);
}

/// one untimestamped line, one restart banner, one message
pub const LOG_3LINES: &str = "\
no ts
[2021-01-01T00:00:00] version 4.2.1 mongod
[2021-06-01T00:00:00] message
";

/// five restart banners, the first two and the last two with the same
/// version
pub const LOG_RESTARTS: &str = "\
2021-01-01T00:00:00.000+0000 I CONTROL  [initandlisten] db version v4.0.1
2021-01-01T00:00:01.000+0000 I NETWORK  [conn1] end connection 127.0.0.1:50000
2021-01-02T00:00:00.000+0000 I CONTROL  [initandlisten] db version v4.0.1
2021-01-03T00:00:00.000+0000 I CONTROL  [initandlisten] db version v4.2.0
2021-01-04T00:00:00.000+0000 I CONTROL  [main] mongos version v4.2.0
2021-01-04T00:00:01.000+0000 I NETWORK  [conn2] received client metadata
";

/// ctime timestamps crossing a new-year
pub const LOG_ROLLOVER: &str = "\
Dec 31 23:59:58 [conn1] end connection
Dec 31 23:59:59 [conn2] end connection
Jan  1 00:00:00 [conn3] end connection
Jan  1 00:00:01 [conn4] end connection
";

/// timestamped lines followed by multi-line continuations
pub const LOG_CONTINUATION: &str = "\
2021-01-01T00:00:00 first
    continued 1a
    continued 1b
2021-01-01T00:00:01 second
2021-01-01T00:00:02 third
    continued 3a
";

pub const LOG_NO_TS: &str = "\
no timestamp here
nor here
";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Generate a log of `count` timestamped lines beginning at
/// `2021-03-01T00:00:00`.
///
/// Line `i` is `i / per_second` seconds after the first so runs of
/// `per_second` lines share a timestamp. If `continuation_every` is not
/// `0` then every `continuation_every`th line is followed by two
/// untimestamped lines.
pub fn generate_log(
    count: usize,
    per_second: usize,
    continuation_every: usize,
) -> String {
    let mut data = String::with_capacity(count * 100);
    for i in 0..count {
        let s = i / per_second;
        data.push_str(&format!(
            "2021-03-01T{:02}:{:02}:{:02}.000+0000 I NETWORK  [conn{}] message {}{}\n",
            s / 3600,
            (s / 60) % 60,
            s % 60,
            i % 13,
            i,
            "x".repeat(i % 7),
        ));
        if continuation_every != 0 && i % continuation_every == 0 {
            data.push_str(&format!("    at frame {}\n", i));
            data.push_str("    at frame main\n");
        }
    }

    data
}

/// Targets for fast-forward over a log from [`generate_log`]: every second
/// spanned, each second plus 500ms, and datetimes before and after.
pub fn generate_targets(
    count: usize,
    per_second: usize,
) -> Vec<DateTimeL> {
    let seconds = (count / per_second + 2) as u32;
    let mut targets: Vec<DateTimeL> = vec![ymdhms(&FO_0, 2021, 2, 28, 23, 0, 0)];
    for s in 0..seconds {
        let dt = ymdhms(&FO_0, 2021, 3, 1, s / 3600, (s / 60) % 60, s % 60);
        targets.push(dt);
        targets.push(dt + ::chrono::Duration::milliseconds(500));
    }
    targets.push(ymdhms(&FO_0, 2021, 3, 2, 0, 0, 0));

    targets
}

/// Offset of the first line of `data` with a timestamp at or after `dt`,
/// found by a plain linear scan.
pub fn first_at_or_after<P: LineParser>(
    data: &str,
    parser: &P,
    dt: &DateTimeL,
) -> Option<FileOffset> {
    let mut fo: FileOffset = 0;
    for line in data.split_inclusive('\n') {
        if parser.parse(line.as_bytes()).at_or_after(dt) {
            return Some(fo);
        }
        fo += line.len() as FileOffset;
    }

    None
}

/// helper to create a `LogFile` of the file at `path` using `PARSER_2021`
pub fn new_LogFile(path: &FPath) -> LogFile<LogLineParser> {
    LogFile::new(open_seekable(path), *PARSER_2021)
}

/// helper to create a `LogFile` of the file at `path` using `PARSER_2021`
/// and the passed settings
pub fn new_LogFile_settings(
    path: &FPath,
    window: u64,
    convergence: u64,
) -> LogFile<LogLineParser> {
    LogFile::new_with_settings(
        open_seekable(path),
        *PARSER_2021,
        LogFileSettings::new(window, convergence),
    )
}
