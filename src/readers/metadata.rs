// src/readers/metadata.rs

//! The two scans behind the lazy metadata of a [`LogFile`].
//!
//! 1. [`calculate_bounds`], the "boundary scan", finds the first timestamp
//!    near the start of a seekable stream and the last timestamp near its
//!    end. It reads only the beginning of the file (up to the first
//!    timestamped line) and the last window of bytes.
//! 2. [`iterate_lines`], the "full scan", reads every line to count lines
//!    and to collect process restart banners. It works on either kind of
//!    [`LogStream`], though a forward-only stream is consumed by it.
//!
//! [`LogFile`]: crate::readers::logfile::LogFile

use crate::common::{Bytes, Count, FileOffset, FileSz, NLu8};
use crate::data::datetime::{datetime_year_decrement, DateTimeLOpt};
use crate::data::logline::LineParser;
use crate::data::logrecord::{BinaryKind, LogRecord};
use crate::data::restart::{banner_kind, banner_version};
use crate::readers::logstream::LogStream;

use std::io::{BufRead, Result, Seek, SeekFrom};

use ::itertools::Itertools; // brings in `dedup`
use ::memchr::memchr;
#[allow(unused_imports)]
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

/// A process restart: the version from the restart banner and the parsed
/// banner line.
pub type Restart = (String, LogRecord);

/// Restarts in file order.
pub type Restarts = Vec<Restart>;

/// Result of the boundary scan.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bounds {
    /// Timestamp of the first timestamped line, rollover-corrected.
    pub start: DateTimeLOpt,
    /// Timestamp of the last timestamped line within the final window.
    pub end: DateTimeLOpt,
    /// Size of the stream in bytes.
    pub size: FileSz,
}

/// Result of the full scan.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LineSummary {
    /// Count of lines. A final line without a newline is counted.
    pub line_count: Count,
    pub restarts: Restarts,
    /// The process kind of the last restart banner seen.
    pub binary: Option<BinaryKind>,
}

/// The boundary scan.
///
/// 1. read lines from offset `0` until one has a timestamp, that is `start`
/// 2. read the last `window` bytes, the last line with a timestamp within
///    them is `end` (if there is none then the window is widened)
/// 3. if `end` precedes `start` then the file is presumed to have rolled
///    over a new-year; `start` becomes one year earlier
///
/// The rollover correction is a heuristic: it presumes at most one year
/// boundary was crossed and that the parser does not see explicit year
/// changes within the file.
///
/// The `reader` is positioned at `0` upon success.
pub fn calculate_bounds<R, P>(
    reader: &mut R,
    parser: &P,
    window: u64,
) -> Result<Bounds>
where
    R: BufRead + Seek,
    P: LineParser + ?Sized,
{
    dpfn!("(…, …, {})", window);
    reader.seek(SeekFrom::Start(0))?;
    let mut buffer = Bytes::with_capacity(1024);
    let mut start: DateTimeLOpt = None;
    loop {
        buffer.clear();
        if reader.read_until(NLu8, &mut buffer)? == 0 {
            break;
        }
        if let Some(dt) = parser.parse(&buffer).timestamp {
            start = Some(dt);
            break;
        }
    }
    dpfo!("start {:?}", start);

    let size: FileSz = reader.seek(SeekFrom::End(0))?;
    // the window is widened only when the final window has no timestamp,
    // e.g. a long trailing stack trace
    let mut window_tail: u64 = window;
    let mut end: DateTimeLOpt;
    loop {
        end = last_timestamp_in_tail(reader, parser, size, window_tail)?;
        if end.is_some() || start.is_none() || window_tail >= size {
            break;
        }
        window_tail = window_tail.saturating_mul(2);
        dpfo!("no timestamp in tail, widen window to {}", window_tail);
    }
    dpfo!("size {}, end {:?}", size, end);

    if let (Some(start_), Some(end_)) = (start, end) {
        if end_ < start_ {
            dpfo!("rollover; end {:?} < start {:?}", end_, start_);
            // February 29 of a leap year has no prior-year equivalent
            start = datetime_year_decrement(&start_).or(start);
        }
    }

    reader.seek(SeekFrom::Start(0))?;
    let bounds = Bounds { start, end, size };
    dpfx!("return {:?}", bounds);

    Ok(bounds)
}

/// Timestamp of the last line within the last `window` bytes that has one.
///
/// A partial line at the beginning of the window is ignored.
fn last_timestamp_in_tail<R, P>(
    reader: &mut R,
    parser: &P,
    size: FileSz,
    window: u64,
) -> Result<DateTimeLOpt>
where
    R: BufRead + Seek,
    P: LineParser + ?Sized,
{
    let fo_tail: FileOffset = size.saturating_sub(window);
    // read one byte before the tail to learn if the tail begins a line
    let fo_read: FileOffset = fo_tail.saturating_sub(1);
    reader.seek(SeekFrom::Start(fo_read))?;
    let mut tail = Bytes::with_capacity((size - fo_read) as usize);
    reader.read_to_end(&mut tail)?;
    let tail: &[u8] = match fo_tail {
        0 => &tail[..],
        _ => match memchr(NLu8, &tail) {
            Some(index) => &tail[index + 1..],
            None => &[],
        },
    };
    for line in tail.rsplit(|b| *b == NLu8) {
        if let Some(dt) = parser.parse(line).timestamp {
            return Ok(Some(dt));
        }
    }

    Ok(None)
}

/// The full scan.
///
/// Reads every line of `stream`, counting lines and collecting restart
/// banners. A line is a restart banner candidate only if it contains the
/// keyword `version`, and only a candidate with a known process marker is
/// a banner. Each banner updates `binary`; a banner with a version is added
/// to `restarts`.
///
/// A seekable `stream` is read from offset `0` and is positioned at `0`
/// afterward. A forward-only `stream` is read from its current position
/// and is exhausted afterward.
pub fn iterate_lines<P>(
    stream: &mut LogStream,
    parser: &P,
) -> Result<LineSummary>
where
    P: LineParser + ?Sized,
{
    dpfn!("({:?})", stream);
    if let LogStream::Seekable(reader) = stream {
        reader.seek(SeekFrom::Start(0))?;
    }
    let mut summary = LineSummary::default();
    let mut buffer = Bytes::with_capacity(1024);
    while stream.read_line(&mut buffer)? != 0 {
        summary.line_count += 1;
        let kind: BinaryKind = match banner_kind(&buffer) {
            Some(kind) => kind,
            None => continue,
        };
        summary.binary = Some(kind);
        if let Some(version) = banner_version(&buffer) {
            dpfo!("line {} restart {:?} {:?}", summary.line_count, kind, version);
            summary
                .restarts
                .push((version, parser.parse(&buffer)));
        }
    }
    if let LogStream::Seekable(reader) = stream {
        reader.seek(SeekFrom::Start(0))?;
    }
    dpfx!("return line_count {}, restarts {}, binary {:?}", summary.line_count, summary.restarts.len(), summary.binary);

    Ok(summary)
}

/// The versions of `restarts` in order, with consecutive duplicates
/// collapsed, e.g. versions `4.0.1 4.0.1 4.2.0 4.0.1` become
/// `4.0.1 4.2.0 4.0.1`.
pub fn versions(restarts: &[Restart]) -> Vec<String> {
    restarts
        .iter()
        .map(|(version, _record)| version.clone())
        .dedup()
        .collect()
}
