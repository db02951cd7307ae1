// src/readers/logfile.rs

//! Implements a [`LogFile`], lazy metadata and time-based positioning for
//! one [`LogStream`].
//!
//! A `LogFile` answers
//! * what time range does the stream cover? ([`start`], [`end`])
//! * how large is it, how many lines, which process restarts?
//!   ([`size`], [`line_count`], [`restarts`], [`binary`], [`versions`])
//! * where does a datetime first occur? ([`fast_forward`])
//!
//! without reading the whole stream into memory. Each metadata scan runs at
//! most once per `LogFile`; results are kept for the life of the `LogFile`.
//!
//! [`start`]: self::LogFile#method.start
//! [`end`]: self::LogFile#method.end
//! [`size`]: self::LogFile#method.size
//! [`line_count`]: self::LogFile#method.line_count
//! [`restarts`]: self::LogFile#method.restarts
//! [`binary`]: self::LogFile#method.binary
//! [`versions`]: self::LogFile#method.versions
//! [`fast_forward`]: self::LogFile#method.fast_forward

use crate::common::{Bytes, Count, FileSz};
use crate::data::datetime::{DateTimeL, DateTimeLOpt};
use crate::data::logline::{LineParser, LogLineParser};
use crate::data::logrecord::{BinaryKind, LogRecord};
use crate::readers::fastforward::{
    fast_forward_seekable,
    fast_forward_stream,
    FastForward,
    FastForwardStats,
    CONVERGENCE_SZ_DEF,
    CONVERGENCE_SZ_MIN,
};
use crate::readers::linelocator::{WINDOW_SZ_DEF, WINDOW_SZ_MIN};
use crate::readers::logstream::LogStream;
use crate::readers::metadata::{calculate_bounds, iterate_lines, versions, Bounds, LineSummary, Restart};

use std::fmt;
use std::io::{Result, Seek, SeekFrom};

use ::more_asserts::assert_ge;
use ::once_cell::unsync::OnceCell;
#[allow(unused_imports)]
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

/// Tunables of a [`LogFile`].
///
/// Both are trade-offs of speed and correctness tuned for typical server
/// log line lengths. A line longer than `window` cannot be located and is
/// unsupported.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LogFileSettings {
    /// Bytes searched backward from an offset for a line boundary.
    pub window: u64,
    /// Fast-forward bisection stops when its step is at or below this many
    /// bytes.
    pub convergence: u64,
}

impl LogFileSettings {
    pub fn new(
        window: u64,
        convergence: u64,
    ) -> LogFileSettings {
        assert_ge!(window, WINDOW_SZ_MIN, "window {} is too small", window);
        assert_ge!(convergence, CONVERGENCE_SZ_MIN, "convergence {} is too small", convergence);
        LogFileSettings {
            window,
            convergence,
        }
    }
}

impl Default for LogFileSettings {
    fn default() -> Self {
        LogFileSettings::new(WINDOW_SZ_DEF, CONVERGENCE_SZ_DEF)
    }
}

/// Internal stats of a [`LogFile`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LogFileStats {
    /// Count of boundary scans run. At most `1`.
    pub bounds_scans: Count,
    /// Count of full scans run. At most `1`.
    pub full_scans: Count,
    /// Count of calls to `fast_forward`.
    pub fast_forwards: Count,
    /// Sum of the stats of all fast-forwards.
    pub fastforward: FastForwardStats,
}

/// Lazy metadata and time-based positioning of one [`LogStream`].
///
/// A `LogFile` owns its `LogStream` for its entire life. Every method that
/// reads takes `&mut self` and so has exclusive use of the stream position
/// for its duration.
///
/// For a forward-only stream the time bounds and size are `None`. The line
/// count, restarts and binary are available but the scan that finds them
/// consumes the stream.
pub struct LogFile<P = LogLineParser> {
    stream: LogStream,
    parser: P,
    settings: LogFileSettings,
    /// boundary scan result, seekable streams only
    bounds: OnceCell<Bounds>,
    /// full scan result
    summary: OnceCell<LineSummary>,
    stats: LogFileStats,
}

impl<P> fmt::Debug for LogFile<P> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("LogFile")
            .field("stream", &self.stream)
            .field("settings", &self.settings)
            .field("bounds", &self.bounds.get())
            .field("line_count", &self.summary.get().map(|s| s.line_count))
            .field("stats", &self.stats)
            .finish()
    }
}

impl<P> LogFile<P>
where
    P: LineParser,
{
    /// Create a new `LogFile` with default [`LogFileSettings`].
    pub fn new(
        stream: LogStream,
        parser: P,
    ) -> LogFile<P> {
        LogFile::new_with_settings(stream, parser, LogFileSettings::default())
    }

    pub fn new_with_settings(
        stream: LogStream,
        parser: P,
        settings: LogFileSettings,
    ) -> LogFile<P> {
        dpfñ!("({:?}, …, {:?})", stream, settings);
        LogFile {
            stream,
            parser,
            settings,
            bounds: OnceCell::new(),
            summary: OnceCell::new(),
            stats: LogFileStats::default(),
        }
    }

    #[inline(always)]
    pub const fn is_seekable(&self) -> bool {
        self.stream.is_seekable()
    }

    #[inline(always)]
    pub const fn settings(&self) -> &LogFileSettings {
        &self.settings
    }

    #[inline(always)]
    pub const fn parser(&self) -> &P {
        &self.parser
    }

    #[inline(always)]
    pub const fn stats(&self) -> &LogFileStats {
        &self.stats
    }

    /// Release the `LogStream`.
    pub fn into_stream(self) -> LogStream {
        self.stream
    }

    /// Boundary scan results, scanning on first call. `None` for a
    /// forward-only stream.
    fn bounds(&mut self) -> Result<Option<&Bounds>> {
        let reader = match &mut self.stream {
            LogStream::Seekable(reader) => reader,
            LogStream::ForwardOnly(_) => return Ok(None),
        };
        let parser: &P = &self.parser;
        let window: u64 = self.settings.window;
        let stats: &mut LogFileStats = &mut self.stats;
        let bounds: &Bounds = self.bounds.get_or_try_init(|| {
            stats.bounds_scans += 1;
            calculate_bounds(reader, parser, window)
        })?;

        Ok(Some(bounds))
    }

    /// Full scan results, scanning on first call.
    fn summary(&mut self) -> Result<&LineSummary> {
        let stream: &mut LogStream = &mut self.stream;
        let parser: &P = &self.parser;
        let stats: &mut LogFileStats = &mut self.stats;

        self.summary.get_or_try_init(|| {
            stats.full_scans += 1;
            iterate_lines(stream, parser)
        })
    }

    /// Timestamp of the first timestamped line.
    ///
    /// If the last timestamp precedes this one then this is one year earlier
    /// than the line states (year "rollover").
    ///
    /// `None` for a forward-only stream or a stream without timestamps.
    pub fn start(&mut self) -> Result<DateTimeLOpt> {
        Ok(self.bounds()?.and_then(|bounds| bounds.start))
    }

    /// Timestamp of the last timestamped line near the end of the stream.
    ///
    /// `None` for a forward-only stream or a stream without timestamps.
    pub fn end(&mut self) -> Result<DateTimeLOpt> {
        Ok(self.bounds()?.and_then(|bounds| bounds.end))
    }

    /// Size in bytes. `None` for a forward-only stream.
    pub fn size(&mut self) -> Result<Option<FileSz>> {
        Ok(self.bounds()?.map(|bounds| bounds.size))
    }

    /// Count of lines.
    ///
    /// For a forward-only stream the lines are counted from the current
    /// position, and the stream is consumed.
    pub fn line_count(&mut self) -> Result<Count> {
        Ok(self.summary()?.line_count)
    }

    /// Same as [`line_count`](Self::line_count).
    pub fn len(&mut self) -> Result<Count> {
        self.line_count()
    }

    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.line_count()? == 0)
    }

    /// Process restarts, in file order.
    pub fn restarts(&mut self) -> Result<&[Restart]> {
        Ok(self.summary()?.restarts.as_slice())
    }

    /// The process kind named by the last restart banner.
    pub fn binary(&mut self) -> Result<Option<BinaryKind>> {
        Ok(self.summary()?.binary)
    }

    /// Versions of [`restarts`](Self::restarts), in order, with consecutive
    /// duplicates collapsed.
    pub fn versions(&mut self) -> Result<Vec<String>> {
        Ok(versions(self.restarts()?))
    }

    /// Iterate over every line from the beginning, parsing each.
    ///
    /// Each call starts over from offset `0`. A forward-only stream cannot
    /// start over; it is iterated from its current position.
    pub fn iter(&mut self) -> Result<LogRecords<'_, P>> {
        if let LogStream::Seekable(reader) = &mut self.stream {
            reader.seek(SeekFrom::Start(0))?;
        }

        Ok(self.iter_from_position())
    }

    /// Iterate over lines from the current position, parsing each.
    ///
    /// Typically called after [`fast_forward`](Self::fast_forward).
    pub fn iter_from_position(&mut self) -> LogRecords<'_, P> {
        LogRecords {
            stream: &mut self.stream,
            parser: &self.parser,
            buffer: Bytes::with_capacity(1024),
        }
    }

    /// Position the stream so the next line read is the first line with a
    /// timestamp at or after `dt_target`.
    ///
    /// A seekable stream is searched by bisection and is left positioned for
    /// [`iter_from_position`](Self::iter_from_position); see
    /// [`fast_forward_seekable`].
    ///
    /// A forward-only stream is read until the first matching line, which is
    /// thereby consumed and returned in [`FastForward::Consumed`]; see
    /// [`fast_forward_stream`].
    pub fn fast_forward(
        &mut self,
        dt_target: &DateTimeL,
    ) -> Result<FastForward> {
        dpfn!("({:?})", dt_target);
        self.stats.fast_forwards += 1;
        let size: FileSz = self.size()?.unwrap_or(0);
        let result = match &mut self.stream {
            LogStream::Seekable(reader) => fast_forward_seekable(
                reader,
                &self.parser,
                size,
                dt_target,
                self.settings.window,
                self.settings.convergence,
                &mut self.stats.fastforward,
            ),
            LogStream::ForwardOnly(reader) => {
                fast_forward_stream(reader, &self.parser, dt_target, &mut self.stats.fastforward)
            }
        };
        dpfx!("return {:?}", result);

        result
    }
}

/// Iterator over parsed lines of a [`LogFile`], see [`LogFile::iter`].
pub struct LogRecords<'a, P> {
    stream: &'a mut LogStream,
    parser: &'a P,
    buffer: Bytes,
}

impl<P> Iterator for LogRecords<'_, P>
where
    P: LineParser,
{
    type Item = Result<LogRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.stream.read_line(&mut self.buffer) {
            Ok(0) => None,
            Ok(_) => Some(Ok(self.parser.parse(&self.buffer))),
            Err(err) => Some(Err(err)),
        }
    }
}
