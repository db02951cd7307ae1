// src/readers/linelocator.rs

//! Implements a [`LineLocator`], which finds the line enclosing (or
//! preceding) an arbitrary byte offset of a seekable stream without reading
//! the whole stream.
//!
//! The underlying medium only supports forward sequential reads and reads at
//! absolute offsets. "Previous line" is approximated by reading a
//! fixed-size window of bytes preceding an offset and searching that window
//! for line breaks. A line longer than the window cannot be located; that is
//! reported as "not found" ([`ResultS3::Done`]) rather than searching
//! further back.
//!
//! [`ResultS3::Done`]: crate::common::ResultS3

use crate::common::{Bytes, Count, FileOffset, NLu8, ResultS3};
use crate::data::datetime::DateTimeL;
use crate::data::logline::LineParser;
use crate::data::logrecord::LogRecord;
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::buffer_to_String_noraw;

use std::fmt;
use std::io::{BufRead, Error, Read, Result, Seek, SeekFrom};

use ::memchr::memrchr;
use ::more_asserts::assert_ge;
#[allow(unused_imports)]
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

/// Default size in bytes of the window searched for a line boundary.
///
/// Lines of typical server logs are well under 10,000 bytes.
pub const WINDOW_SZ_DEF: u64 = 15_000;

/// Minimum size in bytes of the window searched for a line boundary.
pub const WINDOW_SZ_MIN: u64 = 2;

/// A line found by a [`LineLocator`]. Always has a timestamp.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocatedLine {
    /// Offset of the first byte of the line.
    pub fileoffset_begin: FileOffset,
    /// Offset one past the last byte of the line (including the newline).
    pub fileoffset_end: FileOffset,
    /// Timestamp of `record`.
    pub dt: DateTimeL,
    pub record: LogRecord,
}

impl LocatedLine {
    /// Length of the line in bytes, including the newline.
    #[inline(always)]
    pub const fn len(&self) -> u64 {
        self.fileoffset_end - self.fileoffset_begin
    }

    /// Is the line zero bytes? Never true for a located line.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`LineLocator::locate_line`] result.
///
/// [`LineLocator::locate_line`]: self::LineLocator#method.locate_line
pub type ResultS3LineLocate = ResultS3<LocatedLine, Error>;

/// Finds lines near byte offsets of a seekable reader and parses them with
/// a [`LineParser`].
///
/// Every method repositions the reader; callers must not assume the reader
/// position is unchanged.
///
/// _XXX: not a rust "Reader"; does not implement trait [`Read`]._
pub struct LineLocator<'a, R, P: ?Sized> {
    reader: &'a mut R,
    parser: &'a P,
    /// Size in bytes of the window searched for a line boundary.
    window: u64,
    /// Reusable line buffer.
    buffer: Bytes,
    /// Internal stats - calls to `locate_line`.
    pub(crate) count_locate: Count,
    /// Internal stats - lines passed to the parser.
    pub(crate) count_parsed: Count,
}

impl<R, P: ?Sized> fmt::Debug for LineLocator<'_, R, P> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("LineLocator")
            .field("window", &self.window)
            .field("count_locate", &self.count_locate)
            .field("count_parsed", &self.count_parsed)
            .finish()
    }
}

impl<'a, R, P> LineLocator<'a, R, P>
where
    R: BufRead + Seek,
    P: LineParser + ?Sized,
{
    pub fn new(
        reader: &'a mut R,
        parser: &'a P,
        window: u64,
    ) -> LineLocator<'a, R, P> {
        assert_ge!(window, WINDOW_SZ_MIN, "window {} is too small", window);
        LineLocator {
            reader,
            parser,
            window,
            buffer: Bytes::with_capacity(1024),
            count_locate: 0,
            count_parsed: 0,
        }
    }

    /// The window size in bytes.
    #[inline(always)]
    pub const fn window(&self) -> u64 {
        self.window
    }

    /// Current position of the underlying reader.
    pub fn position(&mut self) -> Result<FileOffset> {
        self.reader.stream_position()
    }

    /// Move the underlying reader.
    pub fn seek(
        &mut self,
        pos: SeekFrom,
    ) -> Result<FileOffset> {
        self.reader.seek(pos)
    }

    /// Find the line enclosing `fileoffset` (or the line before it) and
    /// return it parsed.
    ///
    /// When `previous` is `false`, the line enclosing `fileoffset` is found
    /// and lines are read forward from there until one has a timestamp.
    /// Exhausting the reader returns `Done`.
    ///
    /// When `previous` is `true`, the nearest line with a timestamp that
    /// precedes the line enclosing `fileoffset` is returned. Untimestamped
    /// lines in between are passed over, but only within the window. A line
    /// at or after the enclosing line is never returned; if none precedes,
    /// `Done` is returned.
    ///
    /// The window is clipped at the start of the file, and the start of the
    /// file counts as a line boundary. Otherwise a window without the needed
    /// line break returns `Done`.
    ///
    /// Upon `Found`, the reader is positioned at the returned
    /// `LocatedLine.fileoffset_end`.
    pub fn locate_line(
        &mut self,
        fileoffset: FileOffset,
        previous: bool,
    ) -> ResultS3LineLocate {
        dpfn!("({}, previous={})", fileoffset, previous);
        self.count_locate += 1;
        let result = if previous {
            self.locate_preceding(fileoffset)
        } else {
            self.locate_enclosing(fileoffset)
        };
        match &result {
            Ok(Some(located)) => {
                dpfx!(
                    "return Found([{}, {}) {:?})",
                    located.fileoffset_begin,
                    located.fileoffset_end,
                    located.record.raw
                );
            }
            Ok(None) => {
                dpfx!("return Done");
            }
            Err(_err) => {
                dpfx!("return Err({})", _err);
            }
        }

        ResultS3LineLocate::from(result)
    }

    /// Read up to `self.window` bytes immediately preceding `fileoffset`.
    ///
    /// Returns the offset of the first byte read and the bytes.
    fn read_window(
        &mut self,
        fileoffset: FileOffset,
    ) -> Result<(FileOffset, Bytes)> {
        let jump_back: u64 = std::cmp::min(fileoffset, self.window);
        let fo_window: FileOffset = fileoffset - jump_back;
        self.reader.seek(SeekFrom::Start(fo_window))?;
        let mut window = Bytes::with_capacity(jump_back as usize);
        (&mut *self.reader)
            .take(jump_back)
            .read_to_end(&mut window)?;
        #[cfg(any(debug_assertions, test))]
        dpfo!("window [{}, {}) {:?}", fo_window, fileoffset, buffer_to_String_noraw(&window));

        Ok((fo_window, window))
    }

    fn locate_enclosing(
        &mut self,
        fileoffset: FileOffset,
    ) -> Result<Option<LocatedLine>> {
        let (fo_window, window) = self.read_window(fileoffset)?;
        let fo_begin: FileOffset = match memrchr(NLu8, &window) {
            Some(index) => fo_window + index as FileOffset + 1,
            None if fo_window == 0 => 0,
            None => {
                dpfo!("no newline within window of {} bytes", window.len());
                return Ok(None);
            }
        };

        self.next_timestamped_line(fo_begin)
    }

    fn locate_preceding(
        &mut self,
        fileoffset: FileOffset,
    ) -> Result<Option<LocatedLine>> {
        let (fo_window, window) = self.read_window(fileoffset)?;
        // the enclosing line begins after this newline, the preceding line
        // ends with it
        let mut index_end: usize = match memrchr(NLu8, &window) {
            Some(index) => index,
            None => {
                dpfo!("enclosing line begins the window, nothing precedes it");
                return Ok(None);
            }
        };
        loop {
            let index_begin: usize = match memrchr(NLu8, &window[..index_end]) {
                Some(index) => index + 1,
                None if fo_window == 0 => 0,
                None => {
                    dpfo!("window exhausted at index_end {}", index_end);
                    return Ok(None);
                }
            };
            let line: &[u8] = &window[index_begin..=index_end];
            self.count_parsed += 1;
            let record: LogRecord = self.parser.parse(line);
            if let Some(dt) = record.timestamp {
                let fileoffset_begin = fo_window + index_begin as FileOffset;
                let fileoffset_end = fo_window + index_end as FileOffset + 1;
                self.reader
                    .seek(SeekFrom::Start(fileoffset_end))?;
                return Ok(Some(LocatedLine {
                    fileoffset_begin,
                    fileoffset_end,
                    dt,
                    record,
                }));
            }
            if index_begin == 0 {
                return Ok(None);
            }
            index_end = index_begin - 1;
        }
    }

    /// Read lines forward from `fileoffset`, which should be the beginning
    /// of a line, until a line with a timestamp is found.
    ///
    /// Returns `None` if the reader is exhausted first.
    pub fn next_timestamped_line(
        &mut self,
        fileoffset: FileOffset,
    ) -> Result<Option<LocatedLine>> {
        self.reader
            .seek(SeekFrom::Start(fileoffset))?;
        let mut fileoffset_begin: FileOffset = fileoffset;
        loop {
            self.buffer.clear();
            let count = self
                .reader
                .read_until(NLu8, &mut self.buffer)?;
            if count == 0 {
                return Ok(None);
            }
            let fileoffset_end: FileOffset = fileoffset_begin + count as FileOffset;
            self.count_parsed += 1;
            let record: LogRecord = self.parser.parse(&self.buffer);
            if let Some(dt) = record.timestamp {
                return Ok(Some(LocatedLine {
                    fileoffset_begin,
                    fileoffset_end,
                    dt,
                    record,
                }));
            }
            fileoffset_begin = fileoffset_end;
        }
    }
}
