// src/readers/logstream.rs

//! Implements [`LogStream`], the byte source beneath a [`LogFile`].
//!
//! [`LogFile`]: crate::readers::logfile::LogFile

use crate::common::{Bytes, File, NLu8};

use std::fmt;
use std::io::{BufRead, BufReader, Read, Result, Seek};

/// Combination of [`Read`] and [`Seek`] usable as a trait object.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// Buffered reader for a seekable source.
pub type SeekableReader = BufReader<Box<dyn ReadSeek>>;

/// Buffered reader for a forward-only source.
pub type ForwardOnlyReader = BufReader<Box<dyn Read>>;

/// A byte-oriented, line-delimited source of log data.
///
/// The variant is chosen once at construction and never changes. Every
/// operation of a `LogFile` branches on it exactly once, on entry.
///
/// * `Seekable` supports absolute and relative seeks, position queries
///   and size queries. All lazy features of `LogFile` are available.
/// * `ForwardOnly` supports only reading the next line, e.g. a pipe or
///   standard input. Time bounds are not available and fast-forward
///   degrades to a linear scan.
pub enum LogStream {
    Seekable(SeekableReader),
    ForwardOnly(ForwardOnlyReader),
}

impl fmt::Debug for LogStream {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        match self {
            LogStream::Seekable(reader) => f
                .debug_struct("LogStream::Seekable")
                .field("buffered", &reader.buffer().len())
                .finish(),
            LogStream::ForwardOnly(reader) => f
                .debug_struct("LogStream::ForwardOnly")
                .field("buffered", &reader.buffer().len())
                .finish(),
        }
    }
}

impl LogStream {
    /// Create a seekable `LogStream`.
    pub fn seekable<R>(reader: R) -> LogStream
    where
        R: Read + Seek + 'static,
    {
        LogStream::Seekable(BufReader::new(Box::new(reader)))
    }

    /// Create a forward-only `LogStream`.
    ///
    /// A seekable `reader` may be passed; it will not be seeked.
    pub fn forward_only<R>(reader: R) -> LogStream
    where
        R: Read + 'static,
    {
        LogStream::ForwardOnly(BufReader::new(Box::new(reader)))
    }

    /// Create a seekable `LogStream` from an opened `File`.
    pub fn from_file(file: File) -> LogStream {
        LogStream::seekable(file)
    }

    /// Create a forward-only `LogStream` reading standard input.
    pub fn stdin() -> LogStream {
        LogStream::forward_only(std::io::stdin())
    }

    /// Does this stream support seeking?
    #[inline(always)]
    pub const fn is_seekable(&self) -> bool {
        matches!(self, LogStream::Seekable(_))
    }

    /// Read the next line into `buffer`, including the terminating newline
    /// if there is one. `buffer` is cleared first.
    ///
    /// Returns the count of bytes read, `0` at end of stream.
    pub fn read_line(
        &mut self,
        buffer: &mut Bytes,
    ) -> Result<usize> {
        buffer.clear();
        match self {
            LogStream::Seekable(reader) => reader.read_until(NLu8, buffer),
            LogStream::ForwardOnly(reader) => reader.read_until(NLu8, buffer),
        }
    }
}
