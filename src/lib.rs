// src/lib.rs

//! _logfile_ff_ reads metadata of server log files and fast-forwards
//! within them to a datetime.
//!
//! A [`LogFile`] wraps one [`LogStream`], a seekable file or a forward-only
//! stream such as standard input, and lazily answers
//! * the first and last timestamps
//! * the size in bytes and the count of lines
//! * the process restarts, the versions they announced, and the process
//!   kind (`mongod` or `mongos`)
//!
//! and positions the stream at the first line at or after a datetime
//! ([`LogFile::fast_forward`]) using a binary search over byte offsets.
//!
//! Lines are parsed by a [`LineParser`]; [`LogLineParser`] recognizes
//! ISO 8601 and ctime-style timestamps at the start of a line.
//!
//! ```no_run
//! use logfile_ff::data::datetime::{ymdhms, offset_utc};
//! use logfile_ff::data::logline::LogLineParser;
//! use logfile_ff::readers::fastforward::FastForward;
//! use logfile_ff::readers::logfile::LogFile;
//! use logfile_ff::readers::logstream::LogStream;
//!
//! let file = std::fs::File::open("/var/log/mongodb/mongod.log").unwrap();
//! let mut logfile = LogFile::new(LogStream::from_file(file), LogLineParser::default());
//! println!("{:?} to {:?}", logfile.start().unwrap(), logfile.end().unwrap());
//! let dt = ymdhms(&offset_utc(), 2021, 1, 1, 12, 0, 0);
//! if let FastForward::Positioned(_) = logfile.fast_forward(&dt).unwrap() {
//!     for record in logfile.iter_from_position() {
//!         println!("{}", record.unwrap());
//!     }
//! }
//! ```
//!
//! [`LogFile`]: crate::readers::logfile::LogFile
//! [`LogFile::fast_forward`]: crate::readers::logfile::LogFile#method.fast_forward
//! [`LogStream`]: crate::readers::logstream::LogStream
//! [`LineParser`]: crate::data::logline::LineParser
//! [`LogLineParser`]: crate::data::logline::LogLineParser

pub mod common;
pub mod data;
pub mod debug;
pub mod readers;
#[cfg(test)]
pub mod tests;
