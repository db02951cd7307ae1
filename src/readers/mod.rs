// src/readers/mod.rs

//! "Readers" for _logfile_ff_.
//!
//! ## Overview of readers
//!
//! * A [`LogFile`] drives a [`LogStream`] to derive metadata and to
//!   fast-forward to a datetime.
//! * Fast-forward drives a [`LineLocator`] to derive [`LocatedLine`s].
//! * The boundary scan and full scan of [`metadata`] read a `LogStream`
//!   directly.
//!
//! <br/>
//!
//! * A `LineLocator` only handles `u8` bytes. Lines become [`LogRecord`s]
//!   by way of a [`LineParser`].
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [`Read`]: std::io::Read
//! [`LogFile`]: crate::readers::logfile::LogFile
//! [`LogStream`]: crate::readers::logstream::LogStream
//! [`LineLocator`]: crate::readers::linelocator::LineLocator
//! [`LocatedLine`s]: crate::readers::linelocator::LocatedLine
//! [`metadata`]: crate::readers::metadata
//! [`LogRecord`s]: crate::data::logrecord::LogRecord
//! [`LineParser`]: crate::data::logline::LineParser

pub mod fastforward;
pub mod linelocator;
pub mod logfile;
pub mod logstream;
pub mod metadata;
