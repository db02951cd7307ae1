// src/data/mod.rs

//! The `data` module is specialized data containers and the parsing of
//! raw lines into them.
//!
//! ## Definitions of data
//!
//! ### Line
//!
//! A "line" is sequence of bytes that:
//!
//! * begins after a prior "line" or at the beginning of a file.
//! * ends with a newline character `'\n'` or the end of a file.
//!
//! ### LogRecord
//!
//! A [`LogRecord`] is one "line" passed through a [`LineParser`]. It may
//! have a timestamp and may have a [`RestartMarker`].
//!
//! A "line" without a timestamp is normal, e.g. the continuation lines of a
//! multi-line message or a stack trace.
//!
//! ### Restart banner
//!
//! A "line" written once by a server process at startup, naming the
//! process version and the process kind ([`BinaryKind`]).
//!
//! [`LogRecord`]: crate::data::logrecord::LogRecord
//! [`RestartMarker`]: crate::data::logrecord::RestartMarker
//! [`BinaryKind`]: crate::data::logrecord::BinaryKind
//! [`LineParser`]: crate::data::logline::LineParser

pub mod datetime;
pub mod logline;
pub mod logrecord;
pub mod restart;
