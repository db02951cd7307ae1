// src/common.rs

//! Common imports, type aliases, and other globals for _logfile_ff_.

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use std::fs::File;

/// `F`ake `Path` or `F`ile `Path`.
pub type FPath = String;

/// Offset into a file in bytes. zero first.
pub type FileOffset = u64;

/// Size of a file in bytes.
pub type FileSz = u64;

/// A general-purpose counting type.
pub type Count = u64;

/// Sequence of bytes.
pub type Bytes = Vec<u8>;

/// Single-byte newline char as u8.
#[allow(non_upper_case_globals)]
pub const NLu8: u8 = 10;

/// Carriage return as u8.
#[allow(non_upper_case_globals)]
pub const CRu8: u8 = 13;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// custom Result enum for searching functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `Result` Extended.
///
/// For searching functions where "nothing was found" is an expected outcome
/// and not an error, e.g. [`LineLocator::locate_line`].
///
/// [`LineLocator::locate_line`]: crate::readers::linelocator::LineLocator#method.locate_line
#[derive(Debug)]
pub enum ResultS3<T, E> {
    /// Contains the success data.
    Found(T),
    /// Nothing to return, but no bad errors happened.
    Done,
    /// Contains the error value, something bad happened.
    Err(E),
}

impl<T, E> ResultS3<T, E> {
    /// Converts from `ResultS3<T, E>` to [`Option<T>`], discarding the
    /// error, if any.
    #[inline(always)]
    pub fn ok(self) -> Option<T> {
        match self {
            ResultS3::Found(x) => Some(x),
            ResultS3::Done => None,
            ResultS3::Err(_) => None,
        }
    }

    /// Converts from `ResultS3<T, E>` to `Result<Option<T>, E>`, so callers
    /// may use `?`.
    #[inline(always)]
    pub fn into_result(self) -> Result<Option<T>, E> {
        match self {
            ResultS3::Found(x) => Ok(Some(x)),
            ResultS3::Done => Ok(None),
            ResultS3::Err(err) => Err(err),
        }
    }
}

impl<T, E> From<Result<Option<T>, E>> for ResultS3<T, E> {
    fn from(result: Result<Option<T>, E>) -> Self {
        match result {
            Ok(Some(x)) => ResultS3::Found(x),
            Ok(None) => ResultS3::Done,
            Err(err) => ResultS3::Err(err),
        }
    }
}
