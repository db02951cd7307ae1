// src/data/restart.rs

//! Recognize process restart banners within raw lines.
//!
//! A restart banner is a line written once when a server process starts.
//! It contains the keyword `version`, a marker naming which kind of process
//! wrote it, and a dotted numeric version, e.g.
//!
//! ```text
//! Mon Aug  5 20:53:23 [initandlisten] db version v2.4.5
//! 2021-01-01T00:00:00.000+0000 I CONTROL [main] mongos version v4.2.1
//! ```

use crate::data::logrecord::{BinaryKind, RestartMarker};

use ::bstr::ByteSlice; // adds `contains_str` onto `[u8]`
use ::lazy_static::lazy_static;
use ::regex::bytes::Regex;

/// A line must contain this to be a restart banner candidate.
pub const KEYWORD_VERSION: &str = "version";

/// Any of these marks a `mongos` banner.
pub const MARKERS_MONGOS: [&str; 2] = ["mongos", "MongoS"];

/// Any of these marks a `mongod` banner. Checked after [`MARKERS_MONGOS`].
pub const MARKERS_MONGOD: [&str; 2] = ["db version v", "mongod"];

lazy_static! {
    static ref REGEX_VERSION: Regex = Regex::new(r"(\d+\.\d+\.\d+)").unwrap();
}

/// Is `line` a restart banner candidate, i.e. does it contain the keyword
/// `version`?
#[inline(always)]
pub fn is_banner_candidate(line: &[u8]) -> bool {
    line.contains_str(KEYWORD_VERSION)
}

/// Classify a banner candidate `line` by its process marker.
///
/// Returns `None` if `line` is not a banner candidate or matches no marker.
pub fn banner_kind(line: &[u8]) -> Option<BinaryKind> {
    if !is_banner_candidate(line) {
        return None;
    }
    if MARKERS_MONGOS
        .iter()
        .any(|marker| line.contains_str(marker))
    {
        return Some(BinaryKind::Mongos);
    }
    if MARKERS_MONGOD
        .iter()
        .any(|marker| line.contains_str(marker))
    {
        return Some(BinaryKind::Mongod);
    }

    None
}

/// Extract the first dotted numeric version token from `line`.
pub fn banner_version(line: &[u8]) -> Option<String> {
    let captures = REGEX_VERSION.captures(line)?;
    let version = captures.get(1)?;

    Some(String::from_utf8_lossy(version.as_bytes()).into_owned())
}

/// Find the restart banner within `line`, if any.
pub fn find_restart(line: &[u8]) -> Option<RestartMarker> {
    let kind = banner_kind(line)?;
    let version = banner_version(line)?;

    Some(RestartMarker { version, kind })
}
