// src/readers/fastforward.rs

//! "Fast-forward": position a stream so the next line read is the first line
//! with a timestamp at or after a target datetime.
//!
//! For a seekable stream this is a binary search over byte offsets,
//! O(log(n)) in the size of the file, using a [`LineLocator`] to evaluate
//! "is the timestamp at this offset at or after the target?".
//!
//! Bisection over byte offsets only lands *near* the first matching line;
//! it may land anywhere in a run of lines with equal timestamps, or just
//! before the first match. Afterward the candidate line is corrected:
//! backward, one timestamped line at a time, while the preceding line still
//! matches; or forward, if the candidate precedes the target. Among lines
//! with equal timestamps the earliest in file order is the match.
//!
//! For a forward-only stream lines are read and discarded until one matches.
//! That line has then been consumed from the stream; it is handed back to
//! the caller in [`FastForward::Consumed`].
//!
//! [`LineLocator`]: crate::readers::linelocator::LineLocator

use crate::common::{Bytes, Count, FileOffset, FileSz, NLu8};
use crate::data::datetime::DateTimeL;
use crate::data::logline::LineParser;
use crate::data::logrecord::LogRecord;
use crate::readers::linelocator::{LineLocator, LocatedLine};

use std::io::{BufRead, Result, Seek, SeekFrom};

use ::more_asserts::debug_assert_le;
#[allow(unused_imports)]
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

/// Default bisection convergence threshold in bytes. Bisection stops once
/// the step size is at or below this.
pub const CONVERGENCE_SZ_DEF: u64 = 100;

/// Minimum bisection convergence threshold in bytes.
pub const CONVERGENCE_SZ_MIN: u64 = 1;

/// Outcome of a fast-forward.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FastForward {
    /// Seekable stream: positioned at this offset, the beginning of the first
    /// line at or after the target.
    Positioned(FileOffset),
    /// Forward-only stream: the first line at or after the target was read
    /// from the stream. The next line read is the one after it.
    Consumed(LogRecord),
    /// No line is at or after the target. The stream is at its end.
    Exhausted,
    /// The stream has no timestamped line. The stream is positioned at `0`.
    NotFound,
}

/// Internal stats of one fast-forward.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FastForwardStats {
    /// Bisection steps taken.
    pub bisect_steps: Count,
    /// Lines stepped backward during correction.
    pub backward_steps: Count,
    /// Lines stepped forward, during correction or a forward-only scan.
    pub forward_steps: Count,
    /// Calls to `LineLocator::locate_line`.
    pub locate_calls: Count,
}

/// Halve `step`, rounding toward positive infinity, e.g. `75` becomes `38`
/// and `-75` becomes `-37`.
#[inline(always)]
pub(crate) const fn halve_step(step: i64) -> i64 {
    if step > 0 {
        (step + 1) / 2
    } else {
        step / 2
    }
}

/// Fast-forward a seekable `reader` of `size` bytes to the first line with a
/// timestamp at or after `dt_target`.
///
/// 1. bisection: starting from offset `0` with a step of `size`, halve the
///    step and move by it relative to the current position, then locate the
///    line there. A line at or after the target makes the next step go
///    backward, otherwise forward. Stop when the step is at or below
///    `convergence`, or when no line can be located.
/// 2. correct the last located line backward, or forward, to the first
///    matching line.
/// 3. seek to the beginning of that line.
///
/// If a file is no larger than `convergence`, or bisection located no line,
/// then the file is scanned forward from offset `0` for a candidate. That
/// scan may read the entire file, e.g. when all timestamps are in the first
/// half of the file followed by many untimestamped lines.
///
/// `locate_calls` in `stats` is not updated when an `Err` is returned.
pub fn fast_forward_seekable<R, P>(
    reader: &mut R,
    parser: &P,
    size: FileSz,
    dt_target: &DateTimeL,
    window: u64,
    convergence: u64,
    stats: &mut FastForwardStats,
) -> Result<FastForward>
where
    R: BufRead + Seek,
    P: LineParser + ?Sized,
{
    dpfn!("(…, …, size={}, {:?}, window={}, convergence={})", size, dt_target, window, convergence);
    reader.seek(SeekFrom::Start(0))?;
    let mut locator = LineLocator::new(reader, parser, window);

    let mut step: i64 = size as i64;
    let mut position: FileOffset = 0;
    let mut located_last: Option<LocatedLine> = None;
    while step.unsigned_abs() > convergence {
        step = halve_step(step);
        position = (position as i64 + step).clamp(0, size as i64) as FileOffset;
        stats.bisect_steps += 1;
        dpfo!("bisect step {:6} to position {}", step, position);
        match locator.locate_line(position, false).into_result()? {
            Some(located) => {
                position = located.fileoffset_end;
                step = if located.dt >= *dt_target {
                    -step.abs()
                } else {
                    step.abs()
                };
                located_last = Some(located);
            }
            None => {
                dpfo!("no line located at {}, bisection stops", position);
                break;
            }
        }
    }

    // bisection located nothing when the file is tiny, or when no
    // timestamped line follows the midpoint
    let mut candidate: LocatedLine = match located_last {
        Some(located) => located,
        None => match locator.next_timestamped_line(0)? {
            Some(located) => located,
            None => {
                stats.locate_calls += locator.count_locate;
                locator.seek(SeekFrom::Start(0))?;
                dpfx!("return NotFound; no timestamped lines");
                return Ok(FastForward::NotFound);
            }
        },
    };
    dpfo!("candidate [{}, {}) {:?}", candidate.fileoffset_begin, candidate.fileoffset_end, candidate.dt);

    // walk backward while the preceding line is also at or after the target
    while candidate.dt >= *dt_target && candidate.fileoffset_begin > 0 {
        match locator.locate_line(candidate.fileoffset_begin, true).into_result()? {
            Some(located) if located.dt >= *dt_target => {
                stats.backward_steps += 1;
                debug_assert_le!(located.fileoffset_end, candidate.fileoffset_begin);
                candidate = located;
            }
            Some(_) | None => break,
        }
    }

    // walk forward while the candidate is before the target
    while candidate.dt < *dt_target {
        match locator.next_timestamped_line(candidate.fileoffset_end)? {
            Some(located) => {
                stats.forward_steps += 1;
                candidate = located;
            }
            None => {
                stats.locate_calls += locator.count_locate;
                locator.seek(SeekFrom::End(0))?;
                dpfx!("return Exhausted");
                return Ok(FastForward::Exhausted);
            }
        }
    }

    stats.locate_calls += locator.count_locate;
    locator.seek(SeekFrom::Start(candidate.fileoffset_begin))?;
    dpfx!("return Positioned({}) {:?}", candidate.fileoffset_begin, candidate.record.raw);

    Ok(FastForward::Positioned(candidate.fileoffset_begin))
}

/// Fast-forward a forward-only `reader` by reading lines until one has a
/// timestamp at or after `dt_target`.
///
/// The matching line is consumed; it is returned in
/// [`FastForward::Consumed`].
pub fn fast_forward_stream<R, P>(
    reader: &mut R,
    parser: &P,
    dt_target: &DateTimeL,
    stats: &mut FastForwardStats,
) -> Result<FastForward>
where
    R: BufRead,
    P: LineParser + ?Sized,
{
    dpfn!("(…, …, {:?})", dt_target);
    let mut buffer = Bytes::with_capacity(1024);
    loop {
        buffer.clear();
        if reader.read_until(NLu8, &mut buffer)? == 0 {
            dpfx!("return Exhausted");
            return Ok(FastForward::Exhausted);
        }
        let record: LogRecord = parser.parse(&buffer);
        if record.at_or_after(dt_target) {
            dpfx!("return Consumed({:?})", record.raw);
            return Ok(FastForward::Consumed(record));
        }
        stats.forward_steps += 1;
    }
}
