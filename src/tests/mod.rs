// src/tests/mod.rs

//! Tests for _logfile_ff_.
//!
//! Tests are placed at `src/tests/`, inside the library, for crate-internal
//! visibility, e.g. the internal stats counters of a [`LineLocator`].
//!
//! [`LineLocator`]: crate::readers::linelocator::LineLocator

pub mod common;
pub mod restart_tests;
