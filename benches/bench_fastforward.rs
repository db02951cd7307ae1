// benches/bench_fastforward.rs

//! Compare fast-forward by bisection against reading every line up to the
//! target, for a log of many thousands of lines.

#![allow(non_upper_case_globals, non_snake_case)]

extern crate criterion;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

extern crate lazy_static;
use lazy_static::lazy_static;

extern crate logfile_ff;
use logfile_ff::data::datetime::{offset_utc, ymdhms, DateTimeL};
use logfile_ff::data::logline::LogLineParser;
use logfile_ff::readers::fastforward::{
    fast_forward_seekable,
    fast_forward_stream,
    FastForward,
    FastForwardStats,
    CONVERGENCE_SZ_DEF,
};
use logfile_ff::readers::linelocator::WINDOW_SZ_DEF;

use std::io::Cursor;

const LINES: u32 = 50_000;

lazy_static! {
    static ref Data: String = {
        let mut data = String::with_capacity(LINES as usize * 100);
        for i in 0..LINES {
            data.push_str(&format!(
                "2021-03-01T{:02}:{:02}:{:02}.000+0000 I NETWORK  [conn{}] message {}\n",
                i / 3600,
                (i / 60) % 60,
                i % 60,
                i % 13,
                i,
            ));
        }
        data
    };
    static ref Parser: LogLineParser = LogLineParser::new(offset_utc(), 2021);
    /// near the end of `Data`
    static ref Target: DateTimeL = ymdhms(&offset_utc(), 2021, 3, 1, 13, 0, 0);
}

fn ff_seekable() -> FastForward {
    let mut cursor = Cursor::new(Data.as_bytes());
    let mut stats = FastForwardStats::default();
    fast_forward_seekable(
        &mut cursor,
        &*Parser,
        Data.len() as u64,
        &Target,
        WINDOW_SZ_DEF,
        CONVERGENCE_SZ_DEF,
        &mut stats,
    )
    .unwrap()
}

fn ff_stream() -> FastForward {
    let mut cursor = Cursor::new(Data.as_bytes());
    let mut stats = FastForwardStats::default();
    fast_forward_stream(&mut cursor, &*Parser, &Target, &mut stats).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut bg = c.benchmark_group("fast_forward");
    bg.bench_function("ff_seekable", |b| b.iter(|| black_box(ff_seekable())));
    bg.bench_function("ff_stream", |b| b.iter(|| black_box(ff_stream())));
    bg.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
