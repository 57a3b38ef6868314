//! Benchmarks for the timestamp-to-frame resolution heuristic.
//!
//! Run with: cargo bench
//!
//! The benches drive the resolver against a scripted in-memory stream so
//! they measure the heuristic itself (decision cost plus decode-step count)
//! rather than FFmpeg decode throughput.

use std::{cell::RefCell, rc::Rc};

use criterion::Criterion;
use ffmpeg_next::Rational;
use frameseek::{
    FrameDecoder, FrameSeekError, StreamInfo, StreamSeeker, TimeResolver, TimedFrame, Timestamp,
};

const FRAME_STEP: i64 = 5;
const LAST_FRAME: i64 = 9_000;
const KEYFRAME_INTERVAL: i64 = 150;

struct BenchFrame {
    pts: i64,
}

impl TimedFrame for BenchFrame {
    fn timestamp(&self) -> Timestamp {
        Timestamp::new(self.pts)
    }
}

struct BenchStream {
    cursor: Rc<RefCell<i64>>,
    recent: Option<BenchFrame>,
}

impl FrameDecoder for BenchStream {
    type Frame = BenchFrame;

    fn decode_next(&mut self) -> Result<&BenchFrame, FrameSeekError> {
        let mut cursor = self.cursor.borrow_mut();
        if *cursor > LAST_FRAME {
            return Err(FrameSeekError::EndOfStream);
        }
        let pts = *cursor;
        *cursor += FRAME_STEP;
        drop(cursor);
        self.recent = Some(BenchFrame { pts });
        Ok(self.recent.as_ref().unwrap())
    }

    fn recent_frame(&self) -> Option<&BenchFrame> {
        self.recent.as_ref()
    }

    fn is_buffer_empty(&self) -> bool {
        true
    }

    fn discard_buffer(&mut self) {}
}

struct BenchSeeker {
    cursor: Rc<RefCell<i64>>,
}

impl StreamSeeker for BenchSeeker {
    fn seek_near(&mut self, target: Timestamp, _: usize) -> Result<(), FrameSeekError> {
        let clamped = target.ticks().clamp(0, LAST_FRAME);
        *self.cursor.borrow_mut() = (clamped / KEYFRAME_INTERVAL) * KEYFRAME_INTERVAL;
        Ok(())
    }
}

fn bench_resolver() -> TimeResolver<BenchStream, BenchSeeker> {
    let cursor = Rc::new(RefCell::new(0));
    let decoder = BenchStream {
        cursor: Rc::clone(&cursor),
        recent: None,
    };
    let seeker = BenchSeeker { cursor };
    let info = StreamInfo::new(Rational::new(1, 30), Timestamp::new(LAST_FRAME), 0);
    TimeResolver::new(decoder, seeker, info)
}

fn benchmark_linear_scrub(criterion: &mut Criterion) {
    criterion.bench_function("linear scrub (short hops only)", |bencher| {
        bencher.iter(|| {
            let mut resolver = bench_resolver();
            let mut ts = 0;
            while ts <= LAST_FRAME {
                let _ = resolver.frame_at(Timestamp::new(ts)).unwrap();
                ts += FRAME_STEP * 2;
            }
        });
    });
}

fn benchmark_repeated_target(criterion: &mut Criterion) {
    criterion.bench_function("repeated target (exact-match fast path)", |bencher| {
        let mut resolver = bench_resolver();
        let _ = resolver.frame_at(Timestamp::new(4_500)).unwrap();
        bencher.iter(|| {
            let _ = resolver.frame_at(Timestamp::new(4_500)).unwrap();
        });
    });
}

fn benchmark_alternating_seeks(criterion: &mut Criterion) {
    criterion.bench_function("alternating far targets (seek-heavy)", |bencher| {
        bencher.iter(|| {
            let mut resolver = bench_resolver();
            for ts in [6_000, 1_200, 7_800, 300, 4_650] {
                let _ = resolver.frame_at(Timestamp::new(ts)).unwrap();
            }
        });
    });
}

criterion::criterion_group!(
    benches,
    benchmark_linear_scrub,
    benchmark_repeated_target,
    benchmark_alternating_seeks,
);
criterion::criterion_main!(benches);
