//! Immutable per-stream metadata.

use ffmpeg_next::Rational;

use crate::timestamp::{Timestamp, seek_threshold};

/// Immutable metadata for one media stream, captured when the stream is
/// opened.
///
/// The time base, duration and stream index never change for the lifetime of
/// the stream, so a [`TimeResolver`](crate::TimeResolver) copies this once at
/// construction and derives its seek threshold from it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub struct StreamInfo {
    time_base: Rational,
    duration: Timestamp,
    index: usize,
}

impl StreamInfo {
    /// Create stream metadata from its time base, total duration in ticks,
    /// and container stream index.
    pub fn new(time_base: Rational, duration: Timestamp, index: usize) -> Self {
        StreamInfo {
            time_base,
            duration,
            index,
        }
    }

    /// The stream's time base (seconds per tick, as a rational).
    #[must_use]
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    /// Total stream duration in ticks of [`time_base`](StreamInfo::time_base).
    pub fn duration(&self) -> Timestamp {
        self.duration
    }

    /// Index of this stream within its container.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The seek-avoidance threshold for this stream, in ticks.
    ///
    /// See [`seek_threshold`].
    pub fn seek_threshold(&self) -> Timestamp {
        seek_threshold(self.time_base)
    }
}
