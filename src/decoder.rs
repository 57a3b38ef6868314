//! Decoder collaborator contract.
//!
//! The resolver drives any decoder that implements [`FrameDecoder`]. The
//! trait mirrors what a low-level decode loop actually offers: decode the
//! next frame in presentation order, report the most recently decoded frame,
//! report buffer occupancy, and discard buffered-but-unconsumed data. The
//! decode cursor is assumed monotonic — each [`decode_next`] advances forward
//! in presentation time unless the container repositions it externally.
//!
//! [`decode_next`]: FrameDecoder::decode_next

use crate::{error::FrameSeekError, timestamp::Timestamp};

/// An opaque decoded unit carrying a presentation timestamp.
///
/// The resolver never mutates frames; it only reads their timestamps. A
/// frame reference is valid until the next decode or discard call on its
/// decoder.
pub trait TimedFrame {
    /// The frame's presentation timestamp, in its stream's time base.
    fn timestamp(&self) -> Timestamp;
}

/// The decode-side collaborator contract consumed by
/// [`TimeResolver`](crate::TimeResolver).
///
/// One decoder is bound per stream. Implementations are not required to be
/// thread-safe; the resolver is a single-threaded, synchronous layer and
/// callers needing concurrency must serialize externally.
pub trait FrameDecoder {
    /// The decoded frame type produced by this decoder.
    type Frame: TimedFrame;

    /// Decode and return the next frame, advancing the decode cursor by
    /// exactly one unit.
    ///
    /// # Errors
    ///
    /// [`FrameSeekError::EndOfStream`] when no more data exists, or
    /// [`FrameSeekError::Decode`] on corrupt bitstream data.
    fn decode_next(&mut self) -> Result<&Self::Frame, FrameSeekError>;

    /// The most recently decoded frame, or `None` before the first decode.
    ///
    /// Pure read; discarding the buffer does not change it.
    fn recent_frame(&self) -> Option<&Self::Frame>;

    /// Whether no already-decoded data is pending consumption.
    fn is_buffer_empty(&self) -> bool;

    /// Drop any already-decoded-but-unconsumed data.
    ///
    /// Idempotent and best-effort; safe to call when the buffer is already
    /// empty. Does not change the recent frame.
    fn discard_buffer(&mut self);

    /// Timestamp of the most recently decoded frame, or
    /// [`Timestamp::UNSET`] before the first decode.
    fn recent_timestamp(&self) -> Timestamp {
        self.recent_frame()
            .map_or(Timestamp::UNSET, TimedFrame::timestamp)
    }

    /// Decode sequentially until the recent frame's timestamp reaches or
    /// passes `target`.
    ///
    /// A no-op when the recent frame already satisfies the target. Never
    /// decodes backward.
    ///
    /// # Errors
    ///
    /// Propagates [`decode_next`](FrameDecoder::decode_next) failures,
    /// including [`FrameSeekError::EndOfStream`] when the stream ends before
    /// `target` is reached.
    fn skip_to(&mut self, target: Timestamp) -> Result<(), FrameSeekError> {
        while self.recent_timestamp() < target {
            self.decode_next()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tick(i64);

    impl TimedFrame for Tick {
        fn timestamp(&self) -> Timestamp {
            Timestamp::new(self.0)
        }
    }

    struct ScriptedDecoder {
        frames: Vec<i64>,
        cursor: usize,
        recent: Option<Tick>,
    }

    impl ScriptedDecoder {
        fn new(frames: Vec<i64>) -> Self {
            ScriptedDecoder {
                frames,
                cursor: 0,
                recent: None,
            }
        }
    }

    impl FrameDecoder for ScriptedDecoder {
        type Frame = Tick;

        fn decode_next(&mut self) -> Result<&Tick, FrameSeekError> {
            let pts = *self
                .frames
                .get(self.cursor)
                .ok_or(FrameSeekError::EndOfStream)?;
            self.cursor += 1;
            self.recent = Some(Tick(pts));
            Ok(self.recent.as_ref().unwrap())
        }

        fn recent_frame(&self) -> Option<&Tick> {
            self.recent.as_ref()
        }

        fn is_buffer_empty(&self) -> bool {
            true
        }

        fn discard_buffer(&mut self) {}
    }

    #[test]
    fn skip_to_stops_at_first_frame_at_or_after_target() {
        let mut decoder = ScriptedDecoder::new(vec![0, 10, 20, 30, 40]);
        decoder.skip_to(Timestamp::new(15)).unwrap();
        assert_eq!(decoder.recent_timestamp(), Timestamp::new(20));
    }

    #[test]
    fn skip_to_is_a_no_op_when_already_positioned() {
        let mut decoder = ScriptedDecoder::new(vec![0, 10, 20]);
        decoder.skip_to(Timestamp::new(10)).unwrap();
        decoder.skip_to(Timestamp::new(5)).unwrap();
        assert_eq!(decoder.recent_timestamp(), Timestamp::new(10));
    }

    #[test]
    fn skip_to_reports_end_of_stream() {
        let mut decoder = ScriptedDecoder::new(vec![0, 10]);
        let result = decoder.skip_to(Timestamp::new(100));
        assert!(matches!(result, Err(FrameSeekError::EndOfStream)));
        assert_eq!(decoder.recent_timestamp(), Timestamp::new(10));
    }

    #[test]
    fn recent_timestamp_is_unset_before_first_decode() {
        let decoder = ScriptedDecoder::new(vec![0]);
        assert_eq!(decoder.recent_timestamp(), Timestamp::UNSET);
    }
}
