//! Timestamp-to-frame resolution.
//!
//! [`TimeResolver`] translates time-domain frame requests into ordered
//! operations against its decoder and container-seek collaborators. It owns
//! the "is this timestamp close enough to avoid a seek" heuristic and the
//! buffer-discard policy; all stream state lives in the decoder.
//!
//! The protocol it enforces on every seek path, in this order:
//! discard buffer → container seek (when needed) → sequential catch-up
//! decode.

use crate::{
    decoder::FrameDecoder,
    error::FrameSeekError,
    info::StreamInfo,
    seek::StreamSeeker,
    timestamp::Timestamp,
};

/// Resolves target timestamps to decoded frames with as few container seeks
/// as possible.
///
/// One resolver is created per opened stream, bound to one decoder and one
/// seek capability. Requests within half a second ahead of the current
/// decode position are satisfied by sequential decoding; anything behind the
/// current position, or further ahead, triggers a coarse container seek
/// followed by a catch-up decode.
///
/// Single-threaded and synchronous: every operation runs to completion on
/// the caller's thread, and concurrent calls against one resolver are not
/// supported. Use one resolver per stream; serialize externally if a stream
/// must be shared.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
///
/// use frameseek::{MediaSource, TimedFrame, Timestamp};
///
/// let mut source = MediaSource::open("input.mp4")?;
/// let time_base = source.metadata().video.as_ref().unwrap().time_base;
/// let mut resolver = source.video_resolver()?;
///
/// let target = Timestamp::from_duration(Duration::from_secs(30), time_base);
/// let frame = resolver.frame_at(target)?;
/// println!("resolved to pts {}", frame.timestamp());
/// # Ok::<(), frameseek::FrameSeekError>(())
/// ```
pub struct TimeResolver<D: FrameDecoder, S: StreamSeeker> {
    decoder: D,
    seeker: S,
    info: StreamInfo,
    /// Precomputed once; the stream's time base is immutable.
    threshold: Timestamp,
    closed: bool,
}

impl<D: FrameDecoder, S: StreamSeeker> TimeResolver<D, S> {
    /// Bind a resolver to a decoder, a seek capability, and the stream's
    /// immutable metadata.
    ///
    /// The seek threshold (half a second in the stream's time base) is
    /// computed here and reused for the resolver's lifetime.
    pub fn new(decoder: D, seeker: S, info: StreamInfo) -> Self {
        let threshold = info.seek_threshold();
        TimeResolver {
            decoder,
            seeker,
            info,
            threshold,
            closed: false,
        }
    }

    /// The stream metadata this resolver is bound to.
    pub fn stream_info(&self) -> &StreamInfo {
        &self.info
    }

    /// The seek-avoidance threshold in ticks.
    pub fn threshold(&self) -> Timestamp {
        self.threshold
    }

    /// Whether [`close`](TimeResolver::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Drop any already-decoded-but-unconsumed decoder data.
    ///
    /// Idempotent; safe to call when the buffer is already empty.
    ///
    /// # Errors
    ///
    /// [`FrameSeekError::Disposed`] after [`close`](TimeResolver::close).
    pub fn discard_buffer(&mut self) -> Result<(), FrameSeekError> {
        self.ensure_open()?;
        self.decoder.discard_buffer();
        Ok(())
    }

    /// Position the decoder so its recent frame's timestamp reaches or
    /// passes `target`.
    ///
    /// The target is trusted as given (not clamped);
    /// [`frame_at`](TimeResolver::frame_at) clamps before delegating here.
    /// Buffered data is discarded first (it is stale relative to a seek),
    /// then a container seek is issued iff the target is behind the current
    /// position or at least one threshold ahead of it, and finally the
    /// decoder catches up sequentially. The catch-up runs even after a
    /// container seek, because the container only lands near the target.
    ///
    /// # Errors
    ///
    /// Collaborator failures (decode, seek, end of stream) are surfaced
    /// unchanged, plus [`FrameSeekError::Disposed`] after close.
    pub fn seek_to(&mut self, target: Timestamp) -> Result<(), FrameSeekError> {
        self.ensure_open()?;
        self.seek_and_catch_up(target)
    }

    /// Resolve `target` to the frame that should be displayed at that time.
    ///
    /// The target is clamped into `[0, duration]` first, so negative values
    /// resolve to the first frame and values past the end resolve to the
    /// last decodable frame. Against the recent frame's timestamp, the
    /// resolution is three-way:
    ///
    /// - equal: the decoder is already positioned, no work;
    /// - less than one threshold ahead: sequential decode only, the short
    ///   hop that keeps linear scrubbing cheap;
    /// - anything else (behind, or at/past the threshold boundary): a full
    ///   [`seek_to`](TimeResolver::seek_to).
    ///
    /// On success the returned frame is the first one in decode order with
    /// timestamp at or after the clamped target — not necessarily an exact
    /// match, since frames occur at discrete, non-uniform instants.
    ///
    /// # Errors
    ///
    /// Decode and seek failures propagate unchanged, except that running out
    /// of stream during catch-up returns the last decoded frame instead
    /// (mirroring the duration clamp). [`FrameSeekError::EndOfStream`] is
    /// only surfaced when no frame was ever decoded, and
    /// [`FrameSeekError::Disposed`] after close.
    pub fn frame_at(&mut self, target: Timestamp) -> Result<&D::Frame, FrameSeekError> {
        self.ensure_open()?;
        let target = target.clamp_to(self.info.duration());
        let current = self.decoder.recent_timestamp();

        if target != current {
            let result = if current < target
                && target < current.saturating_add(self.threshold)
            {
                log::debug!(
                    "frame_at: short hop {current} -> {target} (stream {})",
                    self.info.index()
                );
                self.decoder.skip_to(target)
            } else {
                self.seek_and_catch_up(target)
            };

            match result {
                // Out of data with a frame in hand: the target sits past the
                // last decodable frame, return that frame.
                Err(FrameSeekError::EndOfStream) if self.decoder.recent_frame().is_some() => {}
                other => other?,
            }
        }

        self.decoder
            .recent_frame()
            .ok_or(FrameSeekError::EndOfStream)
    }

    /// Decode and return the next frame, advancing by exactly one unit.
    ///
    /// Pure pass-through to the decoder.
    ///
    /// # Errors
    ///
    /// [`FrameSeekError::EndOfStream`] when no more data exists,
    /// [`FrameSeekError::Decode`] on corrupt data, or
    /// [`FrameSeekError::Disposed`] after close.
    pub fn next_frame(&mut self) -> Result<&D::Frame, FrameSeekError> {
        self.ensure_open()?;
        self.decoder.decode_next()
    }

    /// Tear the resolver down: discard buffered decoder data and mark the
    /// resolver closed.
    ///
    /// Idempotent. Every operation after this fails with
    /// [`FrameSeekError::Disposed`]. Dropping the resolver performs the same
    /// teardown, so buffered data is discarded before the decoder is
    /// released on every exit path.
    pub fn close(&mut self) {
        if !self.closed {
            log::debug!("closing resolver for stream {}", self.info.index());
            self.decoder.discard_buffer();
            self.closed = true;
        }
    }

    fn ensure_open(&self) -> Result<(), FrameSeekError> {
        if self.closed {
            Err(FrameSeekError::Disposed)
        } else {
            Ok(())
        }
    }

    fn seek_and_catch_up(&mut self, target: Timestamp) -> Result<(), FrameSeekError> {
        // Buffered data is stale relative to a seek. Discarding does not
        // change the recent frame, so the current position is read after.
        self.decoder.discard_buffer();
        let current = self.decoder.recent_timestamp();

        let needs_container_seek =
            target < current || target >= current.saturating_add(self.threshold);

        if needs_container_seek {
            log::debug!(
                "container seek to {target} from {current} (stream {})",
                self.info.index()
            );
            self.seeker.seek_near(target, self.info.index())?;
            // The container lands at or before a keyframe near the target,
            // and the recent frame still reflects the pre-seek position.
            // Decode once so catch-up measures from the post-seek cursor.
            self.decoder.decode_next()?;
        }

        self.decoder.skip_to(target)
    }
}

impl<D: FrameDecoder, S: StreamSeeker> Drop for TimeResolver<D, S> {
    fn drop(&mut self) {
        self.close();
    }
}
