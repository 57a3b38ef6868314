//! FFmpeg-backed collaborator implementations.
//!
//! [`VideoDecoder`] implements [`FrameDecoder`] over an FFmpeg video codec
//! context, pulling packets from a shared demuxer on demand, and
//! [`DemuxSeeker`] implements [`StreamSeeker`] over the same demuxer. Both
//! are constructed by [`MediaSource::video_resolver`](crate::MediaSource::video_resolver)
//! and share the demuxer through `Rc<RefCell<_>>` — this layer is
//! single-threaded by contract, and the two collaborators are two
//! capabilities over one container cursor.

use std::{cell::RefCell, rc::Rc};

use ffmpeg_next::{
    Error as FfmpegError, Packet, Rational, format::context::Input,
    frame::Video as RawVideoFrame,
};
use ffmpeg_sys_next::AV_TIME_BASE;

use crate::{
    decoder::{FrameDecoder, TimedFrame},
    error::FrameSeekError,
    seek::StreamSeeker,
    timestamp::Timestamp,
};

/// A decoded video frame together with its presentation timestamp.
///
/// The pixel data is left exactly as the codec produced it; pixel-format
/// conversion is out of scope for this crate.
pub struct VideoFrame {
    frame: RawVideoFrame,
    timestamp: Timestamp,
}

impl VideoFrame {
    /// The underlying FFmpeg frame.
    #[must_use]
    pub fn raw(&self) -> &RawVideoFrame {
        &self.frame
    }

    /// Frame width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    /// Frame height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.frame.height()
    }
}

impl TimedFrame for VideoFrame {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// [`FrameDecoder`] over an FFmpeg video codec context.
///
/// Each [`decode_next`](FrameDecoder::decode_next) call receives a frame from
/// the codec if one is pending, otherwise reads packets from the shared
/// demuxer (skipping other streams) and feeds them in until a frame comes
/// out. End of file latches an EOF send so the codec can drain its delayed
/// frames.
pub struct VideoDecoder {
    input: Rc<RefCell<Input>>,
    decoder: ffmpeg_next::decoder::Video,
    stream_index: usize,
    recent: Option<VideoFrame>,
    /// Whether packets have been sent since the codec last reported
    /// needing more data.
    pending: bool,
    eof_sent: bool,
}

impl VideoDecoder {
    pub(crate) fn new(
        input: Rc<RefCell<Input>>,
        decoder: ffmpeg_next::decoder::Video,
        stream_index: usize,
    ) -> Self {
        VideoDecoder {
            input,
            decoder,
            stream_index,
            recent: None,
            pending: false,
            eof_sent: false,
        }
    }
}

impl FrameDecoder for VideoDecoder {
    type Frame = VideoFrame;

    fn decode_next(&mut self) -> Result<&VideoFrame, FrameSeekError> {
        let mut decoded = RawVideoFrame::empty();
        loop {
            // Drain a frame the codec has already produced, if any.
            if self.decoder.receive_frame(&mut decoded).is_ok() {
                let pts = decoded.pts().unwrap_or(0);
                self.recent = Some(VideoFrame {
                    frame: decoded,
                    timestamp: Timestamp::new(pts),
                });
                return Ok(self.recent.as_ref().unwrap());
            }
            self.pending = false;

            if self.eof_sent {
                // EOF was sent and the codec is drained.
                return Err(FrameSeekError::EndOfStream);
            }

            let mut packet = Packet::empty();
            let read_result = packet.read(&mut self.input.borrow_mut());
            match read_result {
                Ok(()) => {
                    if packet.stream() == self.stream_index {
                        self.decoder
                            .send_packet(&packet)
                            .map_err(|error| FrameSeekError::Decode(error.to_string()))?;
                        self.pending = true;
                    }
                    // Packets for other streams are silently skipped.
                }
                Err(FfmpegError::Eof) => {
                    self.decoder
                        .send_eof()
                        .map_err(|error| FrameSeekError::Decode(error.to_string()))?;
                    self.eof_sent = true;
                    self.pending = true;
                }
                Err(_) => {
                    // Non-fatal read error; try the next packet.
                }
            }
        }
    }

    fn recent_frame(&self) -> Option<&VideoFrame> {
        self.recent.as_ref()
    }

    fn is_buffer_empty(&self) -> bool {
        !self.pending
    }

    fn discard_buffer(&mut self) {
        // avcodec_flush_buffers drops in-flight frames and reference state.
        // The recent frame is kept; it still reflects the last decode.
        self.decoder.flush();
        self.pending = false;
        self.eof_sent = false;
    }
}

/// [`StreamSeeker`] over the shared FFmpeg demuxer.
///
/// Seeks backward (`..=target`): the demuxer lands on the keyframe at or
/// before the target, never after it, so the resolver's catch-up decode
/// walks forward through the pre-roll instead of skipping content. A
/// forward seek could land a whole group of pictures past the target.
pub struct DemuxSeeker {
    input: Rc<RefCell<Input>>,
    time_base: Rational,
}

impl DemuxSeeker {
    pub(crate) fn new(input: Rc<RefCell<Input>>, time_base: Rational) -> Self {
        DemuxSeeker { input, time_base }
    }
}

impl StreamSeeker for DemuxSeeker {
    fn seek_near(
        &mut self,
        target: Timestamp,
        stream_index: usize,
    ) -> Result<(), FrameSeekError> {
        // avformat_seek_file with the default stream takes AV_TIME_BASE
        // units, so rescale from the stream's own time base.
        let seconds = target.to_duration(self.time_base).as_secs_f64();
        let seek_ts = (seconds * f64::from(AV_TIME_BASE)) as i64;

        log::debug!(
            "demux seek to {target} ticks ({seconds:.3}s, stream {stream_index})"
        );
        self.input
            .borrow_mut()
            .seek(seek_ts, ..seek_ts)
            .map_err(|error| FrameSeekError::Seek(error.to_string()))
    }
}
