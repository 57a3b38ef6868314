//! Opening media files and binding resolvers to their streams.
//!
//! [`MediaSource`] is the entry point of the crate: it opens a file through
//! FFmpeg, caches container and video metadata, and hands out a
//! [`TimeResolver`] bound to the file's best video stream.

use std::{
    cell::RefCell,
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    rc::Rc,
    time::Duration,
};

use ffmpeg_next::{
    codec::context::Context as CodecContext, format::context::Input, media::Type,
};

use crate::{
    error::FrameSeekError,
    info::StreamInfo,
    metadata::{MediaMetadata, VideoMetadata},
    resolver::TimeResolver,
    timestamp::Timestamp,
    video::{DemuxSeeker, VideoDecoder},
};

/// An opened media file.
///
/// Created via [`MediaSource::open`]; holds the demuxer context and cached
/// metadata. Call [`video_resolver`](MediaSource::video_resolver) to obtain
/// a [`TimeResolver`] for timestamp-based frame access.
///
/// # Example
///
/// ```no_run
/// use frameseek::MediaSource;
///
/// let mut source = MediaSource::open("input.mp4")?;
/// println!("Duration: {:?}", source.metadata().duration);
/// let mut resolver = source.video_resolver()?;
/// # Ok::<(), frameseek::FrameSeekError>(())
/// ```
pub struct MediaSource {
    /// Demuxer context, shared with the decoder and seeker of any resolver
    /// handed out by this source.
    input: Rc<RefCell<Input>>,
    /// Cached metadata extracted at open time.
    metadata: MediaMetadata,
    /// Index of the best video stream, if one exists.
    video_stream_index: Option<usize>,
    /// Path to the opened media file (kept for error messages).
    path: PathBuf,
}

impl Debug for MediaSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("MediaSource")
            .field("metadata", &self.metadata)
            .field("video_stream_index", &self.video_stream_index)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl MediaSource {
    /// Open a media file.
    ///
    /// Initializes FFmpeg (idempotent), opens the demuxer, locates the best
    /// video stream and caches its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`FrameSeekError::FileOpen`] if the file cannot be opened or
    /// its streams cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FrameSeekError> {
        let path = path.as_ref();
        let owned_path = path.to_path_buf();

        // Safe to call multiple times.
        ffmpeg_next::init().map_err(|error| FrameSeekError::FileOpen {
            path: owned_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        log::debug!("Opening media file: {}", owned_path.display());

        let input =
            ffmpeg_next::format::input(&path).map_err(|error| FrameSeekError::FileOpen {
                path: owned_path.clone(),
                reason: error.to_string(),
            })?;

        let video_stream_index = input
            .streams()
            .best(Type::Video)
            .map(|stream| stream.index());

        let duration_microseconds = input.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        let format = input.format().name().to_string();

        let video = if let Some(index) = video_stream_index {
            let stream = input.stream(index).ok_or_else(|| FrameSeekError::FileOpen {
                path: owned_path.clone(),
                reason: format!("Video stream {index} disappeared during open"),
            })?;
            let time_base = stream.time_base();

            let decoder = CodecContext::from_parameters(stream.parameters())
                .and_then(|context| context.decoder().video())
                .map_err(|error| FrameSeekError::FileOpen {
                    path: owned_path.clone(),
                    reason: format!("Failed to create video decoder: {error}"),
                })?;

            // Prefer the average frame rate; fall back to the real base rate.
            let frame_rate = stream.avg_frame_rate();
            let frames_per_second = if frame_rate.denominator() != 0 {
                frame_rate.numerator() as f64 / frame_rate.denominator() as f64
            } else {
                let rate = stream.rate();
                if rate.denominator() != 0 {
                    rate.numerator() as f64 / rate.denominator() as f64
                } else {
                    0.0
                }
            };

            let frame_count = if frames_per_second > 0.0 {
                (duration.as_secs_f64() * frames_per_second) as u64
            } else {
                0
            };

            let codec = decoder
                .codec()
                .map(|codec| codec.name().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            Some(VideoMetadata {
                width: decoder.width(),
                height: decoder.height(),
                frames_per_second,
                frame_count,
                codec,
                time_base,
            })
        } else {
            None
        };

        Ok(MediaSource {
            input: Rc::new(RefCell::new(input)),
            metadata: MediaMetadata {
                video,
                duration,
                format,
            },
            video_stream_index,
            path: owned_path,
        })
    }

    /// Cached metadata for the opened file.
    ///
    /// Extracted once during [`open`](MediaSource::open); reading it does no
    /// decoding.
    pub fn metadata(&self) -> &MediaMetadata {
        &self.metadata
    }

    /// Path this source was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a [`TimeResolver`] bound to the file's best video stream.
    ///
    /// Creates a fresh codec context for the stream, a seek capability over
    /// the shared demuxer, and the stream's immutable metadata (time base,
    /// duration in ticks, index). One resolver per stream; the resolver and
    /// this source share the demuxer cursor, so use one resolver at a time.
    ///
    /// # Errors
    ///
    /// [`FrameSeekError::NoVideoStream`] if the file has no video, or an
    /// FFmpeg error if the codec context cannot be built.
    pub fn video_resolver(
        &mut self,
    ) -> Result<TimeResolver<VideoDecoder, DemuxSeeker>, FrameSeekError> {
        let index = self.video_stream_index.ok_or(FrameSeekError::NoVideoStream)?;

        let (time_base, stream_duration, decoder) = {
            let input = self.input.borrow();
            let stream = input.stream(index).ok_or(FrameSeekError::NoVideoStream)?;
            let decoder = CodecContext::from_parameters(stream.parameters())?
                .decoder()
                .video()?;
            (stream.time_base(), stream.duration(), decoder)
        };

        // Some containers leave the stream duration unset; fall back to the
        // container duration rescaled into the stream's time base.
        let duration = if stream_duration > 0 {
            Timestamp::new(stream_duration)
        } else {
            Timestamp::from_duration(self.metadata.duration, time_base)
        };

        let info = StreamInfo::new(time_base, duration, index);
        log::debug!(
            "binding resolver to stream {index} (duration {} ticks, threshold {} ticks)",
            duration,
            info.seek_threshold()
        );

        Ok(TimeResolver::new(
            VideoDecoder::new(Rc::clone(&self.input), decoder, index),
            DemuxSeeker::new(Rc::clone(&self.input), time_base),
            info,
        ))
    }
}
