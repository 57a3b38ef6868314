//! Media metadata types.
//!
//! Metadata is extracted once when a file is opened via
//! [`MediaSource::open`](crate::MediaSource::open) and cached for the
//! lifetime of the source; reading it never triggers additional decoding.

use std::time::Duration;

use ffmpeg_next::Rational;

/// Container-level metadata for an opened media file.
#[derive(Debug, Clone)]
#[must_use]
pub struct MediaMetadata {
    /// Video stream metadata, if a video stream is present.
    pub video: Option<VideoMetadata>,
    /// Total duration of the media file.
    pub duration: Duration,
    /// Container format name (e.g. `"mp4"`, `"matroska"`, `"avi"`).
    pub format: String,
}

/// Metadata for the best video stream of a media file.
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Estimated total number of frames, from duration and frame rate.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
    /// The stream's time base; timestamps passed to the resolver are ticks
    /// of this rational.
    pub time_base: Rational,
}
