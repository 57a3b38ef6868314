//! Error types for the `frameseek` crate.
//!
//! This module defines [`FrameSeekError`], the unified error type returned by
//! all fallible operations in the crate. Variants map directly onto the
//! failure modes of the frame-access layer: opening a source, decoding,
//! container seeking, running out of stream, and use-after-close.

use std::path::PathBuf;

use ffmpeg_next::Error as FfmpegError;
use thiserror::Error;

/// The unified error type for all `frameseek` operations.
///
/// Every public method that can fail returns `Result<T, FrameSeekError>`.
/// No operation in this layer retries on failure; decode and seek errors are
/// surfaced to the caller unchanged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FrameSeekError {
    /// The media file could not be opened.
    #[error("Failed to open media file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::MediaSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// The decoder ran out of data before producing the requested frame.
    ///
    /// When at least one frame has already been decoded,
    /// [`TimeResolver::frame_at`](crate::TimeResolver::frame_at) absorbs this
    /// and returns the last available frame instead; it is only surfaced when
    /// no frame was ever decoded.
    #[error("End of stream reached before the requested timestamp")]
    EndOfStream,

    /// The bitstream could not be decoded (malformed or corrupt data).
    #[error("Failed to decode frame: {0}")]
    Decode(String),

    /// The container could not reposition its cursor (e.g. a non-seekable
    /// source). The resolver does not fall back to a linear rescan.
    #[error("Container seek failed: {0}")]
    Seek(String),

    /// An operation was invoked on a resolver after
    /// [`close`](crate::TimeResolver::close) was called.
    #[error("Resolver has been closed")]
    Disposed,

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),
}

impl From<FfmpegError> for FrameSeekError {
    fn from(error: FfmpegError) -> Self {
        match error {
            FfmpegError::Eof => FrameSeekError::EndOfStream,
            other => FrameSeekError::Ffmpeg(other.to_string()),
        }
    }
}
