//! # frameseek
//!
//! Timestamp-to-frame resolution for media streams — return the frame that
//! should be displayed at an arbitrary point in time while issuing as few
//! expensive container seeks as possible, powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate.
//!
//! The core is [`TimeResolver`]: for a target timestamp it decides between
//! reusing the most recently decoded frame, advancing the decoder
//! sequentially, or issuing a coarse container seek followed by a catch-up
//! decode. Targets less than half a second ahead of the current position
//! are reached by decoding alone, which keeps linear playback and scrubbing
//! cheap; anything behind the current position, or further ahead, seeks.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use frameseek::{MediaSource, TimedFrame, Timestamp};
//!
//! let mut source = MediaSource::open("input.mp4")?;
//! let time_base = source.metadata().video.as_ref().unwrap().time_base;
//! let mut resolver = source.video_resolver()?;
//!
//! // Resolve a wall-clock position to the frame displayed at that time.
//! let target = Timestamp::from_duration(Duration::from_secs(30), time_base);
//! let frame = resolver.frame_at(target)?;
//! println!("{}x{} at pts {}", frame.width(), frame.height(), frame.timestamp());
//!
//! // Nearby follow-up requests advance sequentially, without seeking.
//! let next = Timestamp::from_duration(Duration::from_millis(30_100), time_base);
//! let frame = resolver.frame_at(next)?;
//! println!("advanced to pts {}", frame.timestamp());
//! # Ok::<(), frameseek::FrameSeekError>(())
//! ```
//!
//! ## Features
//!
//! - **Seek-avoidance heuristic** — three-way resolution (reuse / advance /
//!   seek) with a per-stream threshold of 0.5 s in stream ticks
//! - **Boundary correctness** — requests are clamped to `[0, duration]`;
//!   past-the-end targets return the last decodable frame
//! - **Strict teardown order** — buffered decoder data is discarded before
//!   the decoder is released, on every exit path
//! - **Collaborator traits** — [`FrameDecoder`] and [`StreamSeeker`] seams
//!   so the resolver can be driven without FFmpeg (used by the test suite)
//! - **FFmpeg backend** — [`MediaSource`] opens a file and binds a resolver
//!   to its best video stream
//!
//! Pixel-format conversion, container parsing and codec negotiation are out
//! of scope; frames are returned as the codec produced them.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod decoder;
pub mod error;
pub mod ffmpeg;
pub mod info;
pub mod metadata;
pub mod resolver;
pub mod seek;
pub mod source;
pub mod timestamp;
pub mod video;

pub use decoder::{FrameDecoder, TimedFrame};
pub use error::FrameSeekError;
pub use ffmpeg::{FfmpegLogLevel, get_ffmpeg_log_level, set_ffmpeg_log_level};
pub use info::StreamInfo;
pub use metadata::{MediaMetadata, VideoMetadata};
pub use resolver::TimeResolver;
pub use seek::StreamSeeker;
pub use source::MediaSource;
pub use timestamp::{Timestamp, seek_threshold};
pub use video::{DemuxSeeker, VideoDecoder, VideoFrame};
