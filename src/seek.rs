//! Container-seek collaborator contract.

use crate::{error::FrameSeekError, timestamp::Timestamp};

/// Coarse container-level repositioning, injected into the resolver as a
/// capability rather than an ownership link back to the container.
///
/// A container seek is approximate: it typically lands at or before the
/// nearest prior keyframe, not exactly on the requested timestamp. The
/// resolver always follows a seek with a sequential catch-up decode.
pub trait StreamSeeker {
    /// Reposition the demux/decode cursor near `target` for the stream at
    /// `stream_index`.
    ///
    /// # Errors
    ///
    /// [`FrameSeekError::Seek`] when the container cannot reposition (e.g. a
    /// non-seekable source). The resolver surfaces this unchanged and does
    /// not fall back to a linear rescan.
    fn seek_near(
        &mut self,
        target: Timestamp,
        stream_index: usize,
    ) -> Result<(), FrameSeekError>;
}
