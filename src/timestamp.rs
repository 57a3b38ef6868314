//! Stream timestamps and the seek-avoidance threshold.
//!
//! All positions in this crate are expressed as [`Timestamp`] values: integer
//! tick counts in the owning stream's time base. Conversion to and from
//! wall-clock [`Duration`] goes through the stream's `Rational` time base and
//! round-trips within one tick.

use std::{fmt, time::Duration};

use ffmpeg_next::Rational;

/// How far ahead of the current decode position a sequential catch-up is
/// still cheaper than a container seek, in wall-clock time.
const SEEK_THRESHOLD_SECONDS: f64 = 0.5;

/// A position in a media stream, counted in ticks of that stream's time base.
///
/// Valid in-range values are non-negative; [`Timestamp::UNSET`] marks "no
/// frame decoded yet". Resolver entry points clamp requests into
/// `[0, duration]` before use.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use ffmpeg_next::Rational;
/// use frameseek::Timestamp;
///
/// let time_base = Rational::new(1, 30);
/// let ts = Timestamp::from_duration(Duration::from_secs(2), time_base);
/// assert_eq!(ts.ticks(), 60);
/// assert_eq!(ts.to_duration(time_base), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[must_use]
pub struct Timestamp(i64);

impl Timestamp {
    /// The start of the stream.
    pub const ZERO: Timestamp = Timestamp(0);

    /// Sentinel for "no frame decoded yet" (negative, sorts before any
    /// in-range timestamp).
    pub const UNSET: Timestamp = Timestamp(-1);

    /// Create a timestamp from a raw tick count.
    pub const fn new(ticks: i64) -> Self {
        Timestamp(ticks)
    }

    /// The raw tick count.
    #[must_use]
    pub const fn ticks(self) -> i64 {
        self.0
    }

    /// Convert a wall-clock duration to ticks in the given time base.
    ///
    /// Uses round-to-nearest so the conversion round-trips with
    /// [`to_duration`](Timestamp::to_duration) within one tick.
    pub fn from_duration(duration: Duration, time_base: Rational) -> Self {
        let seconds = duration.as_secs_f64();
        let numerator = time_base.numerator() as f64;
        let denominator = time_base.denominator() as f64;
        Timestamp((seconds * denominator / numerator).round() as i64)
    }

    /// Convert this timestamp to a wall-clock duration in the given time base.
    ///
    /// Negative (unset) timestamps convert to [`Duration::ZERO`].
    #[must_use]
    pub fn to_duration(self, time_base: Rational) -> Duration {
        if self.0 <= 0 {
            return Duration::ZERO;
        }
        let numerator = time_base.numerator() as f64;
        let denominator = time_base.denominator() as f64;
        Duration::from_secs_f64(self.0 as f64 * numerator / denominator)
    }

    /// Clamp this timestamp into `[0, duration]`.
    pub fn clamp_to(self, duration: Timestamp) -> Self {
        Timestamp(self.0.clamp(0, duration.0.max(0)))
    }

    /// Tick-wise saturating addition.
    pub fn saturating_add(self, other: Timestamp) -> Self {
        Timestamp(self.0.saturating_add(other.0))
    }

    /// Whether this timestamp holds a decoded position (non-negative).
    #[must_use]
    pub const fn is_set(self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the seek-avoidance threshold for a stream, in ticks.
///
/// Targets less than this far ahead of the current decode position are
/// reached by sequential decoding instead of a container seek. The threshold
/// is half a second expressed in the stream's time base, computed once at
/// stream initialization (the time base is immutable for the stream's
/// lifetime). It is positive whenever the time base has sub-second
/// granularity.
pub fn seek_threshold(time_base: Rational) -> Timestamp {
    Timestamp::from_duration(Duration::from_secs_f64(SEEK_THRESHOLD_SECONDS), time_base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_round_trip_within_one_tick() {
        for (num, den) in [(1, 30), (1, 1000), (1, 90000), (1001, 30000)] {
            let time_base = Rational::new(num, den);
            for millis in [0u64, 33, 500, 1000, 63_417] {
                let duration = Duration::from_millis(millis);
                let ts = Timestamp::from_duration(duration, time_base);
                let back = Timestamp::from_duration(ts.to_duration(time_base), time_base);
                assert!(
                    (back.ticks() - ts.ticks()).abs() <= 1,
                    "round trip drifted: {millis}ms in {num}/{den}"
                );
            }
        }
    }

    #[test]
    fn threshold_is_half_a_second_in_ticks() {
        assert_eq!(seek_threshold(Rational::new(1, 30)).ticks(), 15);
        assert_eq!(seek_threshold(Rational::new(1, 1000)).ticks(), 500);
        assert_eq!(seek_threshold(Rational::new(1, 90000)).ticks(), 45000);
    }

    #[test]
    fn threshold_positive_for_sub_second_time_bases() {
        for den in [2, 24, 25, 30, 60, 1000, 90000] {
            assert!(seek_threshold(Rational::new(1, den)).ticks() > 0);
        }
    }

    #[test]
    fn clamp_bounds() {
        let duration = Timestamp::new(100);
        assert_eq!(Timestamp::new(-5).clamp_to(duration), Timestamp::ZERO);
        assert_eq!(Timestamp::new(40).clamp_to(duration), Timestamp::new(40));
        assert_eq!(Timestamp::new(250).clamp_to(duration), duration);
        assert_eq!(duration.clamp_to(duration), duration);
    }

    #[test]
    fn unset_sorts_before_zero() {
        assert!(Timestamp::UNSET < Timestamp::ZERO);
        assert!(!Timestamp::UNSET.is_set());
        assert!(Timestamp::ZERO.is_set());
    }
}
