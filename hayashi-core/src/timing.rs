//! Types and utilities related to timing.
use core::{
    convert::TryFrom,
    fmt,
    ops::{Add, Neg, Sub},
    time::Duration,
};

use crate::impl_ops;

/// A point in time on the playback timeline.
///
/// Timestamps are represented as `f64`s in seconds. Zero corresponds to the start of the audio
/// track, and a note's timestamp is the moment it should be hit.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Timestamp(pub f64);

/// Difference between two [`Timestamp`]s, in seconds.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimestampDifference(pub f64);

/// The error returned when a [`Timestamp`] can't be represented as a [`Duration`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TryFromTimestampError(());

impl_ops!(Timestamp, TimestampDifference);

impl Timestamp {
    /// Creates a `Timestamp` from seconds.
    #[inline]
    pub const fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// Creates a `Timestamp` from milliseconds.
    #[inline]
    pub fn from_millis(millis: i32) -> Self {
        Self(f64::from(millis) / 1000.)
    }

    /// Returns the zero timestamp.
    #[inline]
    pub const fn zero() -> Self {
        Self(0.)
    }

    /// Returns the timestamp in seconds.
    #[inline]
    pub const fn as_secs(self) -> f64 {
        self.0
    }
}

impl TimestampDifference {
    /// Creates a `TimestampDifference` from seconds.
    #[inline]
    pub const fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// Creates a `TimestampDifference` from milliseconds.
    #[inline]
    pub fn from_millis(millis: i32) -> Self {
        Self(f64::from(millis) / 1000.)
    }

    /// Returns the zero difference.
    #[inline]
    pub const fn zero() -> Self {
        Self(0.)
    }

    /// Returns the difference in seconds.
    #[inline]
    pub const fn as_secs(self) -> f64 {
        self.0
    }
}

impl From<Duration> for Timestamp {
    #[inline]
    fn from(duration: Duration) -> Self {
        Self(duration.as_secs_f64())
    }
}

impl TryFrom<Timestamp> for Duration {
    type Error = TryFromTimestampError;

    /// Converts a timestamp into a `Duration` since the start of the audio.
    ///
    /// Fails for negative and non-finite timestamps.
    #[inline]
    fn try_from(timestamp: Timestamp) -> Result<Self, Self::Error> {
        Duration::try_from_secs_f64(timestamp.0).map_err(|_| TryFromTimestampError(()))
    }
}

impl fmt::Display for TryFromTimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("timestamp is negative or not finite")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_ops() {
        let a = Timestamp::from_secs(10.);
        let b = Timestamp::from_secs(9.5);

        assert_eq!(a - b, TimestampDifference::from_millis(500));
        assert_eq!(b + TimestampDifference::from_millis(500), a);
        assert_eq!(a - TimestampDifference::from_millis(500), b);
        assert_eq!(-(b - a), a - b);
    }

    #[test]
    fn strictly_between_excludes_bounds() {
        let start = TimestampDifference::from_millis(-300);
        let end = TimestampDifference::from_millis(120);

        assert!(TimestampDifference::zero().is_strictly_between(start, end));
        assert!(!start.is_strictly_between(start, end));
        assert!(!end.is_strictly_between(start, end));
    }

    #[test]
    fn negative_timestamp_to_duration_fails() {
        assert!(Duration::try_from(Timestamp::from_secs(-0.1)).is_err());
        assert!(Duration::try_from(Timestamp::from_secs(f64::NAN)).is_err());
        assert_eq!(
            Duration::try_from(Timestamp::from_millis(1500)),
            Ok(Duration::from_millis(1500))
        );
    }
}
