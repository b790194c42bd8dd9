//! Note positioning on screen.
use core::ops::{Add, Mul, Neg, Sub};

use crate::{impl_ops, timing::TimestampDifference};

/// Vertical note position on screen, in pixels.
///
/// Grows downwards: a note above the judgement line has a smaller position than the line.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Position(pub f64);

/// Difference between two [`Position`]s, in pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct PositionDifference(pub f64);

impl_ops!(Position, PositionDifference);

/// Scrolling speed, in pixels per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScrollSpeed(pub f64);

/// How notes travel towards the judgement line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scroll {
    /// Position of the judgement line.
    pub judge_y: Position,
    /// Speed at which notes approach the judgement line.
    pub speed: ScrollSpeed,
}

/// Size of a drawn note, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteSize {
    /// Width of the note.
    pub width: f64,
    /// Height of the note.
    pub height: f64,
}

impl Position {
    /// Returns the zero position (the top of the screen).
    #[inline]
    pub const fn zero() -> Self {
        Self(0.)
    }
}

impl Scroll {
    /// The default position of the judgement line.
    pub const DEFAULT_JUDGE_Y: Position = Position(500.);

    /// The default time it takes a note to travel from the top of the screen to the judgement
    /// line.
    pub const DEFAULT_APPROACH_TIME: TimestampDifference = TimestampDifference(2.);

    /// Creates a `Scroll` where notes travel from the top of the screen to the judgement line in
    /// `approach_time`.
    ///
    /// # Panics
    ///
    /// Panics if `approach_time` is not positive.
    #[inline]
    pub fn with_approach_time(judge_y: Position, approach_time: TimestampDifference) -> Self {
        assert!(approach_time.0 > 0.);

        Self {
            judge_y,
            speed: ScrollSpeed(judge_y.0 / approach_time.0),
        }
    }

    /// Returns the position of an object `difference` away from its perfect time.
    ///
    /// `difference` is the current timestamp minus the perfect timestamp, so it's negative while
    /// the object is still approaching.
    #[inline]
    pub fn position(&self, difference: TimestampDifference) -> Position {
        self.judge_y + self.speed * difference
    }
}

impl Default for Scroll {
    #[inline]
    fn default() -> Self {
        Self::with_approach_time(Self::DEFAULT_JUDGE_Y, Self::DEFAULT_APPROACH_TIME)
    }
}

impl Default for NoteSize {
    #[inline]
    fn default() -> Self {
        Self {
            width: 50.,
            height: 20.,
        }
    }
}

impl Mul<TimestampDifference> for ScrollSpeed {
    type Output = PositionDifference;

    #[inline]
    fn mul(self, rhs: TimestampDifference) -> Self::Output {
        PositionDifference(self.0 * rhs.0)
    }
}

impl Mul<ScrollSpeed> for TimestampDifference {
    type Output = PositionDifference;

    #[inline]
    fn mul(self, rhs: ScrollSpeed) -> Self::Output {
        rhs * self
    }
}
