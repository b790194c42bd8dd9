//! Functionality related to notes, the objects that have to be hit as they cross the judgement
//! line.
use crate::{
    input::{Channel, Input},
    scroll::{NoteSize, Position, Scroll},
    timing::{Timestamp, TimestampDifference},
};

/// Timing tolerances for judging notes.
///
/// All bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitWindow {
    /// How long before its perfect time a note can be hit.
    pub early: TimestampDifference,
    /// How long after its perfect time a note can be hit.
    pub late: TimestampDifference,
    /// How long after its perfect time a note is removed without being hit.
    pub expiry: TimestampDifference,
}

/// Reason for a note to be removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EraseReason {
    /// The note was hit inside the hit window.
    Hit {
        /// Difference between the hit timestamp and the perfect timestamp.
        difference: TimestampDifference,
    },
    /// The note went past the expiry without being hit.
    Expired,
}

/// Rectangle occupied by a note on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// Something notes can be drawn onto.
pub trait Canvas {
    /// Fills the rectangle of a single note.
    fn fill_note(&mut self, rect: NoteRect);
}

/// A single note in a lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    perfect_time: Timestamp,
    x: f64,
    channel: Channel,
    position: Position,
}

impl Default for HitWindow {
    #[inline]
    fn default() -> Self {
        Self {
            early: TimestampDifference::from_millis(300),
            late: TimestampDifference::from_millis(120),
            expiry: TimestampDifference::from_secs(2.),
        }
    }
}

impl EraseReason {
    /// Returns `true` if the note was hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

impl Note {
    /// Creates a new `Note`.
    ///
    /// The position stays at zero until the first [`update()`](Self::update).
    #[inline]
    pub fn new(perfect_time: Timestamp, x: f64, channel: Channel) -> Self {
        Self {
            perfect_time,
            x,
            channel,
            position: Position::zero(),
        }
    }

    /// Returns the timestamp at which the note should be hit.
    #[inline]
    pub fn perfect_time(&self) -> Timestamp {
        self.perfect_time
    }

    /// Returns the horizontal center of the note.
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns the input channel that hits the note.
    #[inline]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Returns the vertical center of the note, as of the last update.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Recomputes the position of the note for the timestamp `now`.
    ///
    /// The note is on the judgement line exactly at its perfect time, above it before and below
    /// it after.
    #[inline]
    pub fn update(&mut self, now: Timestamp, scroll: &Scroll) {
        self.position = scroll.position(now - self.perfect_time);
    }

    /// Returns why the note should be removed at `now`, if it should.
    ///
    /// A note is hit if its channel went down inside the hit window. It expires once it is more
    /// than [`HitWindow::expiry`] past its perfect time, regardless of input.
    pub fn erase_reason(
        &self,
        now: Timestamp,
        input: &impl Input,
        window: &HitWindow,
    ) -> Option<EraseReason> {
        let difference = now - self.perfect_time;

        if difference.is_strictly_between(-window.early, window.late)
            && input.is_down(self.channel)
        {
            return Some(EraseReason::Hit { difference });
        }

        if self.is_expired(now, window) {
            return Some(EraseReason::Expired);
        }

        None
    }

    /// Returns `true` if the note is more than [`HitWindow::expiry`] past its perfect time.
    #[inline]
    pub fn is_expired(&self, now: Timestamp, window: &HitWindow) -> bool {
        now - self.perfect_time > window.expiry
    }

    /// Returns `true` if the note should be removed at `now`, either hit or expired.
    #[inline]
    pub fn is_erasable(&self, now: Timestamp, input: &impl Input, window: &HitWindow) -> bool {
        self.erase_reason(now, input, window).is_some()
    }

    /// Returns the rectangle of the note centered at its current position.
    #[inline]
    pub fn rect(&self, size: NoteSize) -> NoteRect {
        NoteRect {
            x: self.x - size.width / 2.,
            y: self.position.0 - size.height / 2.,
            width: size.width,
            height: size.height,
        }
    }

    /// Draws the note onto `canvas`.
    #[inline]
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, size: NoteSize) {
        canvas.fill_note(self.rect(size));
    }
}
