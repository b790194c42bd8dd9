//! Digital input channels.
use alloc::{vec, vec::Vec};

/// Identifier of a digital input channel, such as a key.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Channel(pub u16);

/// Source of digital input state.
pub trait Input {
    /// Returns `true` while the channel is held down.
    fn is_pressed(&self, channel: Channel) -> bool;

    /// Returns `true` only on the frame the channel went from released to pressed.
    fn is_down(&self, channel: Channel) -> bool;
}

impl<T: Input + ?Sized> Input for &T {
    #[inline]
    fn is_pressed(&self, channel: Channel) -> bool {
        (**self).is_pressed(channel)
    }

    #[inline]
    fn is_down(&self, channel: Channel) -> bool {
        (**self).is_down(channel)
    }
}

/// Input that never reports anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl Input for NoInput {
    #[inline]
    fn is_pressed(&self, _channel: Channel) -> bool {
        false
    }

    #[inline]
    fn is_down(&self, _channel: Channel) -> bool {
        false
    }
}

/// Frame-based input state for a fixed number of channels.
///
/// Feed it key levels with [`set_pressed()`](Self::set_pressed) as they arrive and call
/// [`next_frame()`](Self::next_frame) once the frame has been processed. A press is reported by
/// [`Input::is_down()`] for exactly one frame, even if the key was released again before the frame
/// ended.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InputState {
    pressed: Vec<bool>,
    down: Vec<bool>,
}

impl InputState {
    /// Creates a new `InputState` with all channels released.
    #[inline]
    pub fn new(channel_count: usize) -> Self {
        Self {
            pressed: vec![false; channel_count],
            down: vec![false; channel_count],
        }
    }

    /// Returns the number of channels.
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.pressed.len()
    }

    /// Updates the level of a channel.
    ///
    /// # Panics
    ///
    /// Panics if `channel` is out of range.
    pub fn set_pressed(&mut self, channel: Channel, pressed: bool) {
        let index = usize::from(channel.0);
        if pressed && !self.pressed[index] {
            self.down[index] = true;
        }
        self.pressed[index] = pressed;
    }

    /// Finishes the current frame, clearing the press edges.
    #[inline]
    pub fn next_frame(&mut self) {
        self.down.fill(false);
    }
}

impl Input for InputState {
    #[inline]
    fn is_pressed(&self, channel: Channel) -> bool {
        self.pressed[usize::from(channel.0)]
    }

    #[inline]
    fn is_down(&self, channel: Channel) -> bool {
        self.down[usize::from(channel.0)]
    }
}
