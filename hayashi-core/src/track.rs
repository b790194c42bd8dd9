//! Functionality related to managing the notes of every lane during play.
use alloc::vec::Vec;
use core::fmt;

use circular_queue::CircularQueue;

use crate::{
    chart::Chart,
    input::{Channel, Input},
    note::{Canvas, EraseReason, HitWindow, Note},
    scroll::{NoteSize, Scroll},
    timing::Timestamp,
};

/// Placement of a lane on screen and the channel that hits its notes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneBinding {
    /// Index of the chart lane.
    pub lane: usize,
    /// Input channel hitting the notes of this lane.
    pub channel: Channel,
    /// Horizontal center of the lane.
    pub x: f64,
}

/// Which erasable notes of a lane are removed on a single update.
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq)]
pub enum RemovalPolicy {
    /// Remove every erasable note, except that one press hits at most one note per lane.
    ///
    /// The first note of a lane hit by a press consumes it. Later notes of the same lane that are
    /// also inside the hit window are left in place and aren't counted as erasable on this
    /// update; they can still be hit by a later press or removed by expiring.
    #[default]
    AllEligible,
    /// Remove only the first erasable note of the lane, leaving the rest for later updates.
    FirstEligible,
}

/// Tunables of a [`LaneTrack`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Settings {
    /// How notes approach the judgement line.
    pub scroll: Scroll,
    /// Timing tolerances.
    pub hit_window: HitWindow,
    /// Size of drawn notes.
    pub note_size: NoteSize,
    /// Which erasable notes are removed on a single update.
    pub removal_policy: RemovalPolicy,
}

/// Information about a removed note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Removal {
    /// Index of the chart lane the note was in.
    pub lane: usize,
    /// Timestamp of the update that removed the note.
    pub timestamp: Timestamp,
    /// Perfect timestamp of the note.
    pub perfect_time: Timestamp,
    /// Why the note was removed.
    pub reason: EraseReason,
}

/// Live notes of one lane.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneState {
    binding: LaneBinding,
    /// Invariant: in chart order, and never grows after construction.
    notes: Vec<Note>,
}

/// An error returned from [`LaneTrack::new()`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TrackCreationError {
    /// More than one binding names this chart lane.
    DuplicateLane(usize),
    /// This chart lane has notes but no binding.
    UnboundLane(usize),
    /// There are more lanes than input channels.
    TooManyLanes(usize),
}

/// Notes of every lane, advanced and pruned as playback goes.
#[derive(Debug, Clone)]
pub struct LaneTrack {
    /// Tunables.
    pub settings: Settings,
    /// Lanes, sorted by chart lane index.
    lanes: Vec<LaneState>,
    /// Contains a number of last removed notes, newest first.
    pub last_removals: CircularQueue<Removal>,
}

impl LaneBinding {
    /// Returns the default layout for `lane_count` lanes.
    ///
    /// Lane `i` is hit by channel `i` and is centered at `140 + 90 * i`. Fails if some lane index
    /// doesn't fit into a [`Channel`].
    pub fn default_layout(lane_count: usize) -> Result<Vec<LaneBinding>, TrackCreationError> {
        (0..lane_count)
            .map(|lane| {
                let channel = u16::try_from(lane)
                    .map_err(|_| TrackCreationError::TooManyLanes(lane_count))?;

                Ok(LaneBinding {
                    lane,
                    channel: Channel(channel),
                    x: 140. + 90. * lane as f64,
                })
            })
            .collect()
    }
}

impl LaneState {
    /// Returns the binding of this lane.
    #[inline]
    pub fn binding(&self) -> LaneBinding {
        self.binding
    }

    /// Returns the live notes of this lane, in chart order.
    #[inline]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

impl fmt::Display for TrackCreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateLane(lane) => write!(f, "lane {lane} is bound more than once"),
            Self::UnboundLane(lane) => write!(f, "lane {lane} has notes but no binding"),
            Self::TooManyLanes(count) => write!(f, "{count} lanes don't fit into input channels"),
        }
    }
}

impl LaneTrack {
    /// Creates a new `LaneTrack` with a note for every timestamp of `chart`.
    ///
    /// Every binding becomes one lane. A binding may name a lane the chart doesn't have, which
    /// results in an empty lane.
    pub fn new(
        chart: &Chart,
        bindings: &[LaneBinding],
        settings: Settings,
    ) -> Result<Self, TrackCreationError> {
        let mut bindings = bindings.to_vec();
        bindings.sort_by_key(|binding| binding.lane);

        for window in bindings.windows(2) {
            if window[0].lane == window[1].lane {
                return Err(TrackCreationError::DuplicateLane(window[0].lane));
            }
        }

        for (index, lane) in chart.lanes.iter().enumerate() {
            if !lane.timestamps.is_empty()
                && bindings
                    .binary_search_by_key(&index, |binding| binding.lane)
                    .is_err()
            {
                return Err(TrackCreationError::UnboundLane(index));
            }
        }

        let lanes = bindings
            .into_iter()
            .map(|binding| {
                let notes = chart
                    .lanes
                    .get(binding.lane)
                    .map(|lane| {
                        lane.timestamps
                            .iter()
                            .map(|&timestamp| Note::new(timestamp, binding.x, binding.channel))
                            .collect()
                    })
                    .unwrap_or_default();

                LaneState { binding, notes }
            })
            .collect();

        Ok(Self {
            settings,
            lanes,
            last_removals: CircularQueue::with_capacity(32),
        })
    }

    /// Returns the number of lanes.
    #[inline]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Returns the lanes, sorted by chart lane index.
    #[inline]
    pub fn lanes(&self) -> &[LaneState] {
        &self.lanes
    }

    /// Returns the number of notes still in play across all lanes.
    #[inline]
    pub fn live_note_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.notes.len()).sum()
    }

    /// Returns `true` once every note has been removed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.lanes.iter().all(|lane| lane.notes.is_empty())
    }

    /// Advances the track to `now`.
    ///
    /// First moves every note to its position at `now`, then removes the erasable notes of each
    /// lane according to [`Settings::removal_policy`]. Returns the number of removed notes.
    ///
    /// Only the most recent removals are kept in [`last_removals`](Self::last_removals); use
    /// [`update_into()`](Self::update_into) to get all of them.
    #[inline]
    pub fn update(&mut self, now: Timestamp, input: &impl Input) -> usize {
        self.update_with(now, input, |_| ())
    }

    /// Advances the track to `now` like [`update()`](Self::update), appending every removed note
    /// to `removals` in removal order.
    #[inline]
    pub fn update_into(
        &mut self,
        now: Timestamp,
        input: &impl Input,
        removals: &mut Vec<Removal>,
    ) -> usize {
        self.update_with(now, input, |removal| removals.push(removal))
    }

    fn update_with(
        &mut self,
        now: Timestamp,
        input: &impl Input,
        mut on_removal: impl FnMut(Removal),
    ) -> usize {
        let scroll = self.settings.scroll;
        for lane in &mut self.lanes {
            for note in &mut lane.notes {
                note.update(now, &scroll);
            }
        }

        let window = self.settings.hit_window;
        let last_removals = &mut self.last_removals;
        let mut removed = 0;

        for lane in &mut self.lanes {
            let index = lane.binding.lane;
            let mut record = |note: &Note, reason| {
                let removal = Removal {
                    lane: index,
                    timestamp: now,
                    perfect_time: note.perfect_time(),
                    reason,
                };
                last_removals.push(removal);
                on_removal(removal);
                removed += 1;
            };

            match self.settings.removal_policy {
                RemovalPolicy::FirstEligible => {
                    let found = lane.notes.iter().enumerate().find_map(|(i, note)| {
                        note.erase_reason(now, input, &window)
                            .map(|reason| (i, reason))
                    });

                    if let Some((i, reason)) = found {
                        let note = lane.notes.remove(i);
                        record(&note, reason);
                    }
                }
                RemovalPolicy::AllEligible => {
                    let mut hit = false;

                    lane.notes.retain(|note| {
                        let reason = match note.erase_reason(now, input, &window) {
                            // The press has already been used up by an earlier note.
                            Some(EraseReason::Hit { .. }) if hit => note
                                .is_expired(now, &window)
                                .then_some(EraseReason::Expired),
                            reason => reason,
                        };

                        match reason {
                            Some(reason) => {
                                hit |= reason.is_hit();
                                record(note, reason);
                                false
                            }
                            None => true,
                        }
                    });
                }
            }
        }

        removed
    }

    /// Draws every live note onto `canvas`.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for lane in &self.lanes {
            for note in &lane.notes {
                note.draw(canvas, self.settings.note_size);
            }
        }
    }
}
