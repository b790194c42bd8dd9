use hayashi_core::{
    input::InputState,
    note::{Canvas, EraseReason, NoteRect},
    timing::{Timestamp, TimestampDifference},
    track::{LaneTrack, Removal},
};
use tracing::{debug, trace};

use crate::player::Autoplayer;

/// Outcome of a session.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Summary {
    pub hit: usize,
    pub expired: usize,
    /// Notes still live when the session ended.
    pub remaining: usize,
    /// Sum of absolute hit differences, in seconds.
    pub total_difference: f64,
    /// Largest number of notes drawn on one frame.
    pub peak_drawn: usize,
    pub frames: u64,
}

/// Canvas counting the drawn notes.
#[derive(Debug, Default)]
struct NoteCounter {
    drawn: usize,
}

impl Canvas for NoteCounter {
    fn fill_note(&mut self, _rect: NoteRect) {
        self.drawn += 1;
    }
}

impl Summary {
    fn record(&mut self, removal: &Removal) {
        match removal.reason {
            EraseReason::Hit { difference } => {
                self.hit += 1;
                self.total_difference += difference.as_secs().abs();
            }
            EraseReason::Expired => self.expired += 1,
        }
    }

    /// Returns the mean absolute hit difference in seconds, or `None` if nothing was hit.
    pub fn mean_error(&self) -> Option<f64> {
        (self.hit > 0).then(|| self.total_difference / self.hit as f64)
    }
}

/// Plays `track` at `frame_rate` updates per second until every note is gone.
///
/// The clock starts at zero or `lead_in` before the first note, whichever is earlier, and stops
/// one frame after the last note has expired. Without a `player` nothing is pressed.
///
/// # Panics
///
/// Panics if `frame_rate` is not positive and finite.
pub fn run(
    track: &mut LaneTrack,
    mut player: Option<Autoplayer>,
    frame_rate: f64,
    lead_in: TimestampDifference,
) -> Summary {
    assert!(frame_rate > 0. && frame_rate.is_finite());

    let mut summary = Summary::default();

    let perfect_times = || {
        track
            .lanes()
            .iter()
            .flat_map(|lane| lane.notes().iter().map(|note| note.perfect_time()))
    };
    let first = perfect_times().reduce(|a, b| if b < a { b } else { a });
    let last = perfect_times().reduce(|a, b| if b > a { b } else { a });
    let (first, last) = match (first, last) {
        (Some(first), Some(last)) => (first, last),
        _ => return summary,
    };

    let channel_count = track
        .lanes()
        .iter()
        .map(|lane| usize::from(lane.binding().channel.0) + 1)
        .max()
        .unwrap_or(0);
    let mut input = InputState::new(channel_count);

    let start = (first - lead_in).as_secs().min(0.);
    let frame_duration = 1. / frame_rate;
    let end = last
        + track.settings.hit_window.expiry
        + TimestampDifference::from_secs(frame_duration);
    debug!(start, end = end.as_secs(), "session bounds");

    let mut removals = Vec::new();
    loop {
        let now = Timestamp::from_secs(start + summary.frames as f64 * frame_duration);
        if track.is_finished() || now > end {
            break;
        }

        if let Some(player) = &mut player {
            player.play(now, &mut input);
        }

        removals.clear();
        track.update_into(now, &input, &mut removals);
        for removal in &removals {
            summary.record(removal);
            debug!(
                lane = removal.lane,
                now = now.as_secs(),
                perfect_time = removal.perfect_time.as_secs(),
                reason = ?removal.reason,
                "removed note"
            );
        }

        let mut counter = NoteCounter::default();
        track.draw(&mut counter);
        summary.peak_drawn = summary.peak_drawn.max(counter.drawn);
        trace!(frame = summary.frames, drawn = counter.drawn, "drew frame");

        input.next_frame();
        summary.frames += 1;
    }

    if let Some(player) = &player {
        if player.pending() > 0 {
            debug!(pending = player.pending(), "presses left unused");
        }
    }

    summary.remaining = track.live_note_count();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use hayashi_core::{
        chart::Chart,
        track::{LaneBinding, Settings},
    };
    use pretty_assertions::assert_eq;

    const LEAD_IN: TimestampDifference = TimestampDifference(2.);

    fn track(chart: &Chart) -> LaneTrack {
        let bindings = LaneBinding::default_layout(chart.lane_count()).unwrap();
        LaneTrack::new(chart, &bindings, Settings::default()).unwrap()
    }

    // Lane 0 has notes at 0, 1 and 3.5, lane 1 at 0.5 and 2.
    fn small_chart() -> Chart {
        hayashi_humen::from_str("#START\n1010,0100\n0001,1\n").unwrap()
    }

    #[test]
    fn miss_all_expires_every_note() {
        let chart = small_chart();
        let mut track = track(&chart);

        let summary = run(&mut track, None, 60., LEAD_IN);

        assert_eq!(summary.hit, 0);
        assert_eq!(summary.expired, chart.note_count());
        assert_eq!(summary.remaining, 0);
        assert_eq!(summary.mean_error(), None);
        assert_eq!(summary.peak_drawn, 5);
        assert!(track.is_finished());
    }

    #[test]
    fn autoplay_hits_every_note() {
        let chart = small_chart();
        let mut track = track(&chart);
        let player = Autoplayer::new(&track, TimestampDifference::zero());

        let summary = run(&mut track, Some(player), 60., LEAD_IN);

        assert_eq!(summary.hit, chart.note_count());
        assert_eq!(summary.expired, 0);
        assert_eq!(summary.remaining, 0);
        assert!(summary.mean_error().unwrap() < 1. / 60.);
    }

    #[test]
    fn late_presses_miss() {
        let chart = small_chart();
        let mut track = track(&chart);
        let player = Autoplayer::new(&track, TimestampDifference::from_secs(0.5));

        let summary = run(&mut track, Some(player), 60., LEAD_IN);

        assert_eq!(summary.hit, 0);
        assert_eq!(summary.expired, chart.note_count());
    }

    #[test]
    fn many_removals_in_one_frame_are_counted() {
        let row = vec!["1"; 40].join(",");
        let chart = hayashi_humen::from_str(&format!("#START\n{row}\n")).unwrap();
        assert_eq!(chart.note_count(), 40);
        let mut track = track(&chart);

        let summary = run(&mut track, None, 60., LEAD_IN);

        assert_eq!(summary.expired, 40);
        assert_eq!(summary.hit + summary.expired + summary.remaining, 40);
        assert_eq!(summary.peak_drawn, 40);
    }

    #[test]
    fn empty_chart() {
        let chart = hayashi_humen::from_str("#START\n0,0\n").unwrap();
        let mut track = track(&chart);

        assert_eq!(run(&mut track, None, 60., LEAD_IN), Summary::default());
    }
}
