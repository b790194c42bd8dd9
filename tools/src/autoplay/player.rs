use hayashi_core::{
    input::{Channel, InputState},
    timing::{Timestamp, TimestampDifference},
    track::LaneTrack,
};

/// Synthetic player pressing each lane's channel once per note.
#[derive(Debug, Clone)]
pub struct Autoplayer {
    lanes: Vec<PlayerLane>,
}

#[derive(Debug, Clone)]
struct PlayerLane {
    channel: Channel,
    /// Press timestamps, in chart order.
    presses: Vec<Timestamp>,
    next: usize,
}

impl Autoplayer {
    /// Creates an `Autoplayer` pressing `accuracy` after the perfect time of every note of `track`.
    pub fn new(track: &LaneTrack, accuracy: TimestampDifference) -> Self {
        let lanes = track
            .lanes()
            .iter()
            .map(|lane| PlayerLane {
                channel: lane.binding().channel,
                presses: lane
                    .notes()
                    .iter()
                    .map(|note| note.perfect_time() + accuracy)
                    .collect(),
                next: 0,
            })
            .collect();

        Self { lanes }
    }

    /// Releases every channel, then presses the channels with a press due at `now`.
    ///
    /// At most one press per lane is made on a single frame; overdue presses carry over to the
    /// following frames.
    pub fn play(&mut self, now: Timestamp, input: &mut InputState) {
        for lane in &self.lanes {
            input.set_pressed(lane.channel, false);
        }

        for lane in &mut self.lanes {
            match lane.presses.get(lane.next) {
                Some(&press) if press <= now => {
                    input.set_pressed(lane.channel, true);
                    lane.next += 1;
                }
                _ => (),
            }
        }
    }

    /// Returns the number of presses not yet made.
    pub fn pending(&self) -> usize {
        self.lanes
            .iter()
            .map(|lane| lane.presses.len() - lane.next)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hayashi_core::{
        chart::{Chart, ChartMetadata, Lane},
        input::Input,
        track::{LaneBinding, Settings},
    };

    fn track(lanes: &[&[f64]]) -> LaneTrack {
        let chart = Chart {
            metadata: ChartMetadata::default(),
            lanes: lanes
                .iter()
                .map(|timestamps| Lane {
                    timestamps: timestamps.iter().copied().map(Timestamp).collect(),
                })
                .collect(),
        };

        LaneTrack::new(
            &chart,
            &LaneBinding::default_layout(lanes.len()).unwrap(),
            Settings::default(),
        )
        .unwrap()
    }

    #[test]
    fn presses_once_per_note() {
        let track = track(&[&[1., 2.], &[1.5]]);
        let mut player = Autoplayer::new(&track, TimestampDifference::zero());
        let mut input = InputState::new(2);

        player.play(Timestamp(0.9), &mut input);
        assert!(!input.is_down(Channel(0)));
        assert!(!input.is_down(Channel(1)));
        input.next_frame();

        player.play(Timestamp(1.), &mut input);
        assert!(input.is_down(Channel(0)));
        assert!(!input.is_down(Channel(1)));
        input.next_frame();

        player.play(Timestamp(1.1), &mut input);
        assert!(!input.is_down(Channel(0)));
        assert!(!input.is_pressed(Channel(0)));
        input.next_frame();

        player.play(Timestamp(2.), &mut input);
        assert!(input.is_down(Channel(0)));
        assert!(input.is_down(Channel(1)));
        assert_eq!(player.pending(), 0);
    }

    #[test]
    fn consecutive_presses_on_adjacent_frames() {
        let track = track(&[&[1., 1.]]);
        let mut player = Autoplayer::new(&track, TimestampDifference::zero());
        let mut input = InputState::new(1);

        player.play(Timestamp(1.), &mut input);
        assert!(input.is_down(Channel(0)));
        input.next_frame();

        player.play(Timestamp(1.01), &mut input);
        assert!(input.is_down(Channel(0)));
        assert_eq!(player.pending(), 0);
    }

    #[test]
    fn accuracy_shifts_presses() {
        let track = track(&[&[1.]]);
        let mut player = Autoplayer::new(&track, TimestampDifference::from_secs(-0.25));
        let mut input = InputState::new(1);

        player.play(Timestamp(0.75), &mut input);
        assert!(input.is_down(Channel(0)));
    }
}
