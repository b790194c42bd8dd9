//! Functionality related to charts.
use alloc::vec::Vec;

#[cfg(test)]
use proptest::prelude::*;
#[cfg(test)]
use proptest_derive::Arbitrary;

use crate::timing::{Timestamp, TimestampDifference};

#[cfg(test)]
fn arbitrary_timestamps() -> impl proptest::strategy::Strategy<Value = Vec<Timestamp>> {
    proptest::collection::vec(-10f64..600., 0..50).prop_map(|mut secs| {
        secs.sort_unstable_by(f64::total_cmp);
        secs.into_iter().map(Timestamp).collect()
    })
}

/// Tempo information of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(test, derive(Arbitrary))]
pub struct ChartMetadata {
    /// Beats per minute. Always positive.
    #[cfg_attr(test, proptest(strategy = "1f64..400."))]
    pub bpm: f64,
    /// Shift applied to every note so that the chart lines up with the audio.
    ///
    /// A positive offset makes notes earlier.
    #[cfg_attr(test, proptest(strategy = "(-1f64..1.).prop_map(TimestampDifference)"))]
    pub offset: TimestampDifference,
}

/// One lane in a chart.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(test, derive(Arbitrary))]
pub struct Lane {
    /// Perfect timestamps of the notes in this lane, in the order they were authored.
    #[cfg_attr(test, proptest(strategy = "arbitrary_timestamps()"))]
    pub timestamps: Vec<Timestamp>,
}

/// A chart (humen): the notes of a song.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(test, derive(Arbitrary))]
pub struct Chart {
    /// Tempo information.
    pub metadata: ChartMetadata,
    /// Lanes constituting the chart.
    #[cfg_attr(test, proptest(strategy = "proptest::collection::vec(any::<Lane>(), 0..8)"))]
    pub lanes: Vec<Lane>,
}

impl ChartMetadata {
    /// Number of beats in one row of a chart.
    pub const BEATS_PER_ROW: f64 = 4.;

    /// Returns the duration of one row.
    #[inline]
    pub fn row_duration(&self) -> TimestampDifference {
        TimestampDifference(60. * Self::BEATS_PER_ROW / self.bpm)
    }

    /// Returns the perfect timestamp of a note.
    ///
    /// A row is split into `subdivision` equal parts and the note sits at part `index` (counted
    /// from zero) of row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `subdivision` is zero.
    #[inline]
    pub fn timestamp(&self, row: usize, index: usize, subdivision: usize) -> Timestamp {
        assert!(subdivision > 0);

        let rows = row as f64 + index as f64 / subdivision as f64;
        Timestamp(60. * Self::BEATS_PER_ROW * rows / self.bpm) - self.offset
    }
}

impl Default for ChartMetadata {
    #[inline]
    fn default() -> Self {
        Self {
            bpm: 120.,
            offset: TimestampDifference::zero(),
        }
    }
}

impl Lane {
    /// Constructs an empty lane.
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }
}

impl Chart {
    /// Returns the number of lanes in the chart.
    #[inline]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Returns the total number of notes across all lanes.
    #[inline]
    pub fn note_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.timestamps.len()).sum()
    }

    /// Returns the earliest note timestamp.
    pub fn first_timestamp(&self) -> Option<Timestamp> {
        self.lanes
            .iter()
            .flat_map(|lane| lane.timestamps.iter().copied())
            .reduce(|a, b| if b < a { b } else { a })
    }

    /// Returns the latest note timestamp.
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.lanes
            .iter()
            .flat_map(|lane| lane.timestamps.iter().copied())
            .reduce(|a, b| if b > a { b } else { a })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn timestamp_first_row_start() {
        let metadata = ChartMetadata {
            bpm: 120.,
            offset: TimestampDifference::zero(),
        };

        assert_eq!(metadata.timestamp(0, 0, 1), Timestamp(0.));
    }

    #[test]
    fn timestamp_subdivisions() {
        let metadata = ChartMetadata {
            bpm: 120.,
            offset: TimestampDifference::zero(),
        };

        // One row is four beats, two seconds at 120 BPM.
        assert_eq!(metadata.row_duration(), TimestampDifference(2.));
        assert_eq!(metadata.timestamp(1, 0, 4), Timestamp(2.));
        assert_eq!(metadata.timestamp(1, 1, 4), Timestamp(2.5));
        assert_eq!(metadata.timestamp(1, 2, 4), Timestamp(3.));
        assert_eq!(metadata.timestamp(3, 1, 2), Timestamp(7.));
    }

    #[test]
    fn timestamp_offset_makes_notes_earlier() {
        let metadata = ChartMetadata {
            bpm: 240.,
            offset: TimestampDifference(0.25),
        };

        assert_eq!(metadata.timestamp(0, 0, 1), Timestamp(-0.25));
        assert_eq!(metadata.timestamp(2, 0, 8), Timestamp(1.75));
    }

    #[test]
    #[should_panic]
    fn timestamp_zero_subdivision_panics() {
        ChartMetadata::default().timestamp(0, 0, 0);
    }

    #[test]
    fn first_last_timestamp() {
        let chart = Chart {
            metadata: ChartMetadata::default(),
            lanes: vec![
                Lane {
                    timestamps: vec![Timestamp(1.), Timestamp(4.)],
                },
                Lane::new(),
                Lane {
                    timestamps: vec![Timestamp(0.5), Timestamp(3.)],
                },
            ],
        };

        assert_eq!(chart.first_timestamp(), Some(Timestamp(0.5)));
        assert_eq!(chart.last_timestamp(), Some(Timestamp(4.)));
        assert_eq!(chart.note_count(), 4);
        assert_eq!(chart.lane_count(), 3);
    }

    #[test]
    fn first_last_timestamp_empty() {
        let chart = Chart {
            metadata: ChartMetadata::default(),
            lanes: vec![Lane::new()],
        };

        assert_eq!(chart.first_timestamp(), None);
        assert_eq!(chart.last_timestamp(), None);
    }

    proptest! {
        #[test]
        fn timestamps_increase_within_row(metadata: ChartMetadata, row in 0usize..500, subdivision in 1usize..64) {
            for index in 1..subdivision {
                prop_assert!(
                    metadata.timestamp(row, index - 1, subdivision)
                        < metadata.timestamp(row, index, subdivision)
                );
            }
        }

        #[test]
        fn first_timestamp_not_after_last(chart: Chart) {
            if let (Some(first), Some(last)) = (chart.first_timestamp(), chart.last_timestamp()) {
                prop_assert!(first <= last);
            } else {
                prop_assert_eq!(chart.note_count(), 0);
            }
        }
    }
}
