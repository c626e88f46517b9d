//! Side-transition and debounce policy for matched tracks.

use nalgebra::Point2;
use serde::Serialize;

use crate::tracker::line::CountingLine;
use crate::tracker::side::CrossingKind;
use crate::tracker::track::{Track, TrackId};

/// A counted crossing. Emitted at most once per track per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrossingEvent {
    pub track_id: TrackId,
    pub kind: CrossingKind,
}

/// Result of evaluating one track for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingOutcome {
    /// Side unchanged.
    NoTransition,
    /// Side changed and the crossing was counted.
    Counted(CrossingKind),
    /// Side changed inside the debounce window; nothing counted.
    Suppressed {
        kind: CrossingKind,
        ticks_since_crossing: u32,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct CrossingDetector {
    line: CountingLine,
    debounce_ticks: u32,
}

impl CrossingDetector {
    pub fn new(line: CountingLine, debounce_ticks: u32) -> Self {
        Self {
            line,
            debounce_ticks,
        }
    }

    pub fn line(&self) -> &CountingLine {
        &self.line
    }

    /// Evaluate the move of `track` to `position`.
    ///
    /// The track's side and position are always updated, also when the
    /// crossing is suppressed. `ticks_since_crossing` is reset only for a
    /// counted crossing.
    pub fn evaluate(&self, track: &mut Track, position: Point2<f32>) -> CrossingOutcome {
        let new_side = self.line.side_of(&position);
        let can_count = track.ticks_since_crossing >= self.debounce_ticks;

        let outcome = match CrossingKind::from_transition(track.side, new_side) {
            None => CrossingOutcome::NoTransition,
            Some(kind) if can_count => {
                track.mark_crossed();
                CrossingOutcome::Counted(kind)
            }
            Some(kind) => CrossingOutcome::Suppressed {
                kind,
                ticks_since_crossing: track.ticks_since_crossing,
            },
        };

        track.relocate(position, new_side);
        outcome
    }
}
