//! Single tracked identity.

use nalgebra::Point2;
use serde::Serialize;

use crate::tracker::side::Side;

/// Track identifier. Unique within a door and strictly increasing.
pub type TrackId = u64;

/// `ticks_since_crossing` of a brand-new track, so its first crossing always counts.
pub const FRESH_TRACK_TICKS: u32 = u32::MAX;

/// Single tracked person.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Unique track identifier
    pub track_id: TrackId,
    /// Last known position in pixels
    pub position: Point2<f32>,
    /// Side of the line for `position`
    pub side: Side,
    /// Ticks since the last counted crossing
    pub ticks_since_crossing: u32,
    /// Consecutive ticks without a matching detection
    pub ticks_unseen: u32,
}

impl Track {
    /// Create a track from its first detection.
    pub fn new(track_id: TrackId, position: Point2<f32>, side: Side) -> Self {
        Self {
            track_id,
            position,
            side,
            ticks_since_crossing: FRESH_TRACK_TICKS,
            ticks_unseen: 0,
        }
    }

    /// Advance both timers by one tick.
    pub fn age(&mut self) {
        self.ticks_since_crossing = self.ticks_since_crossing.saturating_add(1);
        self.ticks_unseen = self.ticks_unseen.saturating_add(1);
    }

    /// Record that a detection was bound to this track this tick.
    pub fn mark_seen(&mut self) {
        self.ticks_unseen = 0;
    }

    /// Record a counted crossing.
    pub fn mark_crossed(&mut self) {
        self.ticks_since_crossing = 0;
    }

    /// Store the position observed this tick and the side it lies on.
    pub fn relocate(&mut self, position: Point2<f32>, side: Side) {
        self.position = position;
        self.side = side;
    }

    pub fn is_expired(&self, max_unseen_ticks: u32) -> bool {
        self.ticks_unseen >= max_unseen_ticks
    }

    pub fn snapshot(&self) -> TrackSnapshot {
        TrackSnapshot {
            track_id: self.track_id,
            position: self.position,
            side: self.side,
        }
    }
}

/// Read-only view of a track handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackSnapshot {
    pub track_id: TrackId,
    pub position: Point2<f32>,
    pub side: Side,
}
