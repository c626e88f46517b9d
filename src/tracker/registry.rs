//! Ownership of a door's live tracks and its id counter.

use std::collections::BTreeMap;

use nalgebra::Point2;

use crate::tracker::side::Side;
use crate::tracker::track::{Track, TrackId};

/// Map of active tracks, ordered by id.
///
/// Ids come from a per-registry counter that only moves forward until
/// [`TrackRegistry::clear`] restores it to the initial value.
#[derive(Debug, Clone)]
pub struct TrackRegistry {
    tracks: BTreeMap<TrackId, Track>,
    initial_id: TrackId,
    next_id: TrackId,
}

impl TrackRegistry {
    pub fn new(initial_id: TrackId) -> Self {
        Self {
            tracks: BTreeMap::new(),
            initial_id,
            next_id: initial_id,
        }
    }

    /// Id that the next created track will receive.
    pub fn next_id(&self) -> TrackId {
        self.next_id
    }

    pub fn initial_id(&self) -> TrackId {
        self.initial_id
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn get_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.get_mut(&id)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.tracks.contains_key(&id)
    }

    /// Tracks in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Track> {
        self.tracks.values_mut()
    }

    /// Insert a new track under the next unused id and return that id.
    pub fn create(&mut self, position: Point2<f32>, side: Side) -> TrackId {
        let id = self.next_id;
        self.next_id += 1;
        self.tracks.insert(id, Track::new(id, position, side));
        id
    }

    /// Remove every track for which `expired` returns true. Returns the removed tracks.
    pub fn remove_where(&mut self, mut expired: impl FnMut(&Track) -> bool) -> Vec<Track> {
        let ids: Vec<TrackId> = self
            .tracks
            .values()
            .filter(|t| expired(t))
            .map(|t| t.track_id)
            .collect();
        ids.into_iter()
            .filter_map(|id| self.tracks.remove(&id))
            .collect()
    }

    /// Drop all tracks and restart ids from the initial value.
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.next_id = self.initial_id;
    }
}

impl Default for TrackRegistry {
    fn default() -> Self {
        Self::new(0)
    }
}
