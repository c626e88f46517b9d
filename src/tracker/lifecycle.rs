//! Track lifecycle: ageing before matching, expiry after processing.
//!
//! # Policy
//! - **Ageing**: every live track gains one tick on both timers at the start of a tick.
//! - **Birth**: every detection left unmatched spawns a track (see [`TrackRegistry::create`]).
//! - **Expiry**: a track whose `ticks_unseen` reaches `max_unseen_ticks` is
//!   removed and its id retired. A track matched this tick has `ticks_unseen == 0`
//!   and therefore never expires in the same tick.

use crate::tracker::registry::TrackRegistry;
use crate::tracker::track::Track;

#[derive(Debug, Clone, Copy)]
pub struct LifecycleManager {
    max_unseen_ticks: u32,
}

impl LifecycleManager {
    pub fn new(max_unseen_ticks: u32) -> Self {
        Self { max_unseen_ticks }
    }

    pub fn max_unseen_ticks(&self) -> u32 {
        self.max_unseen_ticks
    }

    pub fn age_all(&self, registry: &mut TrackRegistry) {
        registry.iter_mut().for_each(Track::age);
    }

    /// Remove expired tracks. Returns them in ascending id order.
    pub fn expire(&self, registry: &mut TrackRegistry) -> Vec<Track> {
        registry.remove_where(|t| t.is_expired(self.max_unseen_ticks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::side::Side;
    use nalgebra::Point2;

    #[test]
    fn test_expires_exactly_at_limit() {
        let lifecycle = LifecycleManager::new(3);
        let mut registry = TrackRegistry::default();
        let id = registry.create(Point2::new(0.0, 0.0), Side::Above);

        for _ in 0..2 {
            lifecycle.age_all(&mut registry);
            assert!(lifecycle.expire(&mut registry).is_empty());
        }
        lifecycle.age_all(&mut registry);
        let expired = lifecycle.expire(&mut registry);
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].track_id, id);
        assert!(!registry.contains(id));
    }

    #[test]
    fn test_seen_track_survives() {
        let lifecycle = LifecycleManager::new(1);
        let mut registry = TrackRegistry::default();
        let id = registry.create(Point2::new(0.0, 0.0), Side::Above);

        lifecycle.age_all(&mut registry);
        if let Some(track) = registry.get_mut(id) {
            track.mark_seen();
        }
        assert!(lifecycle.expire(&mut registry).is_empty());
        assert!(registry.contains(id));
    }
}
