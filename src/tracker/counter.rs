use serde::Serialize;

use crate::tracker::side::CrossingKind;

/// Entry/exit tallies for one door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DoorCounter {
    pub entries: u64,
    pub exits: u64,
}

impl DoorCounter {
    pub fn record(&mut self, kind: CrossingKind) {
        match kind {
            CrossingKind::Entry => self.entries += 1,
            CrossingKind::Exit => self.exits += 1,
        }
    }

    /// `entries - exits`. Negative when more exits than entries were seen,
    /// which usually means some entries were missed.
    pub fn occupancy(&self) -> i64 {
        self.entries as i64 - self.exits as i64
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
