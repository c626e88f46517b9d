//! Multi-door monitoring and occupancy aggregation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, TrackerError};
use crate::tracker::{Detection, DoorConfig, DoorCounter, DoorTracker, TickOutput};

/// Configuration for a set of doors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub doors: Vec<DoorConfig>,
    /// Log an occupancy status line every this many monitor ticks; `0` disables it
    #[serde(default = "default_status_interval")]
    pub status_interval_ticks: u64,
}

fn default_status_interval() -> u64 {
    30
}

impl MonitorConfig {
    pub fn new(doors: Vec<DoorConfig>) -> Self {
        Self {
            doors,
            status_interval_ticks: default_status_interval(),
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.doors.is_empty() {
            return Err(ConfigError::NoDoors);
        }
        let mut names = HashSet::new();
        for door in &self.doors {
            door.validate()?;
            if !names.insert(door.name.as_str()) {
                return Err(ConfigError::DuplicateDoor(door.name.clone()));
            }
        }
        Ok(())
    }
}

/// Totals across doors. Derived from door counters, never mutated directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OccupancySummary {
    pub total_entries: u64,
    pub total_exits: u64,
}

impl OccupancySummary {
    pub fn from_counters<'a>(counters: impl IntoIterator<Item = &'a DoorCounter>) -> Self {
        counters
            .into_iter()
            .fold(Self::default(), |acc, c| Self {
                total_entries: acc.total_entries + c.entries,
                total_exits: acc.total_exits + c.exits,
            })
    }

    pub fn total_occupancy(&self) -> i64 {
        self.total_entries as i64 - self.total_exits as i64
    }
}

/// Owns one tracker per door and aggregates their counters.
///
/// Doors share no state: a rejected tick for one door leaves every other
/// door and the summary unaffected.
pub struct OccupancyMonitor {
    doors: Vec<DoorTracker>,
    status_interval_ticks: u64,
    tick: u64,
}

impl OccupancyMonitor {
    pub fn new(config: MonitorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let doors = config
            .doors
            .into_iter()
            .map(DoorTracker::new)
            .collect::<Result<Vec<_>, _>>()?;
        for door in &doors {
            tracing::info!(door = %door.name(), line = door.config().line_position, "door configured");
        }
        Ok(Self {
            doors,
            status_interval_ticks: config.status_interval_ticks,
            tick: 0,
        })
    }

    /// Build from already constructed trackers, e.g. with custom sinks.
    pub fn from_trackers(doors: Vec<DoorTracker>) -> Result<Self, ConfigError> {
        if doors.is_empty() {
            return Err(ConfigError::NoDoors);
        }
        let mut names = HashSet::new();
        for door in &doors {
            if !names.insert(door.name().to_string()) {
                return Err(ConfigError::DuplicateDoor(door.name().to_string()));
            }
        }
        Ok(Self {
            doors,
            status_interval_ticks: default_status_interval(),
            tick: 0,
        })
    }

    pub fn with_status_interval(mut self, ticks: u64) -> Self {
        self.status_interval_ticks = ticks;
        self
    }

    pub fn door(&self, name: &str) -> Option<&DoorTracker> {
        self.doors.iter().find(|d| d.name() == name)
    }

    pub fn door_mut(&mut self, name: &str) -> Option<&mut DoorTracker> {
        self.doors.iter_mut().find(|d| d.name() == name)
    }

    pub fn doors(&self) -> impl Iterator<Item = &DoorTracker> {
        self.doors.iter()
    }

    /// Mutable access to all doors, e.g. to process them on separate threads.
    pub fn doors_mut(&mut self) -> &mut [DoorTracker] {
        &mut self.doors
    }

    /// Process one tick for a single door. `None` if no such door exists.
    pub fn process(
        &mut self,
        door: &str,
        detections: &[Detection],
    ) -> Option<Result<TickOutput, TrackerError>> {
        let tracker = self.door_mut(door)?;
        let result = tracker.update(detections);
        if let Err(err) = &result {
            tracing::warn!(door = %door, error = %err, "skipping tick");
        }
        Some(result)
    }

    /// Process one monitor tick: every door gets the detections returned by
    /// `detections_for`. A failing door is logged and skipped.
    pub fn process_all<F>(&mut self, mut detections_for: F) -> Vec<(String, Result<TickOutput, TrackerError>)>
    where
        F: FnMut(&str) -> Vec<Detection>,
    {
        let results = self
            .doors
            .iter_mut()
            .map(|tracker| {
                let detections = detections_for(tracker.name());
                let result = tracker.update(&detections);
                if let Err(err) = &result {
                    tracing::warn!(door = %tracker.name(), error = %err, "skipping tick");
                }
                (tracker.name().to_string(), result)
            })
            .collect();

        self.tick += 1;
        if self.status_interval_ticks > 0 && self.tick % self.status_interval_ticks == 0 {
            let summary = self.summary();
            tracing::info!(
                entries = summary.total_entries,
                exits = summary.total_exits,
                occupancy = summary.total_occupancy(),
                "occupancy status"
            );
        }
        results
    }

    /// Recompute totals from the current door counters.
    pub fn summary(&self) -> OccupancySummary {
        let counters: Vec<DoorCounter> = self.doors.iter().map(|d| d.counter()).collect();
        OccupancySummary::from_counters(&counters)
    }

    /// Per-door `(name, counter)` pairs in configuration order.
    pub fn door_counters(&self) -> Vec<(String, DoorCounter)> {
        self.doors
            .iter()
            .map(|d| (d.name().to_string(), d.counter()))
            .collect()
    }

    /// Reset one door. Returns false if no such door exists.
    pub fn reset(&mut self, door: &str) -> bool {
        match self.door_mut(door) {
            Some(tracker) => {
                tracker.reset();
                true
            }
            None => false,
        }
    }

    pub fn reset_all(&mut self) {
        self.doors.iter_mut().for_each(DoorTracker::reset);
        tracing::info!("all counters reset");
    }

    /// Log the end-of-run statistics.
    pub fn log_final_statistics(&self) {
        for (name, counter) in self.door_counters() {
            tracing::info!(door = %name, entries = counter.entries, exits = counter.exits, "final statistics");
        }
        tracing::info!(occupancy = self.summary().total_occupancy(), "final occupancy");
    }
}
