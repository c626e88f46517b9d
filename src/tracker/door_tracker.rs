//! Per-door tick processing: matching, lifecycle, crossing detection and counting.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, TrackerError};
use crate::events::{DoorEvent, EventSink, TracingSink};
use crate::tracker::counter::DoorCounter;
use crate::tracker::crossing::{CrossingDetector, CrossingEvent, CrossingOutcome};
use crate::tracker::lifecycle::LifecycleManager;
use crate::tracker::line::{CountingLine, LineOrientation};
use crate::tracker::matching::{self, AssignmentResult, Detection, MatchStrategy};
use crate::tracker::registry::TrackRegistry;
use crate::tracker::track::{TrackId, TrackSnapshot};

/// Configuration for one monitored door.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    /// Door name carried on every notification
    pub name: String,
    /// Coordinate of the counting line in pixels
    pub line_position: f32,
    /// Declared orientation (not applied by the side test)
    pub line_orientation: LineOrientation,
    /// Detections closer than this bind to an existing track
    pub match_distance: f32,
    /// Minimum ticks since the last counted crossing before another counts
    pub debounce_ticks: u32,
    /// Accepted and validated, not applied by the crossing rule
    pub min_distance_from_line: f32,
    /// Ticks a track may go unmatched before it is dropped
    pub max_unseen_ticks: u32,
    /// First id handed out, and the id restored by `reset`
    pub initial_track_id: TrackId,
    /// Pairing policy for simultaneous detections
    pub matching: MatchStrategy,
    /// Optional `(width, height)` bounds; detections outside are rejected
    pub frame_size: Option<(u32, u32)>,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            name: "Door 1".to_string(),
            line_position: 240.0,
            line_orientation: LineOrientation::Horizontal,
            match_distance: 80.0,
            debounce_ticks: 15,
            min_distance_from_line: 30.0,
            max_unseen_ticks: 150,
            initial_track_id: 0,
            matching: MatchStrategy::Optimal,
            frame_size: None,
        }
    }
}

impl DoorConfig {
    pub fn new(name: impl Into<String>, line_position: f32) -> Self {
        Self {
            name: name.into(),
            line_position,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyDoorName);
        }
        let door = || self.name.clone();

        if !self.line_position.is_finite() {
            return Err(ConfigError::InvalidValue {
                door: door(),
                field: "line_position",
                value: self.line_position as f64,
            });
        }
        if !(self.match_distance.is_finite() && self.match_distance > 0.0) {
            return Err(ConfigError::NonPositive {
                door: door(),
                field: "match_distance",
                value: self.match_distance as f64,
            });
        }
        if self.debounce_ticks == 0 {
            return Err(ConfigError::NonPositive {
                door: door(),
                field: "debounce_ticks",
                value: 0.0,
            });
        }
        if self.max_unseen_ticks == 0 {
            return Err(ConfigError::NonPositive {
                door: door(),
                field: "max_unseen_ticks",
                value: 0.0,
            });
        }
        if !(self.min_distance_from_line.is_finite() && self.min_distance_from_line >= 0.0) {
            return Err(ConfigError::InvalidValue {
                door: door(),
                field: "min_distance_from_line",
                value: self.min_distance_from_line as f64,
            });
        }
        if let Some((width, height)) = self.frame_size {
            if width == 0 || height == 0 {
                return Err(ConfigError::NonPositive {
                    door: door(),
                    field: "frame_size",
                    value: width.min(height) as f64,
                });
            }
        }
        Ok(())
    }
}

/// Everything a renderer needs after one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickOutput {
    /// Live tracks in ascending id order
    pub tracks: Vec<TrackSnapshot>,
    /// Track bound to each input detection, in input order
    pub assignments: Vec<TrackId>,
    /// Crossings counted this tick
    pub crossings: Vec<CrossingEvent>,
    /// Counters after this tick
    pub counter: DoorCounter,
}

impl TickOutput {
    pub fn occupancy(&self) -> i64 {
        self.counter.occupancy()
    }
}

/// Tracker and counter for one door.
pub struct DoorTracker {
    config: DoorConfig,
    registry: TrackRegistry,
    crossing: CrossingDetector,
    lifecycle: LifecycleManager,
    counter: DoorCounter,
    tick: u64,
    sink: Box<dyn EventSink + Send>,
}

impl DoorTracker {
    /// Build a tracker that logs its notifications through `tracing`.
    pub fn new(config: DoorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let line = CountingLine::new(config.line_position, config.line_orientation);
        Ok(Self {
            registry: TrackRegistry::new(config.initial_track_id),
            crossing: CrossingDetector::new(line, config.debounce_ticks),
            lifecycle: LifecycleManager::new(config.max_unseen_ticks),
            counter: DoorCounter::default(),
            tick: 0,
            sink: Box::new(TracingSink),
            config,
        })
    }

    /// Replace the notification sink.
    pub fn with_sink(mut self, sink: impl EventSink + Send + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn set_sink(&mut self, sink: impl EventSink + Send + 'static) {
        self.sink = Box::new(sink);
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &DoorConfig {
        &self.config
    }

    pub fn counter(&self) -> DoorCounter {
        self.counter
    }

    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    /// Number of ticks processed since creation or the last reset.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn tracks(&self) -> Vec<TrackSnapshot> {
        self.registry.iter().map(|t| t.snapshot()).collect()
    }

    /// Process one tick of detections.
    ///
    /// All detections are validated first; on error the tick is rejected and
    /// no track state changes.
    pub fn update(&mut self, detections: &[Detection]) -> Result<TickOutput, TrackerError> {
        for (index, det) in detections.iter().enumerate() {
            det.validate(index, self.config.frame_size)?;
        }

        self.tick += 1;
        self.lifecycle.age_all(&mut self.registry);

        let track_ids: Vec<TrackId> = self.registry.iter().map(|t| t.track_id).collect();
        let track_points: Vec<_> = self.registry.iter().map(|t| t.position).collect();
        let dists = matching::distance_matrix(&track_points, detections);

        let AssignmentResult {
            matches,
            unmatched_detections,
            ..
        } = matching::assign(&dists, self.config.match_distance, self.config.matching);

        let mut assignments: Vec<Option<TrackId>> = vec![None; detections.len()];
        for &(row, col) in &matches {
            assignments[col] = Some(track_ids[row]);
        }
        for &col in &unmatched_detections {
            let position = detections[col].position;
            let side = self.crossing.line().side_of(&position);
            let track_id = self.registry.create(position, side);
            assignments[col] = Some(track_id);
            self.notify_created(track_id);
        }

        // Matched tracks are evaluated in detection order.
        let mut crossings = Vec::new();
        for (row, col) in matches {
            let track_id = track_ids[row];
            let Some(track) = self.registry.get_mut(track_id) else {
                continue;
            };
            track.mark_seen();

            match self.crossing.evaluate(track, detections[col].position) {
                CrossingOutcome::NoTransition => {}
                CrossingOutcome::Counted(kind) => {
                    self.counter.record(kind);
                    crossings.push(CrossingEvent { track_id, kind });
                    self.sink.emit(DoorEvent::CrossingCounted {
                        door: self.config.name.clone(),
                        track_id,
                        kind,
                        counter: self.counter,
                    });
                }
                CrossingOutcome::Suppressed {
                    kind,
                    ticks_since_crossing,
                } => {
                    self.sink.emit(DoorEvent::CrossingSuppressed {
                        door: self.config.name.clone(),
                        track_id,
                        kind,
                        ticks_since_crossing,
                        counter: self.counter,
                    });
                }
            }
        }

        for track in self.lifecycle.expire(&mut self.registry) {
            self.sink.emit(DoorEvent::TrackExpired {
                door: self.config.name.clone(),
                track_id: track.track_id,
                ticks_unseen: track.ticks_unseen,
                counter: self.counter,
            });
        }

        Ok(TickOutput {
            tracks: self.tracks(),
            assignments: assignments.into_iter().flatten().collect(),
            crossings,
            counter: self.counter,
        })
    }

    /// Full fresh start: counters zeroed, tracks dropped, ids restarted.
    pub fn reset(&mut self) {
        self.counter.reset();
        self.registry.clear();
        self.tick = 0;
        tracing::info!(door = %self.config.name, "counters reset");
    }

    fn notify_created(&mut self, track_id: TrackId) {
        if let Some(track) = self.registry.get(track_id) {
            self.sink.emit(DoorEvent::TrackCreated {
                door: self.config.name.clone(),
                track_id,
                position: track.position,
                counter: self.counter,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullSink;
    use crate::tracker::side::{CrossingKind, Side};

    fn tracker() -> DoorTracker {
        DoorTracker::new(DoorConfig::default())
            .unwrap()
            .with_sink(NullSink)
    }

    #[test]
    fn test_defaults_validate() {
        assert!(DoorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_config() {
        let bad = [
            DoorConfig {
                match_distance: 0.0,
                ..Default::default()
            },
            DoorConfig {
                match_distance: f32::NAN,
                ..Default::default()
            },
            DoorConfig {
                debounce_ticks: 0,
                ..Default::default()
            },
            DoorConfig {
                max_unseen_ticks: 0,
                ..Default::default()
            },
            DoorConfig {
                min_distance_from_line: -1.0,
                ..Default::default()
            },
            DoorConfig {
                line_position: f32::INFINITY,
                ..Default::default()
            },
            DoorConfig {
                frame_size: Some((640, 0)),
                ..Default::default()
            },
            DoorConfig {
                name: "  ".to_string(),
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(DoorTracker::new(config.clone()).is_err(), "{config:?}");
        }
    }

    #[test]
    fn test_new_track_gets_side_and_id() {
        let mut t = tracker();
        let out = t.update(&[Detection::new(100.0, 100.0)]).unwrap();
        assert_eq!(out.assignments, vec![0]);
        assert_eq!(out.tracks.len(), 1);
        assert_eq!(out.tracks[0].side, Side::Above);
        assert!(out.crossings.is_empty());
    }

    #[test]
    fn test_creation_tick_never_counts() {
        let mut t = tracker();
        let out = t.update(&[Detection::new(100.0, 300.0)]).unwrap();
        assert_eq!(out.tracks[0].side, Side::Below);
        assert_eq!(out.counter, DoorCounter::default());
    }

    #[test]
    fn test_invalid_detection_leaves_state_untouched() {
        let mut t = DoorTracker::new(DoorConfig {
            frame_size: Some((640, 480)),
            ..Default::default()
        })
        .unwrap()
        .with_sink(NullSink);
        t.update(&[Detection::new(100.0, 100.0)]).unwrap();
        let before = t.registry().get(0).cloned();

        let err = t
            .update(&[Detection::new(110.0, 110.0), Detection::new(100.0, 900.0)])
            .unwrap_err();
        assert!(matches!(err, TrackerError::InvalidDetection { index: 1, .. }));
        assert_eq!(t.registry().get(0).cloned(), before);
        assert_eq!(t.ticks(), 1);
    }

    #[test]
    fn test_two_people_keep_their_ids() {
        let mut t = tracker();
        t.update(&[Detection::new(100.0, 100.0), Detection::new(300.0, 100.0)])
            .unwrap();
        // Detections arrive in swapped order.
        let out = t
            .update(&[Detection::new(305.0, 120.0), Detection::new(105.0, 120.0)])
            .unwrap();
        assert_eq!(out.assignments, vec![1, 0]);
        assert_eq!(t.registry().len(), 2);
    }

    #[test]
    fn test_one_track_never_absorbs_two_detections() {
        let mut t = tracker();
        t.update(&[Detection::new(100.0, 100.0)]).unwrap();
        let out = t
            .update(&[Detection::new(110.0, 100.0), Detection::new(90.0, 105.0)])
            .unwrap();
        assert_eq!(out.assignments.len(), 2);
        assert_ne!(out.assignments[0], out.assignments[1]);
        assert_eq!(t.registry().len(), 2);
    }

    #[test]
    fn test_entry_and_exit() {
        let mut t = DoorTracker::new(DoorConfig {
            debounce_ticks: 2,
            ..Default::default()
        })
        .unwrap()
        .with_sink(NullSink);

        t.update(&[Detection::new(100.0, 220.0)]).unwrap();
        let out = t.update(&[Detection::new(100.0, 260.0)]).unwrap();
        assert_eq!(
            out.crossings,
            vec![CrossingEvent {
                track_id: 0,
                kind: CrossingKind::Entry
            }]
        );
        t.update(&[Detection::new(100.0, 270.0)]).unwrap();
        let out = t.update(&[Detection::new(100.0, 230.0)]).unwrap();
        assert_eq!(out.crossings[0].kind, CrossingKind::Exit);
        assert_eq!(out.counter.entries, 1);
        assert_eq!(out.counter.exits, 1);
        assert_eq!(out.occupancy(), 0);
    }
}
