//! Structured notifications emitted by door trackers.
//!
//! A [`DoorTracker`](crate::DoorTracker) reports track creation, expiry and
//! crossing decisions through an [`EventSink`]. The default sink,
//! [`TracingSink`], logs them with `tracing`; channels, vectors and closures
//! can be plugged in instead.

use std::sync::mpsc;

use nalgebra::Point2;
use serde::Serialize;

use crate::tracker::{CrossingKind, DoorCounter, TrackId};

/// Notification side-channel. Carries the door name, the track and the
/// counters at the time of emission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DoorEvent {
    TrackCreated {
        door: String,
        track_id: TrackId,
        position: Point2<f32>,
        counter: DoorCounter,
    },
    TrackExpired {
        door: String,
        track_id: TrackId,
        ticks_unseen: u32,
        counter: DoorCounter,
    },
    CrossingCounted {
        door: String,
        track_id: TrackId,
        kind: CrossingKind,
        counter: DoorCounter,
    },
    CrossingSuppressed {
        door: String,
        track_id: TrackId,
        kind: CrossingKind,
        ticks_since_crossing: u32,
        counter: DoorCounter,
    },
}

impl DoorEvent {
    pub fn door(&self) -> &str {
        match self {
            Self::TrackCreated { door, .. }
            | Self::TrackExpired { door, .. }
            | Self::CrossingCounted { door, .. }
            | Self::CrossingSuppressed { door, .. } => door,
        }
    }

    pub fn track_id(&self) -> TrackId {
        match self {
            Self::TrackCreated { track_id, .. }
            | Self::TrackExpired { track_id, .. }
            | Self::CrossingCounted { track_id, .. }
            | Self::CrossingSuppressed { track_id, .. } => *track_id,
        }
    }

    pub fn counter(&self) -> DoorCounter {
        match self {
            Self::TrackCreated { counter, .. }
            | Self::TrackExpired { counter, .. }
            | Self::CrossingCounted { counter, .. }
            | Self::CrossingSuppressed { counter, .. } => *counter,
        }
    }
}

/// Receiver of [`DoorEvent`]s.
pub trait EventSink {
    fn emit(&mut self, event: DoorEvent);
}

/// Logs every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: DoorEvent) {
        match &event {
            DoorEvent::TrackCreated {
                door,
                track_id,
                position,
                ..
            } => {
                tracing::info!(door = %door, track_id, x = position.x, y = position.y, "new person detected");
            }
            DoorEvent::TrackExpired {
                door,
                track_id,
                ticks_unseen,
                ..
            } => {
                tracing::info!(door = %door, track_id, ticks_unseen, "lost track of person");
            }
            DoorEvent::CrossingCounted {
                door,
                track_id,
                kind,
                counter,
            } => {
                tracing::info!(
                    door = %door,
                    track_id,
                    kind = kind.as_str(),
                    entries = counter.entries,
                    exits = counter.exits,
                    occupancy = counter.occupancy(),
                    "crossing counted"
                );
            }
            DoorEvent::CrossingSuppressed {
                door,
                track_id,
                kind,
                ticks_since_crossing,
                ..
            } => {
                tracing::debug!(
                    door = %door,
                    track_id,
                    kind = kind.as_str(),
                    ticks_since_crossing,
                    "crossing suppressed by debounce"
                );
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: DoorEvent) {}
}

impl EventSink for Vec<DoorEvent> {
    fn emit(&mut self, event: DoorEvent) {
        self.push(event);
    }
}

impl EventSink for mpsc::Sender<DoorEvent> {
    fn emit(&mut self, event: DoorEvent) {
        // A dropped receiver only means nobody is listening any more.
        let _ = self.send(event);
    }
}

/// Adapts a closure into an [`EventSink`].
pub struct CallbackSink<F>(pub F);

impl<F: FnMut(DoorEvent)> EventSink for CallbackSink<F> {
    fn emit(&mut self, event: DoorEvent) {
        (self.0)(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(track_id: TrackId) -> DoorEvent {
        DoorEvent::TrackCreated {
            door: "Door 1".to_string(),
            track_id,
            position: Point2::new(1.0, 2.0),
            counter: DoorCounter::default(),
        }
    }

    #[test]
    fn test_accessors() {
        let event = created(4);
        assert_eq!(event.door(), "Door 1");
        assert_eq!(event.track_id(), 4);
        assert_eq!(event.counter().occupancy(), 0);
    }

    #[test]
    fn test_channel_sink() {
        let (tx, rx) = mpsc::channel();
        let mut sink = tx;
        sink.emit(created(0));
        sink.emit(created(1));
        let ids: Vec<TrackId> = rx.try_iter().map(|e| e.track_id()).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_callback_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = CallbackSink(|e: DoorEvent| seen.push(e.track_id()));
            sink.emit(created(9));
        }
        assert_eq!(seen, vec![9]);
    }

    #[test]
    fn test_serializes_with_tag() {
        let json = serde_json::to_value(created(2)).unwrap();
        assert_eq!(json["event"], "track_created");
        assert_eq!(json["track_id"], 2);
    }
}
