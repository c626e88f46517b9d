//! Line-crossing people counter.
//!
//! Turns a per-tick stream of point detections into tracked identities,
//! debounced entry/exit events and a running occupancy count for one or
//! more monitored doors.

pub mod error;
pub mod events;
pub mod integration;
pub mod monitor;
pub mod tracker;

pub use error::{ConfigError, PipelineError, TrackerError};
pub use events::{CallbackSink, DoorEvent, EventSink, NullSink, TracingSink};
pub use monitor::{MonitorConfig, OccupancyMonitor, OccupancySummary};
pub use tracker::{
    CrossingEvent, CrossingKind, Detection, DoorConfig, DoorCounter, DoorTracker, LineOrientation,
    MatchStrategy, Side, TickOutput, Track, TrackId, TrackSnapshot,
};
