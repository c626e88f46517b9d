mod counter;
mod crossing;
mod door_tracker;
mod lifecycle;
mod line;
mod matching;
mod registry;
mod side;
mod track;

pub use counter::DoorCounter;
pub use crossing::{CrossingDetector, CrossingEvent, CrossingOutcome};
pub use door_tracker::{DoorConfig, DoorTracker, TickOutput};
pub use lifecycle::LifecycleManager;
pub use line::{CountingLine, LineOrientation};
pub use matching::{
    AssignmentResult, Detection, MatchStrategy, assign, distance_matrix, greedy_assignment,
    linear_assignment,
};
pub use registry::TrackRegistry;
pub use side::{CrossingKind, Side};
pub use track::{FRESH_TRACK_TICKS, Track, TrackId, TrackSnapshot};
