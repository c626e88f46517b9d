//! Integration module for connecting person detectors with door tracking.
//!
//! The detector itself is an external capability; this module provides the
//! trait it plugs into, helpers for turning its output into points, and a
//! per-door pipeline.

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::{DoorPipeline, FrameOutcome};
