//! DoorPipeline for combining person detection with door tracking.

use crate::error::PipelineError;
use crate::tracker::{DoorTracker, TickOutput};

use super::DetectionSource;

/// What happened to one camera frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The frame was not scheduled for detection; tracker untouched.
    Skipped,
    /// Detection ran and the tracker advanced one tick.
    Processed(TickOutput),
}

impl FrameOutcome {
    pub fn tick(&self) -> Option<&TickOutput> {
        match self {
            Self::Skipped => None,
            Self::Processed(out) => Some(out),
        }
    }
}

/// Bundles a `DetectionSource` with the `DoorTracker` of one door.
///
/// Detection runs on every `process_every_n_frames`-th frame only, so the
/// tracker's tick timers count processed frames, not camera frames.
pub struct DoorPipeline<D: DetectionSource> {
    detector: D,
    tracker: DoorTracker,
    process_every_n_frames: u32,
    frame_count: u64,
    person_detected: bool,
}

impl<D: DetectionSource> DoorPipeline<D> {
    /// Create a pipeline that runs detection on every frame.
    pub fn new(detector: D, tracker: DoorTracker) -> Self {
        Self {
            detector,
            tracker,
            process_every_n_frames: 1,
            frame_count: 0,
            person_detected: false,
        }
    }

    /// Only run detection on every `n`-th frame. `0` is treated as `1`.
    pub fn with_frame_stride(mut self, n: u32) -> Self {
        self.process_every_n_frames = n.max(1);
        self
    }

    /// Process a single camera frame.
    ///
    /// On a detector error the frame is dropped and the tracker is left as
    /// it was; ageing resumes with the next processed frame.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameOutcome, PipelineError<D::Error>> {
        self.frame_count += 1;
        if self.frame_count % self.process_every_n_frames as u64 != 0 {
            return Ok(FrameOutcome::Skipped);
        }

        let detections = self
            .detector
            .detect(input, width, height)
            .map_err(PipelineError::Detector)?;
        let output = self.tracker.update(&detections)?;
        self.person_detected = !detections.is_empty();
        Ok(FrameOutcome::Processed(output))
    }

    /// Whether the last processed frame contained at least one person.
    pub fn is_person_detected(&self) -> bool {
        self.person_detected
    }

    /// Camera frames seen, processed or not.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    pub fn tracker(&self) -> &DoorTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut DoorTracker {
        &mut self.tracker
    }

    pub fn into_parts(self) -> (D, DoorTracker) {
        (self.detector, self.tracker)
    }
}
