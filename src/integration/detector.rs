//! Trait for person detection backends.

use crate::tracker::Detection;

/// Trait for person detection backends.
///
/// Implement this trait to feed any detector (pose model, head detector,
/// depth sensor) into a door tracker. It must return one point per visible
/// person.
///
/// # Example
///
/// ```ignore
/// use doorcount_rs::integration::DetectionSource;
/// use doorcount_rs::Detection;
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Detection>, Self::Error> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error: std::error::Error + 'static;

    /// Run inference on raw image data and return one point per person.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to `Detection`.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

impl IntoDetections for Vec<(f32, f32)> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter().map(|(x, y)| Detection::new(x, y)).collect()
    }
}

impl IntoDetections for Option<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter().collect()
    }
}
