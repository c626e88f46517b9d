//! Matching utilities: detections, distance matrices and one-to-one assignment.

use nalgebra::{Point2, distance};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Cost given to pairs at or beyond the match distance before solving.
const GATED_COST: f64 = 1e6;

/// Detection input for the tracker: one representative point per person.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Position in pixels
    pub position: Point2<f32>,
}

impl Detection {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Point2::new(x, y),
        }
    }

    pub fn from_point(position: Point2<f32>) -> Self {
        Self { position }
    }

    /// Reject non-finite coordinates and, when a frame size is given,
    /// positions outside `[0, width) x [0, height)`.
    pub fn validate(&self, index: usize, frame_size: Option<(u32, u32)>) -> Result<(), TrackerError> {
        let (x, y) = (self.position.x, self.position.y);
        let invalid = |reason| TrackerError::InvalidDetection { index, x, y, reason };

        if !x.is_finite() || !y.is_finite() {
            return Err(invalid("non-finite coordinate"));
        }
        if let Some((width, height)) = frame_size {
            if x < 0.0 || y < 0.0 || x >= width as f32 || y >= height as f32 {
                return Err(invalid("outside frame"));
            }
        }
        Ok(())
    }
}

/// How detections are paired with tracks inside one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Minimum total distance assignment (Jonker-Volgenant).
    #[default]
    Optimal,
    /// Closest pairs first, each track and detection used at most once.
    Greedy,
}

/// Euclidean distance matrix between tracks (rows) and detections (columns).
pub fn distance_matrix(track_points: &[Point2<f32>], detections: &[Detection]) -> Array2<f32> {
    let mut dists = Array2::zeros((track_points.len(), detections.len()));
    for (i, t) in track_points.iter().enumerate() {
        for (j, d) in detections.iter().enumerate() {
            dists[[i, j]] = distance(t, &d.position);
        }
    }
    dists
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    /// `(track_row, detection_col)` pairs
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

impl AssignmentResult {
    fn unmatched(num_rows: usize, num_cols: usize) -> Self {
        Self {
            matches: vec![],
            unmatched_tracks: (0..num_rows).collect(),
            unmatched_detections: (0..num_cols).collect(),
        }
    }

    fn from_matches(mut matches: Vec<(usize, usize)>, num_rows: usize, num_cols: usize) -> Self {
        matches.sort_unstable_by_key(|&(_, col)| col);

        let mut track_free = vec![true; num_rows];
        let mut det_free = vec![true; num_cols];
        for &(row, col) in &matches {
            track_free[row] = false;
            det_free[col] = false;
        }

        Self {
            matches,
            unmatched_tracks: free_indices(&track_free),
            unmatched_detections: free_indices(&det_free),
        }
    }
}

fn free_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &free)| if free { Some(i) } else { None })
        .collect()
}

/// Pair tracks and detections so that no row or column is used twice and
/// every accepted pair costs strictly less than `thresh`.
pub fn assign(cost_matrix: &Array2<f32>, thresh: f32, strategy: MatchStrategy) -> AssignmentResult {
    match strategy {
        MatchStrategy::Optimal => linear_assignment(cost_matrix, thresh),
        MatchStrategy::Greedy => greedy_assignment(cost_matrix, thresh),
    }
}

pub fn linear_assignment(cost_matrix: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult::unmatched(num_rows, num_cols);
    }

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), GATED_COST);

    for i in 0..num_rows {
        for j in 0..num_cols {
            let cost = cost_matrix[[i, j]];
            if cost < thresh {
                padded[[i, j]] = cost as f64;
            }
        }
    }

    let row_to_col = match lapjv::lapjv(&padded) {
        Ok((row_to_col, _)) => row_to_col,
        Err(err) => {
            tracing::debug!(?err, "lapjv failed, falling back to greedy assignment");
            return greedy_assignment(cost_matrix, thresh);
        }
    };

    let matches = row_to_col
        .iter()
        .enumerate()
        .filter(|&(row, &col)| row < num_rows && col < num_cols && cost_matrix[[row, col]] < thresh)
        .map(|(row, &col)| (row, col))
        .collect();

    AssignmentResult::from_matches(matches, num_rows, num_cols)
}

pub fn greedy_assignment(cost_matrix: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    let mut candidates: Vec<(f32, usize, usize)> = cost_matrix
        .indexed_iter()
        .filter(|&(_, &cost)| cost < thresh)
        .map(|((row, col), &cost)| (cost, col, row))
        .collect();
    // Ties: earlier detection first, then lower track row.
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    let mut track_used = vec![false; num_rows];
    let mut det_used = vec![false; num_cols];
    let mut matches = Vec::new();

    for (_, col, row) in candidates {
        if track_used[row] || det_used[col] {
            continue;
        }
        track_used[row] = true;
        det_used[col] = true;
        matches.push((row, col));
    }

    AssignmentResult::from_matches(matches, num_rows, num_cols)
}
