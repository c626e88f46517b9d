//! Monitored line ("door") geometry.
//!
//! The side test always compares the position's `y` coordinate against
//! `position`. `orientation` is carried as configuration only; a vertical
//! line is accepted but still evaluated against `y`.

use std::fmt;
use std::str::FromStr;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tracker::side::Side;

/// Declared orientation of the monitored line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LineOrientation {
    #[default]
    Horizontal,
    Vertical,
}

impl LineOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl FromStr for LineOrientation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(ConfigError::UnknownOrientation(s.to_string())),
        }
    }
}

impl TryFrom<String> for LineOrientation {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LineOrientation> for String {
    fn from(value: LineOrientation) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for LineOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A counting line at a fixed pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountingLine {
    /// Boundary coordinate in pixels
    pub position: f32,
    /// Declared orientation
    pub orientation: LineOrientation,
}

impl CountingLine {
    #[inline]
    pub fn new(position: f32, orientation: LineOrientation) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// `Below` if the point lies strictly past the line, `Above` otherwise.
    #[inline]
    pub fn side_of(&self, point: &Point2<f32>) -> Side {
        if point.y > self.position {
            Side::Below
        } else {
            Side::Above
        }
    }
}
