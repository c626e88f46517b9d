use serde::{Deserialize, Serialize};

/// Which side of the monitored line a position lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// At or before the line (outside)
    Above,
    /// Strictly past the line (inside)
    Below,
}

/// Direction of a counted crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossingKind {
    /// `Above` to `Below`
    Entry,
    /// `Below` to `Above`
    Exit,
}

impl CrossingKind {
    /// Classify a side transition. Returns `None` when the side did not change.
    pub fn from_transition(old: Side, new: Side) -> Option<Self> {
        match (old, new) {
            (Side::Above, Side::Below) => Some(Self::Entry),
            (Side::Below, Side::Above) => Some(Self::Exit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_kinds() {
        assert_eq!(
            CrossingKind::from_transition(Side::Above, Side::Below),
            Some(CrossingKind::Entry)
        );
        assert_eq!(
            CrossingKind::from_transition(Side::Below, Side::Above),
            Some(CrossingKind::Exit)
        );
        assert_eq!(CrossingKind::from_transition(Side::Above, Side::Above), None);
        assert_eq!(CrossingKind::from_transition(Side::Below, Side::Below), None);
    }
}
