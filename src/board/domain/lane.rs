//! The closed set of board lanes.

use super::ParseLaneError;
use serde::{Deserialize, Serialize};

/// One of the three fixed task buckets on a board.
///
/// Tasks belong to exactly one lane at a time; within a lane the display
/// order is given by ascending rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    /// Work that has not started.
    Pending,
    /// Work currently underway.
    InProgress,
    /// Finished work.
    Completed,
}

impl Lane {
    /// All lanes in display order, left to right.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for Lane {
    type Error = ParseLaneError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseLaneError(value.to_owned())),
        }
    }
}
