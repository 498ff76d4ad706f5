//! Appearance-based team assignment of the players in one frame.

mod bbox;
mod classifier;
mod crop;
mod kmeans;

pub use bbox::{NormalizedBox, PixelRect};
pub use classifier::{TeamClassifier, TeamClassifierConfig, balance_roster};
pub use crop::{CropWindow, PlayerCrop};
pub use kmeans::{Clustering, KMeans};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the two sides on the field.
///
/// Serialized as its index, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Team {
    First,
    Second,
}

impl Team {
    /// Team for a k-means cluster index.
    #[inline]
    pub fn from_cluster(cluster: usize) -> Self {
        if cluster == 0 { Team::First } else { Team::Second }
    }

    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Team::First => 0,
            Team::Second => 1,
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Team::First => Team::Second,
            Team::Second => Team::First,
        }
    }
}

impl From<Team> for u8 {
    fn from(team: Team) -> u8 {
        team.index()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("team index must be 0 or 1, got {0}")]
pub struct InvalidTeamIndex(pub u8);

impl TryFrom<u8> for Team {
    type Error = InvalidTeamIndex;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Team::First),
            1 => Ok(Team::Second),
            other => Err(InvalidTeamIndex(other)),
        }
    }
}

/// Team of one tracked player in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamLabel {
    pub track_id: u32,
    pub team: Team,
}
