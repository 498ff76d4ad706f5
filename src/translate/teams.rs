use std::collections::HashMap;

use crate::team::{Team, TeamLabel};

/// Team labels of a whole run, keyed by (frame, track id).
#[derive(Debug, Clone, Default)]
pub struct TeamAssignments {
    labels: HashMap<(u32, u32), Team>,
}

impl TeamAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the labels computed for one frame.
    pub fn insert_frame<I>(&mut self, frame: u32, labels: I)
    where
        I: IntoIterator<Item = TeamLabel>,
    {
        for label in labels {
            self.labels.insert((frame, label.track_id), label.team);
        }
    }

    pub fn get(&self, frame: u32, track_id: u32) -> Option<Team> {
        self.labels.get(&(frame, track_id)).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
