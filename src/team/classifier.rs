//! Team classifier: cluster crops by appearance, then cap each team at the roster size.

use image::RgbImage;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::crop::{CropWindow, PlayerCrop};
use super::kmeans::KMeans;
use super::{Team, TeamLabel};
use crate::record::DetectionRecord;

/// Configuration for the TeamClassifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamClassifierConfig {
    /// Players per side on the field at one time
    pub roster_cap: usize,
    /// Canonical crop width in pixels
    pub crop_width: u32,
    /// Canonical crop height in pixels
    pub crop_height: u32,
    /// Jersey region kept from the canonical crop
    pub torso: Option<CropWindow>,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for TeamClassifierConfig {
    fn default() -> Self {
        Self {
            roster_cap: 7,
            crop_width: 128,
            crop_height: 256,
            torso: Some(CropWindow {
                x: 30,
                y: 30,
                width: 68,
                height: 70,
            }),
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }
}

/// Splits the players of a single frame into two teams.
///
/// Every frame is classified independently; labels are not kept consistent
/// across frames.
#[derive(Debug, Clone, Default)]
pub struct TeamClassifier {
    config: TeamClassifierConfig,
}

impl TeamClassifier {
    pub fn new(config: TeamClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TeamClassifierConfig {
        &self.config
    }

    /// Crops for every tracked person that is visible in `frame`.
    pub fn crops<'a, I>(&self, frame: &RgbImage, persons: I) -> Vec<PlayerCrop>
    where
        I: IntoIterator<Item = &'a DetectionRecord>,
    {
        persons
            .into_iter()
            .filter_map(|record| {
                let crop = PlayerCrop::extract(
                    frame,
                    record,
                    self.config.crop_width,
                    self.config.crop_height,
                    self.config.torso,
                );
                if crop.is_none() {
                    debug!(
                        frame = record.frame,
                        track_id = ?record.track_id,
                        "person skipped: untracked or outside the image"
                    );
                }
                crop
            })
            .collect()
    }

    /// Team label per tracked person in `frame`.
    pub fn label_players<'a, I>(&self, frame: &RgbImage, persons: I) -> Vec<TeamLabel>
    where
        I: IntoIterator<Item = &'a DetectionRecord>,
    {
        let crops = self.crops(frame, persons);
        self.label_crops(&crops)
    }

    /// Cluster the crops into two teams and apply roster balancing.
    pub fn label_crops(&self, crops: &[PlayerCrop]) -> Vec<TeamLabel> {
        let Some(first) = crops.first() else {
            return Vec::new();
        };

        let dim = first.features().len();
        let mut features = Array2::<f32>::zeros((crops.len(), dim));
        for (mut row, crop) in features.rows_mut().into_iter().zip(crops) {
            for (dst, &px) in row.iter_mut().zip(crop.features()) {
                *dst = f32::from(px);
            }
        }

        let clustering = KMeans::new(self.config.max_iterations, self.config.tolerance)
            .fit(features.view());
        let raw: Vec<Team> = clustering.labels.iter().map(|&c| Team::from_cluster(c)).collect();
        let balanced = balance_roster(&raw, clustering.distances.view(), self.config.roster_cap);

        debug!(
            players = crops.len(),
            raw_sizes = ?clustering.cluster_sizes(),
            rebalanced = balanced != raw,
            "team labels computed"
        );

        crops
            .iter()
            .zip(balanced)
            .map(|(crop, team)| TeamLabel {
                track_id: crop.track_id,
                team,
            })
            .collect()
    }
}

/// Cap both teams at `cap` players.
///
/// Only applies when at most `2 * cap` players are present, i.e. both full
/// squads and no extra detections. If one cluster is larger than `cap`, its
/// `cap` members closest to the cluster center keep their team and everyone
/// else is put on the other team. `distances` holds each sample's distance
/// to cluster 0 and cluster 1.
pub fn balance_roster(labels: &[Team], distances: ArrayView2<f64>, cap: usize) -> Vec<Team> {
    if labels.len() > 2 * cap {
        return labels.to_vec();
    }

    for team in [Team::Second, Team::First] {
        let mut members: Vec<usize> = (0..labels.len()).filter(|&i| labels[i] == team).collect();
        if members.len() <= cap {
            continue;
        }

        let column = usize::from(team.index());
        members.sort_by(|&a, &b| distances[[a, column]].total_cmp(&distances[[b, column]]));

        let mut balanced = vec![team.opposite(); labels.len()];
        for &i in &members[..cap] {
            balanced[i] = team;
        }
        return balanced;
    }

    labels.to_vec()
}
