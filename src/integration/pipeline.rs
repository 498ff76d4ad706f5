//! TranslationPipeline for combining team labelling with pitch translation.

use std::collections::BTreeMap;

use tracing::warn;

use super::FrameSource;
use crate::record::DetectionRecord;
use crate::team::TeamClassifier;
use crate::translate::{TeamAssignments, Translation, Translator};

/// Bundles a frame source with the team classifier and the translator.
///
/// Frames are processed one at a time: the players of each frame are
/// labelled from that frame's image, then the whole table is translated.
pub struct TranslationPipeline<S: FrameSource> {
    source: S,
    translator: Translator,
    classifier: TeamClassifier,
}

impl<S: FrameSource> TranslationPipeline<S> {
    /// Create a new pipeline with the given source, translator and classifier.
    pub fn new(source: S, translator: Translator, classifier: TeamClassifier) -> Self {
        Self {
            source,
            translator,
            classifier,
        }
    }

    /// Create a new pipeline with default configuration.
    pub fn with_default_config(source: S) -> Self {
        Self::new(source, Translator::default(), TeamClassifier::default())
    }

    /// Label the players of every frame in `0..total_frames`.
    ///
    /// Frames the source cannot provide are skipped; their players stay
    /// unlabelled.
    pub fn label_teams(
        &mut self,
        records: &[DetectionRecord],
        total_frames: u32,
    ) -> Result<TeamAssignments, S::Error> {
        let mut persons_by_frame: BTreeMap<u32, Vec<&DetectionRecord>> = BTreeMap::new();
        for record in records {
            if record.frame < total_frames && self.translator.is_person(record) {
                persons_by_frame.entry(record.frame).or_default().push(record);
            }
        }

        let mut teams = TeamAssignments::new();
        for (frame, persons) in persons_by_frame {
            let Some(image) = self.source.frame(frame)? else {
                warn!(frame, players = persons.len(), "frame image unavailable, players left unlabelled");
                continue;
            };
            let labels = self.classifier.label_players(&image, persons);
            teams.insert_frame(frame, labels);
        }

        Ok(teams)
    }

    /// Label teams, then translate the whole table into pitch space.
    pub fn run(
        &mut self,
        records: &[DetectionRecord],
        total_frames: u32,
    ) -> Result<Translation, S::Error> {
        let teams = self.label_teams(records, total_frames)?;
        Ok(self.translator.translate(records, total_frames, &teams))
    }

    /// Get a reference to the underlying frame source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying frame source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn classifier(&self) -> &TeamClassifier {
        &self.classifier
    }
}
