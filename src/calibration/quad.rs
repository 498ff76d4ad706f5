//! Per-frame selection of the four calibration landmarks.

use serde::{Deserialize, Serialize};

use crate::calibration::error::LandmarkError;
use crate::pitch::{LandmarkClass, LandmarkLine, PitchLayout};

/// A landmark detection that passed the confidence filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub class: LandmarkClass,
    /// Normalized image coordinate of the box center
    pub point: [f64; 2],
    pub confidence: f64,
}

/// Four landmarks on two complete pitch lines.
///
/// Lines are ordered by ascending preference rank; within a line the left
/// landmark comes first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeypointQuad {
    pub line_keys: [LandmarkLine; 2],
    /// Normalized image coordinates, aligned with `classes`
    pub points: [[f64; 2]; 4],
    pub classes: [LandmarkClass; 4],
    /// Frame the landmarks were detected in (earlier than the requested one after look-back)
    pub source_frame: u32,
}

impl KeypointQuad {
    /// Detector class ids of the four landmarks.
    pub fn class_ids(&self) -> [u32; 4] {
        self.classes.map(LandmarkClass::class_id)
    }
}

/// Pick the two most preferred complete lines among one frame's landmarks.
///
/// Returns `Ok(None)` when fewer than two lines have both landmarks. More
/// than two landmarks on a line, or the same landmark twice, means the input
/// was not deduplicated and is reported as an error.
pub fn select_quad(
    frame: u32,
    landmarks: &[Landmark],
    layout: &PitchLayout,
) -> Result<Option<KeypointQuad>, LandmarkError> {
    let mut by_line: [Vec<&Landmark>; 4] = Default::default();
    for landmark in landmarks {
        by_line[landmark.class.line().index()].push(landmark);
    }

    for line in LandmarkLine::ALL {
        let count = by_line[line.index()].len();
        if count >= 3 {
            return Err(LandmarkError::OvercrowdedLine { frame, line, count });
        }
    }

    let mut complete = Vec::with_capacity(LandmarkLine::ALL.len());
    for line in LandmarkLine::ALL {
        let members = &by_line[line.index()];
        if members.len() != 2 {
            continue;
        }
        let [left_class, right_class] = line.classes();
        let left = members.iter().find(|l| l.class == left_class);
        let right = members.iter().find(|l| l.class == right_class);
        match (left, right) {
            (Some(left), Some(right)) => complete.push((line, left.point, right.point)),
            _ => {
                return Err(LandmarkError::DuplicateClass {
                    frame,
                    class: members[0].class,
                });
            }
        }
    }

    if complete.len() < 2 {
        return Ok(None);
    }

    complete.sort_by_key(|(line, _, _)| (layout.preference(*line), line.index()));
    let (first, first_left, first_right) = complete[0];
    let (second, second_left, second_right) = complete[1];
    let [a, b] = first.classes();
    let [c, d] = second.classes();

    Ok(Some(KeypointQuad {
        line_keys: [first, second],
        points: [first_left, first_right, second_left, second_right],
        classes: [a, b, c, d],
        source_frame: frame,
    }))
}
