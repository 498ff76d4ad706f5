use serde::{Deserialize, Serialize};

/// Side of the pitch as seen from the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// One of the four lines across the pitch that carry a pair of landmarks.
///
/// "Far" lines are away from the camera, "near" lines are closest to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LandmarkLine {
    FarCorners,
    FarEndZone,
    NearEndZone,
    NearCorners,
}

impl LandmarkLine {
    pub const ALL: [LandmarkLine; 4] = [
        LandmarkLine::FarCorners,
        LandmarkLine::FarEndZone,
        LandmarkLine::NearEndZone,
        LandmarkLine::NearCorners,
    ];

    /// Position in [`LandmarkLine::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            LandmarkLine::FarCorners => 0,
            LandmarkLine::FarEndZone => 1,
            LandmarkLine::NearEndZone => 2,
            LandmarkLine::NearCorners => 3,
        }
    }

    /// The two landmarks on this line, left first.
    pub fn classes(self) -> [LandmarkClass; 2] {
        match self {
            LandmarkLine::FarCorners => [LandmarkClass::FarLeftCorner, LandmarkClass::FarRightCorner],
            LandmarkLine::FarEndZone => {
                [LandmarkClass::FarLeftEndZone, LandmarkClass::FarRightEndZone]
            }
            LandmarkLine::NearEndZone => {
                [LandmarkClass::NearLeftEndZone, LandmarkClass::NearRightEndZone]
            }
            LandmarkLine::NearCorners => {
                [LandmarkClass::NearLeftCorner, LandmarkClass::NearRightCorner]
            }
        }
    }

    /// Short code used by the annotation set ("TC", "TF", "BF", "BC").
    pub fn code(self) -> &'static str {
        match self {
            LandmarkLine::FarCorners => "TC",
            LandmarkLine::FarEndZone => "TF",
            LandmarkLine::NearEndZone => "BF",
            LandmarkLine::NearCorners => "BC",
        }
    }
}

impl std::fmt::Display for LandmarkLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A pitch-corner feature the detector is trained to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LandmarkClass {
    FarLeftCorner,
    FarRightCorner,
    FarLeftEndZone,
    FarRightEndZone,
    NearLeftEndZone,
    NearRightEndZone,
    NearLeftCorner,
    NearRightCorner,
}

impl LandmarkClass {
    pub const ALL: [LandmarkClass; 8] = [
        LandmarkClass::FarLeftCorner,
        LandmarkClass::FarRightCorner,
        LandmarkClass::FarLeftEndZone,
        LandmarkClass::FarRightEndZone,
        LandmarkClass::NearLeftEndZone,
        LandmarkClass::NearRightEndZone,
        LandmarkClass::NearLeftCorner,
        LandmarkClass::NearRightCorner,
    ];

    /// Map a detector class id onto a landmark, `None` for every other class.
    pub fn from_class_id(class_id: u32) -> Option<Self> {
        match class_id {
            31 => Some(LandmarkClass::FarLeftCorner),
            32 => Some(LandmarkClass::FarRightCorner),
            34 => Some(LandmarkClass::FarLeftEndZone),
            35 => Some(LandmarkClass::FarRightEndZone),
            39 => Some(LandmarkClass::NearLeftEndZone),
            40 => Some(LandmarkClass::NearRightEndZone),
            41 => Some(LandmarkClass::NearLeftCorner),
            42 => Some(LandmarkClass::NearRightCorner),
            _ => None,
        }
    }

    pub fn class_id(self) -> u32 {
        match self {
            LandmarkClass::FarLeftCorner => 31,
            LandmarkClass::FarRightCorner => 32,
            LandmarkClass::FarLeftEndZone => 34,
            LandmarkClass::FarRightEndZone => 35,
            LandmarkClass::NearLeftEndZone => 39,
            LandmarkClass::NearRightEndZone => 40,
            LandmarkClass::NearLeftCorner => 41,
            LandmarkClass::NearRightCorner => 42,
        }
    }

    /// Position in [`LandmarkClass::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self.line().index() * 2
            + match self.side() {
                Side::Left => 0,
                Side::Right => 1,
            }
    }

    pub fn line(self) -> LandmarkLine {
        match self {
            LandmarkClass::FarLeftCorner | LandmarkClass::FarRightCorner => {
                LandmarkLine::FarCorners
            }
            LandmarkClass::FarLeftEndZone | LandmarkClass::FarRightEndZone => {
                LandmarkLine::FarEndZone
            }
            LandmarkClass::NearLeftEndZone | LandmarkClass::NearRightEndZone => {
                LandmarkLine::NearEndZone
            }
            LandmarkClass::NearLeftCorner | LandmarkClass::NearRightCorner => {
                LandmarkLine::NearCorners
            }
        }
    }

    pub fn side(self) -> Side {
        match self {
            LandmarkClass::FarLeftCorner
            | LandmarkClass::FarLeftEndZone
            | LandmarkClass::NearLeftEndZone
            | LandmarkClass::NearLeftCorner => Side::Left,
            LandmarkClass::FarRightCorner
            | LandmarkClass::FarRightEndZone
            | LandmarkClass::NearRightEndZone
            | LandmarkClass::NearRightCorner => Side::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_id_roundtrip_and_unknown_ids() {
        for class in LandmarkClass::ALL {
            assert_eq!(LandmarkClass::from_class_id(class.class_id()), Some(class));
        }
        assert_eq!(LandmarkClass::from_class_id(0), None);
        assert_eq!(LandmarkClass::from_class_id(33), None);
    }

    #[test]
    fn test_every_line_has_two_classes_on_opposite_sides() {
        for line in LandmarkLine::ALL {
            let [left, right] = line.classes();
            assert_eq!(left.line(), line);
            assert_eq!(right.line(), line);
            assert_eq!(left.side(), Side::Left);
            assert_eq!(right.side(), Side::Right);
        }
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, class) in LandmarkClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), i);
        }
        for (i, line) in LandmarkLine::ALL.iter().enumerate() {
            assert_eq!(line.index(), i);
        }
    }
}
