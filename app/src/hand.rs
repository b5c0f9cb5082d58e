use error_stack::{Report, Result};
use glam::Vec3A;
use serde::{Deserialize, Serialize};
use strum::EnumCount;

use crate::{GError, HasGlamPosition};

/// Number of landmarks the upstream hand-pose estimator yields per hand.
pub const KEYPOINT_COUNT: usize = 21;
pub const WRIST: usize = 0;

/// Bones of the hand skeleton as pairs of keypoint indices, wrist outwards.
#[rustfmt::skip]
pub const CONNECTIONS: [(usize, usize); 20] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (0, 9), (9, 10), (10, 11), (11, 12),
    (0, 13), (13, 14), (14, 15), (15, 16),
    (0, 17), (17, 18), (18, 19), (19, 20),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keypoint(Vec3A);

impl Keypoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3A::new(x, y, z))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    pub fn z(&self) -> f32 {
        self.0.z
    }
}

impl HasGlamPosition for Keypoint {
    fn pos(&self) -> &Vec3A {
        &self.0
    }
}

impl From<Vec3A> for Keypoint {
    fn from(value: Vec3A) -> Self {
        Self(value)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum_macros::EnumIter,
    strum_macros::EnumCount,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Keypoint indices of this finger's joints, palm to tip.
    pub fn indices(&self) -> [usize; 4] {
        let first = WRIST + 1 + 4 * (*self as usize);
        [first, first + 1, first + 2, first + 3]
    }

    pub fn base_index(&self) -> usize {
        self.indices()[0]
    }

    pub fn tip_index(&self) -> usize {
        self.indices()[3]
    }
}

/// One detected hand: 21 keypoints in the estimator's fixed order.
///
/// 0 is the wrist, then four joints per finger from thumb to pinky, each
/// running base to tip. Construction is the only place the layout is
/// checked, so every `Hand` in circulation is well formed.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    keypoints: [Keypoint; KEYPOINT_COUNT],
}

impl Hand {
    pub fn new(points: &[Vec3A]) -> Result<Self, GError> {
        if points.len() != KEYPOINT_COUNT {
            return Err(Report::new(GError::MalformedInput).attach_printable(format!(
                "expected {KEYPOINT_COUNT} keypoints, got {}",
                points.len()
            )));
        }

        let mut keypoints = [Keypoint(Vec3A::ZERO); KEYPOINT_COUNT];
        for (i, (slot, point)) in keypoints.iter_mut().zip(points).enumerate() {
            if !point.is_finite() {
                return Err(Report::new(GError::MalformedInput)
                    .attach_printable(format!("keypoint {i} has a non-finite coordinate")));
            }
            *slot = Keypoint(*point);
        }

        Ok(Self { keypoints })
    }

    /// Builds a hand from the estimator's raw `[x, y, z]` arrays.
    pub fn from_raw<P: AsRef<[f32]>>(points: &[P]) -> Result<Self, GError> {
        let mut coords = Vec::with_capacity(points.len());
        for (i, point) in points.iter().enumerate() {
            match point.as_ref() {
                [x, y, z] => coords.push(Vec3A::new(*x, *y, *z)),
                other => {
                    return Err(Report::new(GError::MalformedInput).attach_printable(format!(
                        "keypoint {i} has {} coordinates, expected 3",
                        other.len()
                    )))
                }
            }
        }
        Self::new(&coords)
    }

    pub fn keypoints(&self) -> &[Keypoint; KEYPOINT_COUNT] {
        &self.keypoints
    }

    pub fn keypoint(&self, index: usize) -> Option<&Keypoint> {
        self.keypoints.get(index)
    }

    pub fn wrist(&self) -> &Keypoint {
        &self.keypoints[WRIST]
    }

    /// The finger's four joints, base to tip.
    pub fn finger(&self, finger: Finger) -> &[Keypoint] {
        let base = finger.base_index();
        &self.keypoints[base..=finger.tip_index()]
    }

    /// Vector from the finger's base joint to its tip.
    pub fn finger_vector(&self, finger: Finger) -> Vec3A {
        *self.keypoints[finger.tip_index()].pos() - *self.keypoints[finger.base_index()].pos()
    }

    /// Keypoint pairs of every skeleton bone, for drawing.
    pub fn bones(&self) -> impl Iterator<Item = (&Keypoint, &Keypoint)> + '_ {
        CONNECTIONS
            .iter()
            .map(|&(a, b)| (&self.keypoints[a], &self.keypoints[b]))
    }
}

impl TryFrom<Vec<Vec<f32>>> for Hand {
    type Error = Report<GError>;

    fn try_from(value: Vec<Vec<f32>>) -> std::result::Result<Self, Self::Error> {
        Self::from_raw(&value)
    }
}

impl TryFrom<&[[f32; 3]]> for Hand {
    type Error = Report<GError>;

    fn try_from(value: &[[f32; 3]]) -> std::result::Result<Self, Self::Error> {
        let points: Vec<Vec3A> = value.iter().map(|p| Vec3A::from_array(*p)).collect();
        Self::new(&points)
    }
}

const _: () = assert!(1 + 4 * Finger::COUNT == KEYPOINT_COUNT);
