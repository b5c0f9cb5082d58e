use glam::Vec3A;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

use crate::config::CurlConfig;
use crate::hand::{Finger, Hand};
use crate::math;
use crate::traits::FingerFeatures;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumIs,
)]
pub enum CurlState {
    NoCurl,
    HalfCurl,
    FullCurl,
}

impl CurlState {
    /// Buckets a straightness ratio. Ratios above `no_curl_ratio` are
    /// straight, ratios below `half_curl_ratio` are closed.
    pub fn from_ratio(ratio: f32, config: &CurlConfig) -> Self {
        if ratio > config.no_curl_ratio {
            Self::NoCurl
        } else if ratio >= config.half_curl_ratio {
            Self::HalfCurl
        } else {
            Self::FullCurl
        }
    }

    /// Steps apart in the NoCurl, HalfCurl, FullCurl ordering.
    pub fn steps_from(&self, other: CurlState) -> usize {
        (*self as usize).abs_diff(other as usize)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumCount,
)]
pub enum Direction {
    HorizontalRight,
    DiagonalUpRight,
    VerticalUp,
    DiagonalUpLeft,
    HorizontalLeft,
    DiagonalDownLeft,
    VerticalDown,
    DiagonalDownRight,
}

impl Direction {
    /// Width of the sector around each nominal angle.
    pub const SECTOR_DEG: f32 = 360.0 / Self::COUNT as f32;

    /// Image-plane angle this direction stands for, image up at 90 degrees.
    pub fn nominal_angle(&self) -> f32 {
        *self as usize as f32 * Self::SECTOR_DEG
    }

    /// Nearest direction to an image-plane angle in degrees.
    pub fn from_angle(angle: f32) -> Self {
        let sector = (angle.rem_euclid(360.0) / Self::SECTOR_DEG).round() as usize % Self::COUNT;
        Self::iter().nth(sector).unwrap_or(Self::HorizontalRight)
    }
}

/// Geometry of one finger in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FingerState {
    pub finger: Finger,
    pub curl_ratio: f32,
    pub curl: CurlState,
    pub direction_angle: f32,
    pub direction: Direction,
    #[serde(skip)]
    vector: Vec3A,
}

/// Per-finger curl and direction of one hand, extracted once per frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandFeatures {
    fingers: [FingerState; Finger::COUNT],
}

impl HandFeatures {
    pub fn extract(hand: &Hand, config: &CurlConfig) -> Self {
        let fingers = Finger::ALL.map(|finger| {
            let curl_ratio = math::chain_straightness(hand.finger(finger));
            let vector = hand.finger_vector(finger);
            let direction_angle = math::image_plane_angle(vector);
            FingerState {
                finger,
                curl_ratio,
                curl: CurlState::from_ratio(curl_ratio, config),
                direction_angle,
                direction: Direction::from_angle(direction_angle),
                vector,
            }
        });

        let features = Self { fingers };
        log::trace!("extracted {:?}", features.pose_data());
        features
    }

    pub fn finger(&self, finger: Finger) -> &FingerState {
        &self.fingers[finger as usize]
    }

    pub fn fingers(&self) -> &[FingerState] {
        &self.fingers
    }

    /// (finger, curl, direction) per finger, in keypoint order.
    pub fn pose_data(&self) -> Vec<(Finger, CurlState, Direction)> {
        self.fingers
            .iter()
            .map(|s| (s.finger, s.curl, s.direction))
            .collect()
    }
}

impl FingerFeatures for HandFeatures {
    fn curl(&self, finger: Finger) -> CurlState {
        self.finger(finger).curl
    }

    fn direction_angle(&self, finger: Finger) -> f32 {
        self.finger(finger).direction_angle
    }

    fn angle_between(&self, a: Finger, b: Finger) -> f32 {
        math::angle_between(self.finger(a).vector, self.finger(b).vector)
    }
}
