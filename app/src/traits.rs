use glam::Vec3A;

use crate::features::{CurlState, Direction};
use crate::hand::Finger;

pub trait HasGlamPosition {
    fn pos(&self) -> &Vec3A;
}

/// Read access to per-finger features, implemented by anything a gesture
/// definition can be scored against.
pub trait FingerFeatures {
    fn curl(&self, finger: Finger) -> CurlState;

    /// Pointing angle of the finger on the image plane, degrees in [0, 360),
    /// counter-clockwise from image right with image up at 90.
    fn direction_angle(&self, finger: Finger) -> f32;

    fn direction(&self, finger: Finger) -> Direction {
        Direction::from_angle(self.direction_angle(finger))
    }

    /// Angle in degrees between two fingers' base to tip vectors.
    fn angle_between(&self, a: Finger, b: Finger) -> f32;
}
