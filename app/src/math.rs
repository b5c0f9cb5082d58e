use glam::Vec3A;

use crate::HasGlamPosition;

pub const EPSILON: f32 = 0.000001;

/// Straight-line distance from the first to the last joint divided by the
/// length of the joint chain. 1.0 for a straight chain, towards 0 as the
/// chain folds back on itself.
pub fn chain_straightness<T: HasGlamPosition>(chain: &[T]) -> f32 {
    let (Some(first), Some(last)) = (chain.first(), chain.last()) else {
        return 1.0;
    };

    let path: f32 = chain
        .windows(2)
        .map(|pair| pair[0].pos().distance(*pair[1].pos()))
        .sum();

    if path < EPSILON {
        return 1.0;
    }

    (first.pos().distance(*last.pos()) / path).clamp(0.0, 1.0)
}

/// Angle between two vectors in degrees, [0, 180]. Degenerate vectors are
/// treated as aligned.
pub fn angle_between(u: Vec3A, v: Vec3A) -> f32 {
    let denom = u.length() * v.length();
    if denom < EPSILON {
        return 0.0;
    }
    (u.dot(v) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angle of `v` projected onto the image plane, degrees in [0, 360).
///
/// Image y grows downwards, so it is flipped: 0 is image right, 90 is image
/// up. Depth is ignored.
pub fn image_plane_angle(v: Vec3A) -> f32 {
    let deg = (-v.y).atan2(v.x).to_degrees();
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Smallest absolute difference between two compass angles, [0, 180].
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Linear falloff: 1.0 up to `full`, 0.0 from `zero` on.
pub fn linear_falloff(delta: f32, full: f32, zero: f32) -> f32 {
    if delta <= full {
        return 1.0;
    }
    if zero <= full {
        return 0.0;
    }
    ((zero - delta) / (zero - full)).clamp(0.0, 1.0)
}
