//! Landmark sets for a right hand, palm towards the camera, in pixel
//! coordinates (y down) with depth negative towards the camera.

use crate::hand::{Hand, KEYPOINT_COUNT};

pub const PAPER: [[f32; 3]; KEYPOINT_COUNT] = [
    [300.0, 400.0, 0.0],
    [260.0, 380.0, 0.0],
    [232.0, 352.0, 0.0],
    [212.0, 326.0, 0.0],
    [196.0, 304.0, 0.0],
    [270.0, 300.0, 0.0],
    [266.0, 260.0, 0.0],
    [263.0, 235.0, 0.0],
    [261.0, 210.0, 0.0],
    [300.0, 295.0, 0.0],
    [300.0, 250.0, 0.0],
    [300.0, 222.0, 0.0],
    [300.0, 195.0, 0.0],
    [328.0, 300.0, 0.0],
    [332.0, 258.0, 0.0],
    [334.0, 232.0, 0.0],
    [336.0, 208.0, 0.0],
    [352.0, 310.0, 0.0],
    [359.0, 278.0, 0.0],
    [363.0, 258.0, 0.0],
    [366.0, 240.0, 0.0],
];

/// Clenched fist, thumb folded diagonally up across the front of the fingers.
pub const ROCK: [[f32; 3]; KEYPOINT_COUNT] = [
    [300.0, 400.0, 0.0],
    [275.0, 385.0, 0.0],
    [255.0, 355.0, -15.0],
    [265.0, 332.0, -30.0],
    [312.0, 322.0, -38.0],
    [270.0, 300.0, 0.0],
    [268.0, 280.0, -30.0],
    [268.0, 305.0, -35.0],
    [269.0, 322.0, -20.0],
    [300.0, 296.0, 0.0],
    [300.0, 276.0, -32.0],
    [300.0, 302.0, -38.0],
    [300.0, 320.0, -22.0],
    [328.0, 300.0, 0.0],
    [329.0, 282.0, -28.0],
    [329.0, 305.0, -33.0],
    [329.0, 321.0, -18.0],
    [352.0, 310.0, 0.0],
    [353.0, 295.0, -22.0],
    [353.0, 313.0, -26.0],
    [353.0, 326.0, -14.0],
];

/// Index and middle straight up, ring and pinky curled, thumb tucked.
pub const SCISSORS: [[f32; 3]; KEYPOINT_COUNT] = [
    [300.0, 400.0, 0.0],
    [275.0, 385.0, 0.0],
    [262.0, 362.0, -12.0],
    [272.0, 342.0, -24.0],
    [298.0, 332.0, -30.0],
    [270.0, 300.0, 0.0],
    [267.0, 260.0, 0.0],
    [265.0, 235.0, 0.0],
    [264.0, 210.0, 0.0],
    [300.0, 295.0, 0.0],
    [302.0, 250.0, 0.0],
    [303.0, 222.0, 0.0],
    [304.0, 195.0, 0.0],
    [328.0, 300.0, 0.0],
    [329.0, 282.0, -28.0],
    [329.0, 305.0, -33.0],
    [329.0, 321.0, -18.0],
    [352.0, 310.0, 0.0],
    [353.0, 295.0, -22.0],
    [353.0, 313.0, -26.0],
    [353.0, 326.0, -14.0],
];

fn hand(points: &[[f32; 3]]) -> Hand {
    Hand::try_from(points).expect("fixture is well formed")
}

pub fn paper() -> Hand {
    hand(&PAPER)
}

pub fn rock() -> Hand {
    hand(&ROCK)
}

pub fn scissors() -> Hand {
    hand(&SCISSORS)
}

/// Frame width the fixtures are laid out in.
pub const FRAME_WIDTH: f32 = 640.0;

fn transformed(points: &[[f32; 3]; KEYPOINT_COUNT], f: impl Fn([f32; 3]) -> [f32; 3]) -> Hand {
    hand(&points.map(f))
}

/// The same pose as seen under common capture variations: as is, mirrored
/// left to right (a left hand), at half size, and normalized to the frame
/// width.
pub fn variants(points: &[[f32; 3]; KEYPOINT_COUNT]) -> Vec<(&'static str, Hand)> {
    let mirror = |[x, y, z]: [f32; 3]| [FRAME_WIDTH - x, y, z];
    let normalize = |p: [f32; 3]| p.map(|c| c / FRAME_WIDTH);
    vec![
        ("original", hand(points)),
        ("mirrored", transformed(points, mirror)),
        ("half size", transformed(points, |p| p.map(|c| c * 0.5))),
        ("normalized", transformed(points, normalize)),
        (
            "mirrored normalized",
            transformed(points, |p| normalize(mirror(p))),
        ),
    ]
}
