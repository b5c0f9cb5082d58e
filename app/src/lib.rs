//! Rock, paper, scissors recognition from hand landmarks.
//!
//! A [`Hand`] is the 21 keypoints an upstream hand-pose estimator yields for
//! one detected hand. [`GestureEstimator`] turns it into per-finger curl and
//! direction features, scores every registered [`GestureDefinition`] against
//! them and reports the best one that clears the confidence threshold.
//! Smoothing across frames is left to the caller; [`GestureHistory`] is a
//! ready-made majority vote for that.

mod error;

pub mod config;
pub mod features;
pub mod gestures;
pub mod hand;
pub mod history;
pub mod math;
pub mod traits;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::Config;
pub use error::GError;
pub use features::{CurlState, Direction, HandFeatures};
pub use gestures::{
    Catalogue, Estimation, Gesture, GestureDefinition, GestureEstimate, GestureEstimator,
};
pub use hand::{Finger, Hand, Keypoint};
pub use history::GestureHistory;
pub use traits::{FingerFeatures, HasGlamPosition};
