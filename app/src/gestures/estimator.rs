use std::str::FromStr;

use error_stack::Result;
use serde::Serialize;

use super::{Catalogue, Gesture};
use crate::config::Config;
use crate::features::{CurlState, Direction, HandFeatures};
use crate::hand::{Finger, Hand};
use crate::GError;

/// Best matching gesture for one frame. `score` is on the ×10 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GestureEstimate {
    pub name: String,
    pub score: f32,
}

impl GestureEstimate {
    /// The application level choice, if the name is one of the standard
    /// gestures.
    pub fn gesture(&self) -> Option<Gesture> {
        Gesture::from_str(&self.name).ok()
    }
}

/// Full outcome of scoring one hand against the whole catalogue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimation {
    /// Every definition's score, in registration order.
    pub scores: Vec<GestureEstimate>,
    /// The definitions that reached the threshold, in registration order.
    pub gestures: Vec<GestureEstimate>,
    pub pose_data: Vec<(Finger, CurlState, Direction)>,
}

impl Estimation {
    /// Highest scoring gesture at or above the threshold. Equal scores go to
    /// the earliest registered definition.
    pub fn best(&self) -> Option<&GestureEstimate> {
        let mut best: Option<&GestureEstimate> = None;
        for candidate in &self.gestures {
            if best.map_or(true, |b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }
        best
    }
}

/// Scores hands against an immutable catalogue with fixed tunables.
///
/// Holds no per-call state, so one instance can be shared by every caller
/// for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct GestureEstimator {
    config: Config,
    catalogue: Catalogue,
}

impl GestureEstimator {
    pub fn new(config: Config, catalogue: Catalogue) -> Result<Self, GError> {
        config.validate()?;
        Ok(Self { config, catalogue })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn features(&self, hand: &Hand) -> HandFeatures {
        HandFeatures::extract(hand, &self.config.curl)
    }

    /// Scores the features against every definition.
    pub fn estimate(&self, features: &HandFeatures) -> Estimation {
        let scores: Vec<GestureEstimate> = self
            .catalogue
            .definitions()
            .iter()
            .map(|def| {
                let score = def.score(features, &self.config);
                log::debug!("{} scored {score:.3}", def.name);
                GestureEstimate {
                    name: def.name.clone(),
                    score,
                }
            })
            .collect();

        let gestures = scores
            .iter()
            .filter(|e| e.score >= self.config.threshold)
            .cloned()
            .collect();

        Estimation {
            scores,
            gestures,
            pose_data: features.pose_data(),
        }
    }

    pub fn estimate_hand(&self, hand: &Hand) -> Estimation {
        self.estimate(&self.features(hand))
    }

    /// Best gesture for one hand, or `None` when nothing reaches the
    /// threshold.
    pub fn classify(&self, hand: &Hand) -> Option<GestureEstimate> {
        self.estimate_hand(hand).best().cloned()
    }

    /// Classifies raw `[x, y, z]` landmarks, failing with
    /// [`GError::MalformedInput`] if they do not form a hand.
    pub fn classify_raw<P: AsRef<[f32]>>(
        &self,
        points: &[P],
    ) -> Result<Option<GestureEstimate>, GError> {
        let hand = Hand::from_raw(points)?;
        Ok(self.classify(&hand))
    }

    /// Classifies the first detected hand. No hands is no gesture.
    pub fn classify_hands(&self, hands: &[Hand]) -> Option<GestureEstimate> {
        hands.first().and_then(|hand| self.classify(hand))
    }
}
