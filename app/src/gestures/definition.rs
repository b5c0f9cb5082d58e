use std::collections::BTreeMap;

use error_stack::{Report, Result};
use serde::Deserialize;

use crate::config::{AngleConfig, Config, CurlConfig, DirectionConfig, SCORE_SCALE};
use crate::features::{CurlState, Direction};
use crate::hand::Finger;
use crate::math;
use crate::traits::FingerFeatures;
use crate::GError;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CurlConstraint {
    pub finger: Finger,
    pub curl: CurlState,
    pub weight: f32,
}

impl CurlConstraint {
    pub fn contribution(&self, actual: CurlState, config: &CurlConfig) -> f32 {
        let factor = match actual.steps_from(self.curl) {
            0 => 1.0,
            1 => config.adjacent_factor,
            _ => 0.0,
        };
        self.weight * factor
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DirectionConstraint {
    pub finger: Finger,
    pub direction: Direction,
    pub weight: f32,
}

impl DirectionConstraint {
    /// Full weight anywhere inside the expected direction's sector, then a
    /// linear decay to nothing at `falloff_deg` from its nominal angle.
    pub fn contribution(&self, actual_angle: f32, config: &DirectionConfig) -> f32 {
        let delta = math::angular_distance(actual_angle, self.direction.nominal_angle());
        self.weight * math::linear_falloff(delta, Direction::SECTOR_DEG / 2.0, config.falloff_deg)
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AngleConstraint {
    pub fingers: (Finger, Finger),
    pub degrees: f32,
    pub weight: f32,
}

impl AngleConstraint {
    pub fn contribution(&self, actual_deg: f32, config: &AngleConfig) -> f32 {
        let delta = (actual_deg - self.degrees).abs();
        self.weight
            * math::linear_falloff(
                delta,
                config.tolerance_deg,
                config.tolerance_deg + config.falloff_deg,
            )
    }
}

/// Group key: constraints sharing a key are alternatives and only the best
/// matching one counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Slot {
    Curl(Finger),
    Direction(Finger),
    Angle(Finger, Finger),
}

/// A named hand shape described as weighted curl, direction and
/// inter-finger angle constraints.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GestureDefinition {
    pub name: String,
    #[serde(default)]
    pub curls: Vec<CurlConstraint>,
    #[serde(default)]
    pub directions: Vec<DirectionConstraint>,
    #[serde(default)]
    pub angles: Vec<AngleConstraint>,
}

impl GestureDefinition {
    pub fn new(
        name: impl Into<String>,
        curls: &[(Finger, CurlState, f32)],
        directions: &[(Finger, Direction, f32)],
        angles: &[(Finger, Finger, f32, f32)],
    ) -> Result<Self, GError> {
        let definition = Self::from_table(name, curls, directions, angles);
        definition.validate()?;
        Ok(definition)
    }

    /// Builds a definition from constraint rows without validating it.
    pub(crate) fn from_table(
        name: impl Into<String>,
        curls: &[(Finger, CurlState, f32)],
        directions: &[(Finger, Direction, f32)],
        angles: &[(Finger, Finger, f32, f32)],
    ) -> Self {
        Self {
            name: name.into(),
            curls: curls
                .iter()
                .map(|&(finger, curl, weight)| CurlConstraint { finger, curl, weight })
                .collect(),
            directions: directions
                .iter()
                .map(|&(finger, direction, weight)| DirectionConstraint {
                    finger,
                    direction,
                    weight,
                })
                .collect(),
            angles: angles
                .iter()
                .map(|&(a, b, degrees, weight)| AngleConstraint {
                    fingers: (a, b),
                    degrees,
                    weight,
                })
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<(), GError> {
        let invalid = |msg: String| {
            Err(Report::new(GError::CatalogueError)
                .attach_printable(format!("gesture {:?}: {msg}", self.name)))
        };

        if self.name.is_empty() {
            return invalid("empty name".into());
        }
        if self.constraint_count() == 0 {
            return invalid("no constraints".into());
        }

        let weights = self
            .curls
            .iter()
            .map(|c| c.weight)
            .chain(self.directions.iter().map(|c| c.weight))
            .chain(self.angles.iter().map(|c| c.weight));
        for weight in weights {
            if !(0.0..=1.0).contains(&weight) {
                return invalid(format!("weight {weight} outside 0..=1"));
            }
        }

        for angle in &self.angles {
            if !(0.0..=180.0).contains(&angle.degrees) {
                return invalid(format!("angle {} outside 0..=180", angle.degrees));
            }
            if angle.fingers.0 == angle.fingers.1 {
                return invalid(format!("angle between {} and itself", angle.fingers.0));
            }
        }

        Ok(())
    }

    pub fn constraint_count(&self) -> usize {
        self.curls.len() + self.directions.len() + self.angles.len()
    }

    /// Score against one hand's features on the ×10 scale.
    ///
    /// Every slot (finger curl, finger direction, finger pair angle)
    /// contributes its best matching alternative; the score is the mean
    /// over slots times [`SCORE_SCALE`], so a perfect match on unit weights
    /// scores 10 regardless of how many slots a definition has.
    pub fn score<F: FingerFeatures>(&self, features: &F, config: &Config) -> f32 {
        let mut slots: BTreeMap<Slot, f32> = BTreeMap::new();
        let mut offer = |slot: Slot, value: f32| {
            let best = slots.entry(slot).or_insert(0.0);
            *best = best.max(value);
        };

        for c in &self.curls {
            offer(
                Slot::Curl(c.finger),
                c.contribution(features.curl(c.finger), &config.curl),
            );
        }
        for c in &self.directions {
            offer(
                Slot::Direction(c.finger),
                c.contribution(features.direction_angle(c.finger), &config.direction),
            );
        }
        for c in &self.angles {
            let (a, b) = c.fingers;
            offer(
                Slot::Angle(a.min(b), a.max(b)),
                c.contribution(features.angle_between(a, b), &config.angle),
            );
        }

        if slots.is_empty() {
            return 0.0;
        }
        let total: f32 = slots.values().sum();
        SCORE_SCALE * total / slots.len() as f32
    }
}
