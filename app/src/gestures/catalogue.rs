use std::str::FromStr;

use error_stack::{Report, Result, ResultExt};
use serde::{Deserialize, Serialize};

use super::GestureDefinition;
use crate::features::{CurlState, CurlState::*, Direction, Direction::*};
use crate::hand::{Finger, Finger::*};
use crate::GError;

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
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::EnumIs,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gesture {
    Rock,
    Paper,
    Scissors,
}

impl Gesture {
    /// Colour the landmark overlay is drawn in for this gesture.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Rock => "#6D28D9",
            Self::Paper => "#06B6D4",
            Self::Scissors => "#EC4899",
        }
    }

    /// Overlay colour for an optional estimate name; unknown or missing
    /// names draw white.
    pub fn color_for(name: Option<&str>) -> &'static str {
        name.and_then(|n| Self::from_str(n).ok())
            .map_or("#FFFFFF", |g| g.color())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
        }
    }

    pub fn definition(&self) -> GestureDefinition {
        type Curls = &'static [(Finger, CurlState, f32)];
        type Directions = &'static [(Finger, Direction, f32)];
        type Angles = &'static [(Finger, Finger, f32, f32)];

        let (curls, directions, angles): (Curls, Directions, Angles) = match self {
            Self::Rock => (
                &[
                    (Thumb, HalfCurl, 1.0),
                    (Thumb, FullCurl, 1.0),
                    (Index, FullCurl, 1.0),
                    (Middle, FullCurl, 1.0),
                    (Ring, FullCurl, 1.0),
                    (Pinky, FullCurl, 1.0),
                ],
                &[(Thumb, DiagonalUpLeft, 0.5), (Thumb, DiagonalUpRight, 0.5)],
                &[],
            ),
            Self::Paper => (
                &[
                    (Thumb, NoCurl, 1.0),
                    (Index, NoCurl, 1.0),
                    (Middle, NoCurl, 1.0),
                    (Ring, NoCurl, 1.0),
                    (Pinky, NoCurl, 1.0),
                ],
                &[(Middle, VerticalUp, 0.7)],
                &[],
            ),
            Self::Scissors => (
                &[
                    (Index, NoCurl, 1.0),
                    (Middle, NoCurl, 1.0),
                    (Thumb, HalfCurl, 0.5),
                    (Thumb, NoCurl, 0.5),
                    (Ring, FullCurl, 1.0),
                    (Pinky, FullCurl, 1.0),
                ],
                &[(Index, VerticalUp, 0.7), (Middle, VerticalUp, 0.7)],
                &[(Index, Middle, 0.0, 0.9)],
            ),
        };

        GestureDefinition::from_table(self.name(), curls, directions, angles)
    }
}

/// Registered gesture definitions. Registration order is the tie-break
/// order: on equal scores the earlier definition wins.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Catalogue {
    #[serde(rename = "gesture")]
    definitions: Vec<GestureDefinition>,
}

impl Catalogue {
    pub fn new(definitions: Vec<GestureDefinition>) -> Result<Self, GError> {
        let catalogue = Self { definitions };
        catalogue.validate()?;
        Ok(catalogue)
    }

    /// Rock, paper and scissors, in that order.
    pub fn standard() -> Self {
        Self {
            definitions: [Gesture::Rock, Gesture::Paper, Gesture::Scissors]
                .iter()
                .map(Gesture::definition)
                .collect(),
        }
    }

    /// Reads `[[gesture]]` tables, one per definition.
    pub fn from_toml(s: &str) -> Result<Self, GError> {
        let catalogue: Self = toml::from_str(s)
            .change_context(GError::CatalogueError)
            .attach_printable("Couldn't parse the gesture catalogue")?;
        catalogue.validate()?;
        Ok(catalogue)
    }

    fn validate(&self) -> Result<(), GError> {
        if self.definitions.is_empty() {
            return Err(Report::new(GError::CatalogueError).attach_printable("empty catalogue"));
        }
        for (i, def) in self.definitions.iter().enumerate() {
            def.validate()?;
            if self.definitions[..i].iter().any(|d| d.name == def.name) {
                return Err(Report::new(GError::CatalogueError)
                    .attach_printable(format!("duplicate gesture {:?}", def.name)));
            }
        }
        Ok(())
    }

    pub fn definitions(&self) -> &[GestureDefinition] {
        &self.definitions
    }

    pub fn get(&self, name: &str) -> Option<&GestureDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::standard()
    }
}
