use std::fmt;

use error_stack::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GError {
    MalformedInput,
    ConfigError,
    CatalogueError,
    ReplayError,
}

impl fmt::Display for GError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput => write!(f, "Malformed hand landmarks"),
            Self::ConfigError => write!(f, "Error in loading config"),
            Self::CatalogueError => write!(f, "Invalid gesture definition"),
            Self::ReplayError => write!(f, "Error while replaying recorded frames"),
        }
    }
}

impl Context for GError {}
