mod catalogue;
mod definition;
mod estimator;

pub use catalogue::{Catalogue, Gesture};
pub use definition::{AngleConstraint, CurlConstraint, DirectionConstraint, GestureDefinition};
pub use estimator::{Estimation, GestureEstimate, GestureEstimator};
