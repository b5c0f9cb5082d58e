use serde::Deserialize;

/// Cut points on the finger straightness ratio.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CurlConfig {
    #[serde(default = "default_no_curl_ratio")]
    pub no_curl_ratio: f32,
    #[serde(default = "default_half_curl_ratio")]
    pub half_curl_ratio: f32,
    /// Credit for a curl one step away from the expected one.
    #[serde(default = "default_adjacent_factor")]
    pub adjacent_factor: f32,
}

fn default_no_curl_ratio() -> f32 {
    0.85
}

fn default_half_curl_ratio() -> f32 {
    0.5
}

fn default_adjacent_factor() -> f32 {
    0.5
}

impl Default for CurlConfig {
    fn default() -> Self {
        Self {
            no_curl_ratio: default_no_curl_ratio(),
            half_curl_ratio: default_half_curl_ratio(),
            adjacent_factor: default_adjacent_factor(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DirectionConfig {
    /// Angular distance from the expected direction at which credit hits 0.
    #[serde(default = "default_direction_falloff")]
    pub falloff_deg: f32,
}

fn default_direction_falloff() -> f32 {
    90.0
}

impl Default for DirectionConfig {
    fn default() -> Self {
        Self {
            falloff_deg: default_direction_falloff(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AngleConfig {
    /// Full credit within this many degrees of the expected angle.
    #[serde(default = "default_angle_tolerance")]
    pub tolerance_deg: f32,
    /// Width of the linear decay band beyond the tolerance.
    #[serde(default = "default_angle_falloff")]
    pub falloff_deg: f32,
}

fn default_angle_tolerance() -> f32 {
    15.0
}

fn default_angle_falloff() -> f32 {
    30.0
}

impl Default for AngleConfig {
    fn default() -> Self {
        Self {
            tolerance_deg: default_angle_tolerance(),
            falloff_deg: default_angle_falloff(),
        }
    }
}
