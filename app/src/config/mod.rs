use std::{fs, path::PathBuf};

use error_stack::{Report, ResultExt};
use serde::Deserialize;

mod history;
mod scoring;

pub use history::HistoryConfig;
pub use scoring::{AngleConfig, CurlConfig, DirectionConfig};

use crate::GError;

/// Minimum score, on the ×10 scale, a gesture needs to be reported.
pub const DEFAULT_THRESHOLD: f32 = 7.5;

/// Scale every definition's mean constraint match is multiplied by.
pub const SCORE_SCALE: f32 = 10.0;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default)]
    pub curl: CurlConfig,
    #[serde(default)]
    pub direction: DirectionConfig,
    #[serde(default)]
    pub angle: AngleConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            curl: CurlConfig::default(),
            direction: DirectionConfig::default(),
            angle: AngleConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl Config {
    pub fn open(path: PathBuf) -> error_stack::Result<Self, GError> {
        Self::from_toml(
            &fs::read_to_string(&path)
                .change_context(GError::ConfigError)
                .attach_printable_lazy(|| format!("Couldn't read {}", path.display()))?,
        )
    }

    pub fn from_toml(s: &str) -> error_stack::Result<Self, GError> {
        let config: Self = toml::from_str(s)
            .change_context(GError::ConfigError)
            .attach_printable("Couldn't parse the config file")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> error_stack::Result<(), GError> {
        let invalid = |msg: String| Err(Report::new(GError::ConfigError).attach_printable(msg));

        if !(self.threshold.is_finite() && (0.0..=SCORE_SCALE).contains(&self.threshold)) {
            return invalid(format!(
                "threshold {} outside 0..={SCORE_SCALE}",
                self.threshold
            ));
        }
        let curl = &self.curl;
        if !(0.0 < curl.half_curl_ratio
            && curl.half_curl_ratio < curl.no_curl_ratio
            && curl.no_curl_ratio < 1.0)
        {
            return invalid(format!(
                "curl ratios must satisfy 0 < half ({}) < no ({}) < 1",
                curl.half_curl_ratio, curl.no_curl_ratio
            ));
        }
        if !(0.0..=1.0).contains(&curl.adjacent_factor) {
            return invalid(format!(
                "adjacent curl factor {} outside 0..=1",
                curl.adjacent_factor
            ));
        }
        let falloff = self.direction.falloff_deg;
        if !(falloff > 0.0 && falloff <= 180.0) {
            return invalid(format!("direction falloff {falloff} outside (0, 180]"));
        }
        let angle = &self.angle;
        let usable = |deg: f32| deg.is_finite() && deg >= 0.0;
        if !(usable(angle.tolerance_deg) && usable(angle.falloff_deg)) {
            return invalid(format!(
                "angle tolerance ({}) and falloff ({}) must be finite and not negative",
                angle.tolerance_deg, angle.falloff_deg
            ));
        }
        if self.history.window == 0 || self.history.agreement == 0 {
            return invalid("history window and agreement must be at least 1".into());
        }
        if self.history.agreement > self.history.window {
            return invalid(format!(
                "history agreement {} exceeds window {}",
                self.history.agreement, self.history.window
            ));
        }

        Ok(())
    }
}

impl TryFrom<PathBuf> for Config {
    type Error = Report<GError>;

    fn try_from(value: PathBuf) -> Result<Self, Self::Error> {
        Self::open(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let config_toml = r#"
        threshold = 8.5

        [curl]
        no_curl_ratio = 0.9
        half_curl_ratio = 0.55

        [angle]
        tolerance_deg = 10

        [history]
        window = 7
        agreement = 4"#;

        let config = Config::from_toml(config_toml).unwrap();

        assert_eq!(config.threshold, 8.5);
        assert_eq!(config.curl.no_curl_ratio, 0.9);
        assert_eq!(config.curl.half_curl_ratio, 0.55);
        assert_eq!(config.curl.adjacent_factor, 0.5);
        assert_eq!(config.angle.tolerance_deg, 10.0);
        assert_eq!(config.angle.falloff_deg, 30.0);
        assert_eq!(config.direction, DirectionConfig::default());
        assert_eq!(config.history.window, 7);
        assert_eq!(config.history.agreement, 4);
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_crossed_curl_ratios() {
        let err = Config::from_toml("[curl]\nno_curl_ratio = 0.4").unwrap_err();
        assert_eq!(*err.current_context(), GError::ConfigError);
    }

    #[test]
    fn rejects_nan_tunables() {
        for toml in [
            "[direction]\nfalloff_deg = nan",
            "[angle]\ntolerance_deg = nan",
            "[angle]\nfalloff_deg = nan",
            "[angle]\nfalloff_deg = inf",
            "[curl]\nadjacent_factor = nan",
            "threshold = nan",
        ] {
            let err = Config::from_toml(toml).unwrap_err();
            assert_eq!(*err.current_context(), GError::ConfigError, "{toml}");
        }

        let config = Config {
            angle: AngleConfig {
                tolerance_deg: f32::NAN,
                ..AngleConfig::default()
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_agreement_above_window() {
        let err = Config::from_toml("[history]\nwindow = 2\nagreement = 3").unwrap_err();
        assert_eq!(*err.current_context(), GError::ConfigError);
    }

    #[test]
    fn rejects_bad_toml() {
        let err = Config::from_toml("threshold = \"high\"").unwrap_err();
        assert_eq!(*err.current_context(), GError::ConfigError);
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = Config::open("/nonexistent/handsign.toml".into()).unwrap_err();
        assert_eq!(*err.current_context(), GError::ConfigError);
    }
}
