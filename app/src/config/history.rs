use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Number of recent frames kept.
    #[serde(default = "default_window")]
    pub window: usize,
    /// Frames within the window that must agree before a gesture counts.
    #[serde(default = "default_agreement")]
    pub agreement: usize,
}

fn default_window() -> usize {
    5
}

fn default_agreement() -> usize {
    3
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            agreement: default_agreement(),
        }
    }
}
