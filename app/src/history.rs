use std::collections::VecDeque;

use error_stack::{Report, Result};

use crate::config::HistoryConfig;
use crate::GError;

/// Majority vote over the last few per-frame outcomes.
///
/// A gesture is confirmed once at least `agreement` of the last `window`
/// frames named it. Frames with no gesture take up space in the window but
/// never confirm anything.
#[derive(Debug, Clone)]
pub struct GestureHistory {
    window: usize,
    agreement: usize,
    frames: VecDeque<Option<String>>,
}

impl GestureHistory {
    pub fn new(window: usize, agreement: usize) -> Result<Self, GError> {
        if window == 0 || agreement == 0 || agreement > window {
            return Err(Report::new(GError::ConfigError).attach_printable(format!(
                "history needs 1 <= agreement ({agreement}) <= window ({window})"
            )));
        }
        Ok(Self {
            window,
            agreement,
            frames: VecDeque::with_capacity(window),
        })
    }

    pub fn from_config(config: &HistoryConfig) -> Result<Self, GError> {
        Self::new(config.window, config.agreement)
    }

    /// Records one frame's outcome and returns the gesture confirmed by the
    /// updated window, if any.
    pub fn push(&mut self, outcome: Option<&str>) -> Option<&str> {
        if self.frames.len() == self.window {
            self.frames.pop_front();
        }
        self.frames.push_back(outcome.map(str::to_owned));
        self.confirmed()
    }

    /// Most frequent gesture in the window if it reaches the agreement
    /// count. Equal counts go to the most recently seen gesture.
    pub fn confirmed(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        let mut seen: Vec<&str> = Vec::with_capacity(self.frames.len());

        for name in self.frames.iter().rev().flatten() {
            if seen.contains(&name.as_str()) {
                continue;
            }
            seen.push(name);

            let count = self
                .frames
                .iter()
                .filter(|f| f.as_deref() == Some(name.as_str()))
                .count();
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((name.as_str(), count));
            }
        }

        best.filter(|&(_, count)| count >= self.agreement)
            .map(|(name, _)| name)
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn window(&self) -> usize {
        self.window
    }
}
