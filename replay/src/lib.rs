use std::io::BufRead;
use std::thread::{self, JoinHandle};

use error_stack::{Report, Result, ResultExt};
use flume::{bounded, Receiver};
use handsign::{GError, GestureEstimate, GestureEstimator, GestureHistory, Hand};
use serde::{Deserialize, Serialize};

/// One recorded frame: every hand the estimator found, as raw `[x, y, z]`
/// landmark arrays.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Frame {
    pub timestamp_ms: u64,
    #[serde(default)]
    pub hands: Vec<Vec<Vec<f32>>>,
}

impl Frame {
    pub fn parse(line: &str) -> Result<Self, GError> {
        serde_json::from_str(line)
            .change_context(GError::MalformedInput)
            .attach_printable("Couldn't parse recorded frame")
    }

    pub fn hands(&self) -> Result<Vec<Hand>, GError> {
        self.hands
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                Hand::from_raw(raw).attach_printable_lazy(|| {
                    format!("hand {i} of frame at {} ms", self.timestamp_ms)
                })
            })
            .collect()
    }
}

/// Reads frames on a background thread, one JSON object per line.
pub struct FrameSource {
    receiver: Receiver<Result<Frame, GError>>,
    handle: JoinHandle<()>,
}

impl FrameSource {
    pub fn spawn<R: BufRead + Send + 'static>(reader: R, capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));

        let handle = thread::spawn(move || {
            for line in reader.lines() {
                let frame = match line {
                    Ok(line) if line.trim().is_empty() => continue,
                    Ok(line) => Frame::parse(&line),
                    Err(e) => Err(Report::new(e).change_context(GError::ReplayError)),
                };
                if sender.send(frame).is_err() {
                    // consumer went away
                    return;
                }
            }
        });

        Self { receiver, handle }
    }

    /// Next frame, or `None` once the input is exhausted.
    pub fn recv(&self) -> Option<Result<Frame, GError>> {
        self.receiver.recv().ok()
    }

    pub fn join(self) -> Result<(), GError> {
        drop(self.receiver);
        let handle = self.handle;
        handle.join().map_err(|_| {
            Report::new(GError::ReplayError).attach_printable("Reader thread panicked")
        })
    }
}

impl Iterator for FrameSource {
    type Item = Result<Frame, GError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.recv()
    }
}

/// Lets a frame through only if at least `interval_ms` passed since the
/// last one let through.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    interval_ms: u64,
    last: Option<u64>,
}

impl RateLimiter {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last: None,
        }
    }

    pub fn admit(&mut self, timestamp_ms: u64) -> bool {
        match self.last {
            Some(last) if timestamp_ms.saturating_sub(last) < self.interval_ms => false,
            _ => {
                self.last = Some(timestamp_ms);
                true
            }
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub timestamp_ms: u64,
    pub estimate: Option<GestureEstimate>,
    pub confirmed: Option<String>,
    /// The confirmed gesture differs from the previous frame's.
    #[serde(skip)]
    pub changed: bool,
}

/// The frame loop: rate limit, classify the first hand, debounce.
pub struct Replay {
    estimator: GestureEstimator,
    history: GestureHistory,
    limiter: RateLimiter,
    confirmed: Option<String>,
}

impl Replay {
    pub fn new(estimator: GestureEstimator, interval_ms: u64) -> Result<Self, GError> {
        let history = GestureHistory::from_config(&estimator.config().history)?;
        Ok(Self {
            estimator,
            history,
            limiter: RateLimiter::new(interval_ms),
            confirmed: None,
        })
    }

    /// `Ok(None)` when the frame was dropped by the rate limiter. Malformed
    /// frames fail before they reach the limiter and leave it untouched.
    pub fn step(&mut self, frame: &Frame) -> Result<Option<FrameOutcome>, GError> {
        let hands = frame.hands()?;
        if !self.limiter.admit(frame.timestamp_ms) {
            return Ok(None);
        }

        let estimate = self.estimator.classify_hands(&hands);
        let confirmed = self
            .history
            .push(estimate.as_ref().map(|e| e.name.as_str()))
            .map(str::to_owned);

        let changed = confirmed != self.confirmed;
        self.confirmed.clone_from(&confirmed);

        Ok(Some(FrameOutcome {
            timestamp_ms: frame.timestamp_ms,
            estimate,
            confirmed,
            changed,
        }))
    }

    pub fn confirmed(&self) -> Option<&str> {
        self.confirmed.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const FIST: [[f32; 3]; 21] = [
        [300.0, 400.0, 0.0],
        [275.0, 385.0, 0.0],
        [255.0, 355.0, -15.0],
        [265.0, 332.0, -30.0],
        [312.0, 322.0, -38.0],
        [270.0, 300.0, 0.0],
        [268.0, 280.0, -30.0],
        [268.0, 305.0, -35.0],
        [269.0, 322.0, -20.0],
        [300.0, 296.0, 0.0],
        [300.0, 276.0, -32.0],
        [300.0, 302.0, -38.0],
        [300.0, 320.0, -22.0],
        [328.0, 300.0, 0.0],
        [329.0, 282.0, -28.0],
        [329.0, 305.0, -33.0],
        [329.0, 321.0, -18.0],
        [352.0, 310.0, 0.0],
        [353.0, 295.0, -22.0],
        [353.0, 313.0, -26.0],
        [353.0, 326.0, -14.0],
    ];

    fn line(timestamp_ms: u64, hands: &[&[[f32; 3]]]) -> String {
        serde_json::json!({ "timestamp_ms": timestamp_ms, "hands": hands }).to_string()
    }

    fn frame(timestamp_ms: u64, hands: &[&[[f32; 3]]]) -> Frame {
        Frame::parse(&line(timestamp_ms, hands)).unwrap()
    }

    #[test]
    fn test_rate_limiter() {
        let mut limiter = RateLimiter::new(200);
        assert!(limiter.admit(0));
        assert!(!limiter.admit(100));
        assert!(limiter.admit(200));
        assert!(!limiter.admit(399));
        assert!(limiter.admit(450));
    }

    #[test]
    fn parse_frame() {
        let frame = frame(40, &[&FIST]);
        assert_eq!(frame.timestamp_ms, 40);
        assert_eq!(frame.hands().unwrap().len(), 1);

        let empty = Frame::parse(r#"{"timestamp_ms": 7}"#).unwrap();
        assert!(empty.hands.is_empty());
    }

    #[test]
    fn bad_json_is_malformed() {
        let err = Frame::parse("{not json").unwrap_err();
        assert_eq!(*err.current_context(), GError::MalformedInput);
    }

    #[test]
    fn short_hand_is_malformed() {
        let frame = frame(0, &[&FIST[..20]]);
        let err = frame.hands().unwrap_err();
        assert_eq!(*err.current_context(), GError::MalformedInput);
    }

    #[test]
    fn replay_confirms_rock() {
        let mut replay = Replay::new(GestureEstimator::default(), 200).unwrap();
        let mut outcomes = vec![];
        for i in 0..10 {
            if let Some(outcome) = replay.step(&frame(i * 100, &[&FIST])).unwrap() {
                outcomes.push(outcome);
            }
        }

        // every other frame is inside the interval
        assert_eq!(outcomes.len(), 5);
        for outcome in &outcomes {
            assert_eq!(outcome.estimate.as_ref().unwrap().name, "rock");
        }
        assert_eq!(outcomes[1].confirmed, None);
        assert_eq!(outcomes[2].confirmed.as_deref(), Some("rock"));
        assert!(outcomes[2].changed);
        assert!(!outcomes[3].changed);
        assert_eq!(replay.confirmed(), Some("rock"));
    }

    #[test]
    fn malformed_frame_keeps_interval_open() {
        let mut replay = Replay::new(GestureEstimator::default(), 200).unwrap();
        let err = replay.step(&frame(0, &[&FIST[..20]])).unwrap_err();
        assert_eq!(*err.current_context(), GError::MalformedInput);

        let outcome = replay.step(&frame(100, &[&FIST])).unwrap().unwrap();
        assert_eq!(outcome.timestamp_ms, 100);
        assert_eq!(outcome.estimate.unwrap().name, "rock");
        assert!(replay.step(&frame(200, &[&FIST])).unwrap().is_none());
    }

    #[test]
    fn empty_frames_are_no_gesture() {
        let mut replay = Replay::new(GestureEstimator::default(), 0).unwrap();
        let outcome = replay.step(&frame(0, &[])).unwrap().unwrap();
        assert_eq!(outcome.estimate, None);
        assert_eq!(outcome.confirmed, None);
        assert!(!outcome.changed);
    }

    #[test]
    fn source_reads_lines() {
        let (fist, empty) = (line(0, &[&FIST]), line(33, &[]));
        let input = format!("{fist}\n\n{{broken\n{empty}\n");
        let source = FrameSource::spawn(Cursor::new(input), 2);
        let frames: Vec<_> = source.collect();

        assert_eq!(frames.len(), 3);
        assert!(frames[0].is_ok());
        assert_eq!(
            *frames[1].as_ref().unwrap_err().current_context(),
            GError::MalformedInput
        );
        assert_eq!(frames[2].as_ref().unwrap().timestamp_ms, 33);
    }
}
