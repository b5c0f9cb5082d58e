use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use error_stack::ResultExt;
use handsign::{Catalogue, Config, GError, GestureEstimator};
use log::{debug, info, warn};
use replay::{FrameSource, Replay};

// Matches the capture loop's 200 ms detection interval.
const INTERVAL_MS: u64 = 200;
const CHANNEL_CAPACITY: usize = 64;

/// Replays recorded hand landmarks through the rock, paper, scissors classifier
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON lines recording, `-` for stdin
    recording: PathBuf,
    /// TOML file with classifier tunables
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// TOML file with extra gesture definitions replacing the standard ones
    #[arg(long)]
    catalogue: Option<PathBuf>,
    #[arg(short, long)]
    threshold: Option<f32>,
    #[arg(long, default_value_t = INTERVAL_MS)]
    interval_ms: u64,
    #[arg(long)]
    window: Option<usize>,
    #[arg(long)]
    agreement: Option<usize>,
    /// Print every classified frame as JSON on stdout
    #[arg(long, default_value_t = false)]
    emit: bool,
}

fn main() -> error_stack::Result<(), GError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Args {
        recording,
        config,
        catalogue,
        threshold,
        interval_ms,
        window,
        agreement,
        emit,
    } = Args::parse();

    let mut config = match config {
        Some(path) => Config::open(path)?,
        None => Config::default(),
    };
    if let Some(threshold) = threshold {
        config.threshold = threshold;
    }
    if let Some(window) = window {
        config.history.window = window;
    }
    if let Some(agreement) = agreement {
        config.history.agreement = agreement;
    }

    let catalogue = match catalogue {
        Some(path) => Catalogue::from_toml(
            &std::fs::read_to_string(&path)
                .change_context(GError::ConfigError)
                .attach_printable_lazy(|| format!("Couldn't read {}", path.display()))?,
        )?,
        None => Catalogue::standard(),
    };

    let estimator = GestureEstimator::new(config, catalogue)?;
    info!(
        "classifying with {} gestures, threshold {}",
        estimator.catalogue().len(),
        estimator.config().threshold
    );
    let mut replay = Replay::new(estimator, interval_ms)?;

    let reader: Box<dyn BufRead + Send> = if recording.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(
            File::open(&recording)
                .change_context(GError::ReplayError)
                .attach_printable_lazy(|| format!("Couldn't open {}", recording.display()))?,
        ))
    };

    let source = FrameSource::spawn(reader, CHANNEL_CAPACITY);
    let (mut classified, mut skipped) = (0usize, 0usize);

    while let Some(frame) = source.recv() {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) if *e.current_context() == GError::MalformedInput => {
                warn!("skipping frame: {e:?}");
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        let outcome = match replay.step(&frame) {
            Ok(Some(outcome)) => outcome,
            Ok(None) => continue,
            Err(e) => {
                warn!("skipping frame at {} ms: {e:?}", frame.timestamp_ms);
                skipped += 1;
                continue;
            }
        };
        classified += 1;

        if let Some(estimate) = &outcome.estimate {
            debug!(
                "{} ms: {} ({:.2})",
                outcome.timestamp_ms, estimate.name, estimate.score
            );
        }
        if outcome.changed {
            match &outcome.confirmed {
                Some(name) => info!("gesture {name} at {} ms", outcome.timestamp_ms),
                None => info!("gesture released at {} ms", outcome.timestamp_ms),
            }
        }
        if emit {
            let line = serde_json::to_string(&outcome).change_context(GError::ReplayError)?;
            println!("{line}");
        }
    }

    source.join()?;
    info!("classified {classified} frames, skipped {skipped}");

    Ok(())
}
