//! Visual Tracking Pipeline - Main Entry Point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use frame_capture::{SourceConfig, SyntheticSource};
use steering::LogSink;
use tracker::{init_logging, NullDisplay, Pipeline, StubDetector, TrackerConfig};

fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Face Follow v{} ===", env!("CARGO_PKG_VERSION"));

    let config = match std::env::args().nth(1) {
        Some(path) => {
            TrackerConfig::load(&PathBuf::from(&path))
                .with_context(|| format!("loading configuration from {path}"))?
        }
        None => TrackerConfig::default(),
    };

    // Demo wiring: synthetic frames, stub detections, log-only actuator.
    // Deployments implement FrameSource / Detector / CommandSink /
    // DisplaySink over their capture, model, and transport stacks.
    let source = SyntheticSource::from_config(&SourceConfig::default(), 300);
    let detector = StubDetector::new();
    let display = NullDisplay::new();
    let sink = Arc::new(LogSink::default());

    let mut pipeline =
        Pipeline::new(&config, source, detector, display, sink).context("starting pipeline")?;
    let report = pipeline.run().context("running pipeline")?;

    info!(?report, "pipeline stopped");
    Ok(())
}
