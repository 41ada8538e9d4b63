//! Per-frame pipeline orchestration
//!
//! Two-state machine (Running/Stopped) driving the tracking loop: acquire
//! a frame, detect, annotate and command per detection, render frame-level
//! diagnostics, present, poll quit. Each frame is owned by exactly one
//! iteration; nothing is carried across frames.

use std::sync::Arc;

use tracing::{debug, info, warn};

use frame_capture::{CaptureError, FrameSource, Region, VideoFrame};
use overlay::{palette, AnnotationStyle, PanelContent};
use steering::link::DEFAULT_QUEUE_DEPTH;
use steering::{ActuatorCommand, CenteringController, CommandLink, CommandSink, ControlZone};

use crate::config::{DetectorParams, TrackerConfig};
use crate::detector::Detector;
use crate::display::DisplaySink;
use crate::TrackerError;

/// Top-left origin of the battery status line.
const STATUS_ORIGIN: (i32, i32) = (6, 16);

/// Pipeline lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Running,
    Stopped,
}

/// Why the loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The display sink observed the quit signal.
    QuitRequested,
    /// The frame source reported permanent exhaustion.
    SourceExhausted,
    /// The frame source failed unrecoverably.
    SourceFailed(String),
}

/// Counters for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub frames_presented: u64,
    /// Iterations where no frame was available (transient, non-fatal).
    pub frames_skipped: u64,
    /// Valid detections processed across all frames.
    pub detections: u64,
    pub commands_dispatched: u64,
    pub commands_dropped: u64,
    pub stop: StopReason,
}

/// Everything one iteration produced, replacing the ambient globals the
/// loop would otherwise share across subsystems.
#[derive(Debug)]
pub struct FrameContext {
    pub sequence: u32,
    pub frame: VideoFrame,
    /// Detections that survived clipping, in detector order.
    pub detections: Vec<Region>,
    /// One command per surviving detection.
    pub commands: Vec<ActuatorCommand>,
    /// Commands the link refused (queue full); non-fatal.
    pub dropped_commands: u64,
}

impl FrameContext {
    fn new(frame: VideoFrame) -> Self {
        Self {
            sequence: frame.sequence,
            frame,
            detections: Vec::new(),
            commands: Vec::new(),
            dropped_commands: 0,
        }
    }
}

/// The tracking loop over its four external collaborators.
pub struct Pipeline<S: FrameSource, D: Detector, V: DisplaySink> {
    source: S,
    detector: D,
    display: V,
    link: Option<CommandLink>,
    controller: CenteringController,
    params: DetectorParams,
    style: AnnotationStyle,
    label: String,
    low_battery_threshold: u8,
    guide_half_extent: i32,
    state: PipelineState,
}

impl<S: FrameSource, D: Detector, V: DisplaySink> Pipeline<S, D, V> {
    /// Validate configuration and assemble the loop.
    ///
    /// Fails (and never enters Running) when the configured detector model
    /// resource is missing or the control zones are malformed.
    pub fn new(
        config: &TrackerConfig,
        source: S,
        detector: D,
        display: V,
        sink: Arc<dyn CommandSink>,
    ) -> Result<Self, TrackerError> {
        config.validate()?;

        let (width, height) = source.dimensions();
        let horizontal = match config.zones.horizontal {
            Some(zone) => zone,
            None => ControlZone::centered(width, config.zones.dead_half_width)
                .map_err(|e| TrackerError::Config(e.to_string()))?,
        };
        let vertical = match config.zones.vertical {
            Some(zone) => zone,
            None => ControlZone::centered(height, config.zones.dead_half_width)
                .map_err(|e| TrackerError::Config(e.to_string()))?,
        };
        let controller = CenteringController::new(horizontal, vertical, config.zones.gain);

        info!(width, height, "pipeline configured");

        Ok(Self {
            source,
            detector,
            display,
            link: Some(CommandLink::spawn(sink, DEFAULT_QUEUE_DEPTH)),
            controller,
            params: config.detector.clone(),
            style: config.style.clone(),
            label: config.label.clone(),
            low_battery_threshold: config.low_battery_threshold,
            guide_half_extent: config.guide_half_extent,
            state: PipelineState::Running,
        })
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Drive the loop until quit or source exhaustion.
    ///
    /// The source, display, and command link are released on every exit
    /// path, including a display failure.
    pub fn run(&mut self) -> Result<PipelineReport, TrackerError> {
        let result = self.run_loop();
        self.source.close();
        self.display.close();
        if let Some(link) = self.link.take() {
            link.shutdown();
        }
        self.state = PipelineState::Stopped;
        result
    }

    fn run_loop(&mut self) -> Result<PipelineReport, TrackerError> {
        info!("pipeline running");
        let mut presented = 0u64;
        let mut skipped = 0u64;
        let mut detections = 0u64;
        let mut dispatched = 0u64;
        let mut dropped = 0u64;

        let stop = loop {
            match self.source.next_frame() {
                Ok(Some(frame)) => {
                    let ctx = self.process_frame(frame)?;
                    debug!(
                        sequence = ctx.sequence,
                        detections = ctx.detections.len(),
                        "frame processed"
                    );
                    presented += 1;
                    detections += ctx.detections.len() as u64;
                    dispatched += ctx.commands.len() as u64 - ctx.dropped_commands;
                    dropped += ctx.dropped_commands;
                }
                Ok(None) => {
                    // Transient: no frame this tick
                    debug!("no frame available");
                    skipped += 1;
                }
                Err(CaptureError::Exhausted) => {
                    info!("frame source exhausted");
                    break StopReason::SourceExhausted;
                }
                Err(e) => {
                    warn!("frame source failed: {e}");
                    break StopReason::SourceFailed(e.to_string());
                }
            }

            if self.display.poll_quit() {
                info!("quit signal observed");
                break StopReason::QuitRequested;
            }
        };

        Ok(PipelineReport {
            frames_presented: presented,
            frames_skipped: skipped,
            detections,
            commands_dispatched: dispatched,
            commands_dropped: dropped,
            stop,
        })
    }

    /// One full iteration over an acquired frame.
    fn process_frame(&mut self, frame: VideoFrame) -> Result<FrameContext, TrackerError> {
        let mut ctx = FrameContext::new(frame);
        let (width, height) = (ctx.frame.width, ctx.frame.height);
        let frame_center = ctx.frame.center();

        // Zero detections is a normal outcome; a failing detector costs
        // this frame's detections, not the loop
        let raw = match self.detector.detect(&ctx.frame, &self.params) {
            Ok(regions) => regions,
            Err(e) => {
                warn!("detector failed: {e}");
                Vec::new()
            }
        };

        for region in raw {
            let Some(clipped) = region.clip_to(width, height) else {
                debug!(?region, "dropping malformed detection");
                continue;
            };

            self.annotate(&mut ctx.frame, &clipped, frame_center);

            let command = self.controller.command_for(clipped.center());
            let accepted = match &self.link {
                Some(link) => link.try_dispatch(command),
                None => false,
            };
            if !accepted {
                ctx.dropped_commands += 1;
            }
            ctx.detections.push(clipped);
            ctx.commands.push(command);
        }

        self.draw_diagnostics(&mut ctx.frame);
        self.display.present(&ctx.frame)?;
        Ok(ctx)
    }

    fn annotate(&self, frame: &mut VideoFrame, region: &Region, frame_center: (i32, i32)) {
        overlay::draw_corner_frame(
            frame,
            region,
            self.style.primary(),
            self.style.corner_size,
            self.style.stroke_width,
        );
        overlay::draw_center_marker(
            frame,
            region,
            self.style.secondary(),
            self.style.marker,
            self.style.stroke_width,
        );
        overlay::draw_label(frame, region, &self.style, &self.label);
        overlay::draw_info_panel(frame, region, self.style.primary(), &PanelContent::Metrics);
        overlay::draw_offset_line(frame, region.center(), frame_center, self.style.offset_line());
    }

    /// Frame-level diagnostics, rendered whether or not anything was
    /// detected.
    fn draw_diagnostics(&self, frame: &mut VideoFrame) {
        let battery = self
            .link
            .as_ref()
            .map(|link| link.battery_percent())
            .unwrap_or(0);
        let color = if battery <= self.low_battery_threshold {
            palette::BATTERY_LOW
        } else {
            palette::BATTERY_OK
        };
        overlay::draw_status_text(frame, &format!("BATTERY AT {battery}%"), STATUS_ORIGIN, color);
        overlay::draw_center_guide(frame, palette::WHITE, self.guide_half_extent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use steering::SteeringError;

    enum Tick {
        Skip,
        Frame,
        Fail,
    }

    struct ScriptedSource {
        width: u32,
        height: u32,
        ticks: VecDeque<Tick>,
        sequence: u32,
        closed: Arc<AtomicBool>,
    }

    impl ScriptedSource {
        fn new(width: u32, height: u32, ticks: Vec<Tick>) -> Self {
            Self {
                width,
                height,
                ticks: ticks.into(),
                sequence: 0,
                closed: Arc::new(AtomicBool::new(false)),
            }
        }

        fn frames(width: u32, height: u32, count: usize) -> Self {
            Self::new(width, height, (0..count).map(|_| Tick::Frame).collect())
        }

        fn closed_flag(&self) -> Arc<AtomicBool> {
            Arc::clone(&self.closed)
        }
    }

    impl FrameSource for ScriptedSource {
        fn next_frame(&mut self) -> Result<Option<VideoFrame>, CaptureError> {
            match self.ticks.pop_front() {
                None => Err(CaptureError::Exhausted),
                Some(Tick::Skip) => Ok(None),
                Some(Tick::Fail) => Err(CaptureError::Stream("link reset".into())),
                Some(Tick::Frame) => {
                    let mut frame = VideoFrame::filled(self.width, self.height, [0, 0, 0]);
                    frame.sequence = self.sequence;
                    self.sequence += 1;
                    Ok(Some(frame))
                }
            }
        }

        fn dimensions(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn close(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    struct FixedDetector(Vec<Region>);

    impl Detector for FixedDetector {
        fn detect(
            &mut self,
            _frame: &VideoFrame,
            _params: &DetectorParams,
        ) -> Result<Vec<Region>, TrackerError> {
            Ok(self.0.clone())
        }
    }

    struct RecordingSink {
        commands: Mutex<Vec<ActuatorCommand>>,
        battery: u8,
    }

    impl RecordingSink {
        fn new(battery: u8) -> Arc<Self> {
            Arc::new(Self { commands: Mutex::new(Vec::new()), battery })
        }
    }

    impl CommandSink for RecordingSink {
        fn dispatch(&self, command: &ActuatorCommand) -> Result<(), SteeringError> {
            self.commands.lock().unwrap().push(*command);
            Ok(())
        }

        fn battery_percent(&self) -> u8 {
            self.battery
        }
    }

    struct RecordingDisplay {
        frames: Vec<VideoFrame>,
        quit_after: Option<usize>,
        closed: Arc<AtomicBool>,
    }

    impl RecordingDisplay {
        fn new() -> Self {
            Self { frames: Vec::new(), quit_after: None, closed: Arc::new(AtomicBool::new(false)) }
        }

        fn quit_after(frames: usize) -> Self {
            Self { quit_after: Some(frames), ..Self::new() }
        }

        fn closed_flag(&self) -> Arc<AtomicBool> {
            Arc::clone(&self.closed)
        }
    }

    impl DisplaySink for RecordingDisplay {
        fn present(&mut self, frame: &VideoFrame) -> Result<(), TrackerError> {
            self.frames.push(frame.clone());
            Ok(())
        }

        fn poll_quit(&mut self) -> bool {
            match self.quit_after {
                Some(limit) => self.frames.len() >= limit,
                None => false,
            }
        }

        fn close(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    fn run_pipeline<S: FrameSource, D: Detector>(
        source: S,
        detector: D,
        battery: u8,
    ) -> (PipelineReport, Vec<VideoFrame>, Vec<ActuatorCommand>) {
        let sink = RecordingSink::new(battery);
        let display = RecordingDisplay::new();
        let mut pipeline = Pipeline::new(
            &TrackerConfig::default(),
            source,
            detector,
            display,
            sink.clone(),
        )
        .unwrap();
        let report = pipeline.run().unwrap();
        let frames = std::mem::take(&mut pipeline.display.frames);
        let commands = sink.commands.lock().unwrap().clone();
        (report, frames, commands)
    }

    #[test]
    fn test_missing_model_never_enters_running() {
        let mut config = TrackerConfig::default();
        config.detector.model_path = Some("/nonexistent/frontalface.xml".into());

        let result = Pipeline::new(
            &config,
            ScriptedSource::frames(64, 48, 1),
            FixedDetector(vec![]),
            RecordingDisplay::new(),
            RecordingSink::new(100),
        );
        assert!(matches!(result, Err(TrackerError::Config(_))));
    }

    #[test]
    fn test_end_to_end_centering_scenario() {
        // 640x480 frame, detection {100, 80, 120, 140}: center (160, 150)
        // falls below both dead zones, so both corrections are positive
        let detection = Region::new(100, 80, 120, 140);
        let (report, frames, commands) = run_pipeline(
            ScriptedSource::frames(640, 480, 1),
            FixedDetector(vec![detection]),
            100,
        );

        assert_eq!(report.frames_presented, 1);
        assert_eq!(report.detections, 1);
        assert_eq!(report.commands_dispatched, 1);
        assert_eq!(report.stop, StopReason::SourceExhausted);

        assert_eq!(commands, vec![ActuatorCommand::new(0, 50, 50, 0)]);

        // The presented frame carries the full overlay set
        let frame = &frames[0];
        let style = TrackerConfig::default().style;
        // Corner bracket at the box origin
        assert_eq!(frame.get_pixel(100, 80), Some(style.primary));
        // Label plate spans x=100 .. 100 + 7*12 below the box
        assert_eq!(frame.get_pixel(100, 228), Some(style.label_plate));
        assert_eq!(frame.get_pixel(183, 228), Some(style.label_plate));
        assert_eq!(frame.get_pixel(184, 228), Some([0, 0, 0]));
        // Center guide around (320, 240)
        assert_eq!(frame.get_pixel(300, 240), Some(palette::WHITE.0));
        // Battery text in the healthy color
        assert_eq!(frame.get_pixel(6, 16), Some(palette::BATTERY_OK.0));
    }

    #[test]
    fn test_zero_detections_still_renders_diagnostics() {
        let (report, frames, commands) = run_pipeline(
            ScriptedSource::frames(640, 480, 1),
            FixedDetector(vec![]),
            100,
        );

        assert_eq!(report.frames_presented, 1);
        assert_eq!(report.detections, 0);
        assert_eq!(report.commands_dispatched, 0);
        assert!(commands.is_empty());

        let frame = &frames[0];
        assert_eq!(frame.get_pixel(300, 240), Some(palette::WHITE.0));
        assert_eq!(frame.get_pixel(6, 16), Some(palette::BATTERY_OK.0));
    }

    #[test]
    fn test_transient_skip_keeps_running() {
        let source = ScriptedSource::new(64, 48, vec![Tick::Skip, Tick::Frame]);
        let (report, frames, _) = run_pipeline(source, FixedDetector(vec![]), 100);

        assert_eq!(report.frames_skipped, 1);
        assert_eq!(report.frames_presented, 1);
        assert_eq!(frames.len(), 1);
        assert_eq!(report.stop, StopReason::SourceExhausted);
    }

    #[test]
    fn test_source_failure_stops_cleanly() {
        let source = ScriptedSource::new(64, 48, vec![Tick::Frame, Tick::Fail]);
        let closed = source.closed_flag();
        let (report, _, _) = run_pipeline(source, FixedDetector(vec![]), 100);

        assert_eq!(report.frames_presented, 1);
        assert!(matches!(report.stop, StopReason::SourceFailed(_)));
        assert!(closed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_quit_signal_stops_loop() {
        let sink = RecordingSink::new(100);
        let source = ScriptedSource::frames(64, 48, 100);
        let source_closed = source.closed_flag();
        let display = RecordingDisplay::quit_after(3);
        let display_closed = display.closed_flag();

        let mut pipeline = Pipeline::new(
            &TrackerConfig::default(),
            source,
            FixedDetector(vec![]),
            display,
            sink,
        )
        .unwrap();
        assert_eq!(pipeline.state(), PipelineState::Running);
        let report = pipeline.run().unwrap();

        assert_eq!(report.frames_presented, 3);
        assert_eq!(report.stop, StopReason::QuitRequested);
        assert_eq!(pipeline.state(), PipelineState::Stopped);
        assert!(source_closed.load(Ordering::SeqCst));
        assert!(display_closed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_malformed_detections_dropped_not_fatal() {
        let regions = vec![
            Region::new(10, 10, 0, 50),     // zero width
            Region::new(5000, 5000, 20, 20), // fully outside
            Region::new(100, 80, 120, 140),  // valid
        ];
        let (report, _, commands) = run_pipeline(
            ScriptedSource::frames(640, 480, 1),
            FixedDetector(regions),
            100,
        );

        assert_eq!(report.detections, 1);
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_battery_color_switches_at_threshold() {
        // Threshold is 20: the boundary value itself selects the low color
        let (_, frames, _) = run_pipeline(
            ScriptedSource::frames(64, 48, 1),
            FixedDetector(vec![]),
            20,
        );
        assert_eq!(frames[0].get_pixel(6, 16), Some(palette::BATTERY_LOW.0));

        let (_, frames, _) = run_pipeline(
            ScriptedSource::frames(64, 48, 1),
            FixedDetector(vec![]),
            21,
        );
        assert_eq!(frames[0].get_pixel(6, 16), Some(palette::BATTERY_OK.0));
    }

    #[test]
    fn test_commands_follow_detection_order() {
        // Two detections per frame: left of center then right of center
        let regions = vec![
            Region::new(0, 200, 40, 40),    // center x = 20 -> positive
            Region::new(560, 200, 40, 40),  // center x = 580 -> negative
        ];
        let (report, _, commands) = run_pipeline(
            ScriptedSource::frames(640, 480, 1),
            FixedDetector(regions),
            100,
        );

        assert_eq!(report.detections, 2);
        let lateral: Vec<i8> = commands.iter().map(|c| c.left_right).collect();
        assert_eq!(lateral, vec![50, -50]);
    }
}
