use std::time::Instant;

use crate::acquisition::domain::camera_image_source::CameraImageSource;
use crate::acquisition::frame_acquirer::{AcquireError, FrameAcquirer};
use crate::detection::domain::region_selector::select_largest;
use crate::detection::domain::skin_detector::SkinDetector;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::startup_gate::{GateState, StartupGate};
use crate::pipeline::status_reporter::StatusReporter;
use crate::placement::domain::placement_target::PlacementTarget;
use crate::placement::domain::surface_locator::SurfaceLocator;
use crate::placement::placement_projector::PlacementProjector;
use crate::shared::frame::Frame;
use crate::shared::geometry::Pose;
use crate::shared::region::SkinRegion;

/// What happened to one frame callback.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameOutcome {
    /// Scanner disabled, or still waiting on (or refused) camera permission.
    Idle,
    NoImage,
    NoSkin,
    SurfaceMiss { region: SkinRegion },
    Placed { region: SkinRegion, pose: Pose },
}

impl FrameOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            FrameOutcome::Idle => "idle",
            FrameOutcome::NoImage => "no_image",
            FrameOutcome::NoSkin => "no_skin",
            FrameOutcome::SurfaceMiss { .. } => "surface_miss",
            FrameOutcome::Placed { .. } => "placed",
        }
    }
}

/// Per-frame skin scan: acquire → detect → select → project → place.
///
/// Driven by the host once per camera frame. Every failure inside a frame
/// is folded into the returned [`FrameOutcome`]; nothing propagates.
pub struct SkinScanUseCase {
    source: Box<dyn CameraImageSource>,
    acquirer: FrameAcquirer,
    detector: Box<dyn SkinDetector>,
    projector: PlacementProjector,
    locator: Box<dyn SurfaceLocator>,
    reporter: Box<dyn StatusReporter>,
    logger: Box<dyn PipelineLogger>,
    gate: Option<StartupGate>,
    enabled: bool,
    frame_ready: bool,
    last_regions: Vec<SkinRegion>,
}

impl SkinScanUseCase {
    pub fn new(
        source: Box<dyn CameraImageSource>,
        acquirer: FrameAcquirer,
        detector: Box<dyn SkinDetector>,
        projector: PlacementProjector,
        locator: Box<dyn SurfaceLocator>,
        reporter: Box<dyn StatusReporter>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            acquirer,
            detector,
            projector,
            locator,
            reporter,
            logger,
            gate: None,
            enabled: true,
            frame_ready: false,
            last_regions: Vec::new(),
        }
    }

    /// Holds frames back until `gate` opens.
    pub fn with_startup_gate(mut self, gate: StartupGate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn enable(&mut self) {
        if !self.enabled {
            log::info!("Skin scanner enabled");
        }
        self.enabled = true;
    }

    /// Subsequent callbacks return [`FrameOutcome::Idle`] without touching
    /// the camera.
    pub fn disable(&mut self) {
        if self.enabled {
            log::info!("Skin scanner disabled");
        }
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn on_frame(&mut self, target: &mut dyn PlacementTarget) -> FrameOutcome {
        self.frame_ready = false;
        self.last_regions.clear();

        if !self.enabled {
            return record(&mut *self.logger, FrameOutcome::Idle);
        }
        if let Some(gate) = self.gate.as_mut() {
            if gate.poll(&mut *self.reporter) != GateState::Open {
                return record(&mut *self.logger, FrameOutcome::Idle);
            }
        }

        let started = Instant::now();
        let acquired = self.acquirer.acquire(&mut *self.source);
        self.logger.timing("acquire", elapsed_ms(started));

        let frame = match acquired {
            Ok(Some(frame)) => frame,
            Ok(None) => return record(&mut *self.logger, FrameOutcome::NoImage),
            Err(AcquireError::Source(e)) => {
                log::warn!("Camera source failed: {e}");
                return record(&mut *self.logger, FrameOutcome::NoImage);
            }
            Err(e) => {
                log::warn!("Dropping frame: {e}");
                return record(&mut *self.logger, FrameOutcome::NoSkin);
            }
        };
        self.frame_ready = true;
        let (width, height, index) = (frame.width(), frame.height(), frame.index());
        self.logger.progress(index + 1, None);

        let started = Instant::now();
        let regions = self.detector.regions_or_empty(frame);
        self.logger.timing("detect", elapsed_ms(started));
        self.logger.metric("regions", regions.len() as f64);

        let selected = select_largest(&regions).cloned();
        self.last_regions = regions;
        let Some(region) = selected else {
            return record(&mut *self.logger, FrameOutcome::NoSkin);
        };

        let started = Instant::now();
        let pose =
            self.projector
                .project_and_place(&region, width, height, &mut *self.locator, target);
        self.logger.timing("project", elapsed_ms(started));

        let outcome = match pose {
            Some(pose) => {
                log::debug!(
                    "Frame {index}: placed at ({:.3}, {:.3}, {:.3})",
                    pose.position.x,
                    pose.position.y,
                    pose.position.z
                );
                FrameOutcome::Placed { region, pose }
            }
            None => FrameOutcome::SurfaceMiss { region },
        };
        record(&mut *self.logger, outcome)
    }

    /// Frame converted by the latest callback, or `None` if that callback
    /// produced no frame.
    pub fn last_frame(&self) -> Option<&Frame> {
        if self.frame_ready {
            self.acquirer.frame()
        } else {
            None
        }
    }

    /// Every region found by the latest callback, in extraction order.
    pub fn last_regions(&self) -> &[SkinRegion] {
        &self.last_regions
    }

    pub fn frames_acquired(&self) -> usize {
        self.acquirer.frames_acquired()
    }

    pub fn logger(&self) -> &dyn PipelineLogger {
        &*self.logger
    }

    pub fn logger_mut(&mut self) -> &mut dyn PipelineLogger {
        &mut *self.logger
    }
}

fn record(logger: &mut dyn PipelineLogger, outcome: FrameOutcome) -> FrameOutcome {
    logger.outcome(outcome.label());
    outcome
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
