use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use skinscan_core::acquisition::domain::camera_image::ImageTransform;
use skinscan_core::acquisition::frame_acquirer::FrameAcquirer;
use skinscan_core::acquisition::infrastructure::image_file_source::ImageFileSource;
use skinscan_core::detection::domain::overlay_writer::OverlayWriter;
use skinscan_core::detection::infrastructure::image_overlay_writer::ImageOverlayWriter;
use skinscan_core::detection::infrastructure::ycrcb_skin_detector::YCrCbSkinDetector;
use skinscan_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use skinscan_core::pipeline::skin_scan_use_case::{FrameOutcome, SkinScanUseCase};
use skinscan_core::pipeline::startup_gate::{AlwaysGranted, StartupGate};
use skinscan_core::pipeline::status_reporter::LogStatusReporter;
use skinscan_core::placement::domain::screen_mapper::ScreenMapper;
use skinscan_core::placement::infrastructure::fixed_plane_locator::FixedPlaneLocator;
use skinscan_core::placement::placement_projector::PlacementProjector;
use skinscan_core::placement::tattoo_session::TattooSession;
use skinscan_core::shared::constants::IMAGE_EXTENSIONS;
use skinscan_core::shared::scan_config::ScanConfig;

/// Skin detection and tattoo anchor placement over a sequence of images.
#[derive(Parser)]
#[command(name = "skinscan")]
struct Cli {
    /// Input image files, fed to the scanner in order as camera frames.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Write an annotated overlay per frame into this directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// JSON file with detector settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lower Cr bound of the skin range (overrides config).
    #[arg(long)]
    cr_min: Option<u8>,

    /// Upper Cr bound of the skin range (overrides config).
    #[arg(long)]
    cr_max: Option<u8>,

    /// Lower Cb bound of the skin range (overrides config).
    #[arg(long)]
    cb_min: Option<u8>,

    /// Upper Cb bound of the skin range (overrides config).
    #[arg(long)]
    cb_max: Option<u8>,

    /// Ignore regions smaller than this contour area (pixels²).
    #[arg(long)]
    min_area: Option<f64>,

    /// Screen width in pixels.
    #[arg(long, default_value = "1080")]
    screen_width: f64,

    /// Screen height in pixels.
    #[arg(long, default_value = "1920")]
    screen_height: f64,

    /// Vertical camera field of view in degrees.
    #[arg(long, default_value = "60")]
    fov: f64,

    /// Distance to the simulated skin plane in metres.
    #[arg(long, default_value = "0.5")]
    plane_distance: f64,

    /// Mirror frames on conversion: none, x, y.
    #[arg(long, default_value = "none")]
    mirror: String,

    /// Name of the tattoo design to place.
    #[arg(long, default_value = "default")]
    design: String,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = build_config(&cli)?;
    let locator = FixedPlaneLocator::facing_camera(
        cli.screen_width,
        cli.screen_height,
        cli.fov,
        cli.plane_distance,
    )
    .ok_or("Invalid camera or plane parameters")?;

    let mut use_case = SkinScanUseCase::new(
        Box::new(ImageFileSource::new(cli.inputs.clone())),
        FrameAcquirer::new(parse_mirror(&cli.mirror)),
        Box::new(YCrCbSkinDetector::new(config)),
        PlacementProjector::new(ScreenMapper::new(cli.screen_width, cli.screen_height)),
        Box::new(locator),
        Box::new(LogStatusReporter),
        Box::new(StdoutPipelineLogger::new(10)),
    )
    .with_startup_gate(StartupGate::with_default_timeout(Box::new(AlwaysGranted)));

    let mut session = TattooSession::new();
    session.add_design(&cli.design);
    session.select_design(&cli.design)?;

    let overlay_writer = ImageOverlayWriter::new();
    for input in &cli.inputs {
        let outcome = use_case.on_frame(&mut session);
        println!("{}", describe(input, &outcome));

        if let (Some(dir), Some(frame)) = (&cli.output_dir, use_case.last_frame()) {
            overlay_writer.write(&overlay_path(dir, input), frame, use_case.last_regions())?;
        }
        if matches!(outcome, FrameOutcome::Placed { .. }) {
            session.confirm_placement();
            session.start_placement()?;
        }
    }

    use_case.logger().summary();
    log::info!(
        "Placed {} tattoo(s) over {} frame(s)",
        session.placed().len(),
        cli.inputs.len()
    );
    Ok(())
}

fn build_config(cli: &Cli) -> Result<ScanConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    };
    apply_overrides(cli, &mut config);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(cli: &Cli, config: &mut ScanConfig) {
    if let Some(v) = cli.cr_min {
        config.ycrcb_lower[1] = v;
    }
    if let Some(v) = cli.cr_max {
        config.ycrcb_upper[1] = v;
    }
    if let Some(v) = cli.cb_min {
        config.ycrcb_lower[2] = v;
    }
    if let Some(v) = cli.cb_max {
        config.ycrcb_upper[2] = v;
    }
    if let Some(v) = cli.min_area {
        config.min_region_area = v;
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    for input in &cli.inputs {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
        if !is_image(input) {
            return Err(format!(
                "Not a supported image file: {}",
                input.display()
            )
            .into());
        }
    }
    if let Some(config) = &cli.config {
        if !config.exists() {
            return Err(format!(
                "Config file not found: {}",
                config.display()
            )
            .into());
        }
    }
    if !(cli.screen_width > 0.0 && cli.screen_height > 0.0) {
        return Err(format!(
            "Screen size must be positive, got {}x{}",
            cli.screen_width, cli.screen_height
        )
        .into());
    }
    if !(cli.fov > 0.0 && cli.fov < 180.0) {
        return Err(format!(
            "Field of view must be between 0 and 180 degrees, got {}",
            cli.fov
        )
        .into());
    }
    if cli.plane_distance.is_nan() || cli.plane_distance <= 0.0 {
        return Err(format!(
            "Plane distance must be positive, got {}",
            cli.plane_distance
        )
        .into());
    }
    if let Some(area) = cli.min_area {
        if area.is_nan() || area < 0.0 {
            return Err(format!(
                "Minimum area must be non-negative, got {area}"
            )
            .into());
        }
    }
    let valid_mirrors = ["none", "x", "y"];
    if !valid_mirrors.contains(&cli.mirror.as_str()) {
        return Err(format!(
            "Mirror must be one of: none, x, y, got '{}'",
            cli.mirror
        )
        .into());
    }
    if cli.design.trim().is_empty() {
        return Err("Design name must not be empty".into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn parse_mirror(mirror: &str) -> ImageTransform {
    match mirror {
        "x" => ImageTransform::MirrorX,
        "y" => ImageTransform::MirrorY,
        _ => ImageTransform::None,
    }
}

fn overlay_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame");
    dir.join(format!("{stem}_overlay.png"))
}

fn describe(input: &Path, outcome: &FrameOutcome) -> String {
    let name = input.display();
    match outcome {
        FrameOutcome::Idle => format!("{name}: idle"),
        FrameOutcome::NoImage => format!("{name}: no image"),
        FrameOutcome::NoSkin => format!("{name}: no skin detected"),
        FrameOutcome::SurfaceMiss { region } => {
            let b = region.bounds;
            format!(
                "{name}: skin at ({}, {}, {}x{}) area {:.0}, no surface hit",
                b.x, b.y, b.width, b.height, region.area
            )
        }
        FrameOutcome::Placed { region, pose } => {
            let b = region.bounds;
            let p = pose.position;
            format!(
                "{name}: skin at ({}, {}, {}x{}) area {:.0}, placed at ({:.3}, {:.3}, {:.3})",
                b.x, b.y, b.width, b.height, region.area, p.x, p.y, p.z
            )
        }
    }
}
