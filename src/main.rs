//! Parallax photo viewer: a head-tracked 2.5D rendering of one photograph.

use anyhow::Result;
use clap::Parser;
use log::info;
use parallax_photo::{
    app::App,
    assets::ImagePair,
    camera::PoseEasing,
    config::Config,
    renderer::HeadlessBackend,
    tracker::{HeadSensor, NullSensor, SweepSensor},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Color image to display
    #[arg(long, default_value = "assets/photo.png")]
    color: String,

    /// Depth map accompanying the color image
    #[arg(long, default_value = "assets/photo_depth.png")]
    depth: String,

    /// Head sensor to use (sweep, none)
    #[arg(short, long, default_value = "sweep")]
    sensor: String,

    /// Target framerate (overrides the config file)
    #[arg(short, long)]
    fps: Option<u32>,

    /// Stop after this many frames (runs until closed if omitted)
    #[arg(long)]
    frames: Option<u64>,

    /// Ease the camera toward its target instead of snapping
    #[arg(long)]
    smooth: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Parallax Photo Viewer");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {e}. Using defaults.");
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(fps) = args.fps {
        config.display.target_fps = fps;
    }
    if args.smooth {
        config.camera.easing = PoseEasing::Smooth {
            rate: parallax_photo::constants::DEFAULT_EASING_RATE,
        };
    }

    // Decode both images up front; a failed load refuses to build the scene
    let images = ImagePair::load(&args.color, &args.depth)?;

    let sensor: Box<dyn HeadSensor> = match args.sensor.as_str() {
        "none" => Box::new(NullSensor),
        _ => Box::new(SweepSensor::default()),
    };

    let backend = HeadlessBackend::new(config.display.surface_width, config.display.surface_height);

    let mut app = App::new(&config, &images, sensor, backend)?;
    match args.frames {
        Some(frames) => app.run_frames(frames)?,
        None => app.run()?,
    }

    Ok(())
}
