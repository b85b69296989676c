//! Parallax photo viewer library for head-tracked 2.5D photographs.
//!
//! A still photograph is draped over a mesh displaced by its depth map, and
//! the virtual camera follows a head-position signal so the image appears to
//! have real depth as the viewer moves. The library provides:
//! - An adapter over an opaque external head/eye sensor
//! - A liveness state machine that detects a lost tracking signal
//! - A pure mapping from head position to a target camera pose
//! - Scene plumbing: depth normalization, displaced mesh, resize handling
//!
//! The pipeline per frame:
//! 1. Pump the tracker subscription for a new position sample
//! 2. Run the quiet-period liveness check against the latest value
//! 3. Map the sample (or the lost state) to a camera target
//! 4. Ease or snap the applied pose toward the target and present
//!
//! # Examples
//!
//! ## Headless run with the demo sensor
//!
//! ```no_run
//! use parallax_photo::{
//!     app::App, assets::ImagePair, config::Config, renderer::HeadlessBackend, tracker::SweepSensor,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let images = ImagePair::load("assets/photo.png", "assets/photo_depth.png")?;
//! let backend = HeadlessBackend::new(1280, 720);
//!
//! let mut app = App::new(&config, &images, Box::new(SweepSensor::default()), backend)?;
//! app.run_frames(600)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Liveness and camera mapping
//!
//! ```
//! use parallax_photo::{
//!     camera::CameraMapping,
//!     liveness::{LivenessMonitor, TrackingState},
//!     tracker::PositionSample,
//! };
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut monitor = LivenessMonitor::new(Duration::from_millis(2000), start);
//!
//! let sample = PositionSample::new(2.0, 1.0, 0.0);
//! monitor.observe_sample(sample, start);
//!
//! // Distinct samples keep the signal active; silence degrades it
//! assert_eq!(monitor.state(), TrackingState::Active);
//!
//! let mapping = CameraMapping::default();
//! let target = mapping.target_for_sample(sample, 5.0);
//! assert_eq!(target.position.x, 1.0);
//! ```

/// Head tracker adapter over the external position sensor
pub mod tracker;

/// Liveness monitoring for the tracking signal
pub mod liveness;

/// Head-position-to-camera mapping and pose easing
pub mod camera;

/// Depth map normalization
pub mod depth;

/// Color and depth asset loading
pub mod assets;

/// Scene state: camera, material, displaced mesh
pub mod scene;

/// Tunable parameter surface
pub mod panel;

/// Render backend seam and headless implementation
pub mod renderer;

/// Main application module
pub mod app;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
