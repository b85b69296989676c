//! Main application module for the parallax photo viewer.
//!
//! Wires the tracker subscription, the liveness monitor, the camera mapper
//! and the scene into one single-threaded render loop. Each frame pumps the
//! sensor, runs the quiet-period check, moves the applied pose toward its
//! target and presents a scene snapshot; the render step never mutates
//! tracking state.

use crate::{
    assets::ImagePair,
    camera::{CameraMapping, CameraTarget, EasedPose},
    config::Config,
    error::Result,
    liveness::{LivenessMonitor, TrackingState},
    renderer::{RenderBackend, SurfaceEvent},
    scene::SceneState,
    tracker::{HeadSensor, TrackerSubscription},
};
use log::{debug, info};
use std::time::{Duration, Instant};

/// Main application struct
pub struct App<B: RenderBackend> {
    subscription: TrackerSubscription,
    monitor: LivenessMonitor,
    mapping: CameraMapping,
    pose: EasedPose,
    target: CameraTarget,
    scene: SceneState,
    backend: B,
    frame_budget: Duration,
}

impl<B: RenderBackend> App<B> {
    /// Create the viewer from validated configuration, loaded assets, a head
    /// sensor and a render backend.
    ///
    /// A sensor that fails to initialize degrades to a permanently quiet
    /// subscription; the viewer then rests at the neutral pose.
    pub fn new(config: &Config, images: &ImagePair, sensor: Box<dyn HeadSensor>, backend: B) -> Result<Self> {
        config.validate()?;

        info!("Initializing parallax photo viewer");

        let subscription = TrackerSubscription::subscribe(sensor, &config.tracker);
        if !subscription.is_connected() {
            info!("Running without head tracking; camera will rest at the neutral pose");
        }

        let scene = SceneState::new(
            images,
            config.material,
            (config.display.surface_width, config.display.surface_height),
            (config.mesh.segments_x, config.mesh.segments_y),
        )?;

        let mapping = config.camera_mapping();
        let now = Instant::now();
        let monitor = LivenessMonitor::new(config.quiet_period(), now);

        // Rest at neutral until the first sample arrives
        let target = CameraTarget {
            position: mapping.neutral_position,
            displacement_scale: config.material.displacement_scale,
        };
        let pose = EasedPose::new(target, config.camera.easing);

        Ok(Self {
            subscription,
            monitor,
            mapping,
            pose,
            target,
            scene,
            backend,
            frame_budget: Duration::from_secs(1) / config.display.target_fps,
        })
    }

    /// Advance one frame at `now`, easing over `dt` seconds.
    ///
    /// Returns `false` once the surface asked to close.
    pub fn step(&mut self, now: Instant, dt: f64) -> Result<bool> {
        for event in self.backend.poll_events() {
            match event {
                SurfaceEvent::Resized(width, height) => {
                    debug!("Surface resized to {width}x{height}");
                    self.backend.resize(width, height)?;
                    self.scene.handle_resize(width, height);
                }
                SurfaceEvent::CloseRequested => {
                    info!("Close requested by surface");
                    return Ok(false);
                }
            }
        }

        // Pump the tracker; a new sample retargets the camera immediately
        if let Some(sample) = self.subscription.poll_sample() {
            self.monitor.observe_sample(sample, now);
            self.target = self
                .mapping
                .target_for_sample(sample, self.scene.material.displacement_scale);
        }

        // Quiet-period check against the adapter's live value
        if self.monitor.tick(self.subscription.last_view(), now) == TrackingState::Lost {
            self.target = self.mapping.target_for_lost(self.scene.material.displacement_scale);
        }

        self.pose.advance(&self.target, dt);
        self.scene.camera.position = self.pose.position();
        self.scene.applied_displacement = self.pose.displacement_scale();

        self.backend.present(&self.scene)?;

        Ok(true)
    }

    /// Run the render loop until the surface closes
    pub fn run(&mut self) -> Result<()> {
        self.run_inner(None)
    }

    /// Run the render loop for at most `frames` frames
    pub fn run_frames(&mut self, frames: u64) -> Result<()> {
        self.run_inner(Some(frames))
    }

    fn run_inner(&mut self, max_frames: Option<u64>) -> Result<()> {
        info!("Starting render loop");

        let mut frame_count = 0u64;
        let mut last = Instant::now();

        loop {
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f64();
            last = now;

            if !self.step(now, dt)? {
                break;
            }

            frame_count += 1;
            if let Some(max) = max_frames {
                if frame_count >= max {
                    info!("Frame limit of {max} reached");
                    break;
                }
            }

            let spent = now.elapsed();
            if spent < self.frame_budget {
                std::thread::sleep(self.frame_budget - spent);
            }
        }

        info!("Viewer shutting down after {frame_count} frames");
        Ok(())
    }

    /// Current liveness state
    #[must_use]
    pub fn tracking_state(&self) -> TrackingState {
        self.monitor.state()
    }

    /// Current camera target
    #[must_use]
    pub fn target(&self) -> CameraTarget {
        self.target
    }

    /// Scene snapshot
    #[must_use]
    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// Mutable scene access for the tweak panel binding
    pub fn scene_mut(&mut self) -> &mut SceneState {
        &mut self.scene
    }

    /// The render backend
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable backend access (event injection in headless runs)
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
