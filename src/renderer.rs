//! Render backend seam.
//!
//! The actual GPU/window system is an external collaborator. The loop only
//! needs a surface it can resize, present a scene snapshot into, and poll
//! for surface events; a headless implementation backs tests and
//! display-less runs.

use crate::{error::Result, scene::SceneState};
use log::debug;
use std::collections::VecDeque;

/// Event reported by the display surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The surface changed size
    Resized(u32, u32),
    /// The user asked to close the viewer
    CloseRequested,
}

/// Trait for display backends the render loop presents into
pub trait RenderBackend {
    /// Resize the render surface
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    /// Draw one frame from the scene snapshot
    fn present(&mut self, scene: &SceneState) -> Result<()>;

    /// Drain surface events since the last poll
    fn poll_events(&mut self) -> Vec<SurfaceEvent>;
}

/// What one presented frame looked like
#[derive(Debug, Clone, Copy)]
pub struct FrameRecord {
    /// Camera position applied that frame
    pub camera_position: [f64; 3],
    /// Displacement magnitude applied that frame
    pub displacement_scale: f64,
    /// Viewport at present time
    pub viewport: (u32, u32),
}

/// Backend that records presented frames instead of drawing
pub struct HeadlessBackend {
    surface: (u32, u32),
    pending_events: VecDeque<SurfaceEvent>,
    frames: Vec<FrameRecord>,
}

impl HeadlessBackend {
    /// Create a headless surface of the given size
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: (width, height),
            pending_events: VecDeque::new(),
            frames: Vec::new(),
        }
    }

    /// Queue a surface event for the next poll
    pub fn push_event(&mut self, event: SurfaceEvent) {
        self.pending_events.push_back(event);
    }

    /// Current surface size
    #[must_use]
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface
    }

    /// All frames presented so far
    #[must_use]
    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    /// The most recently presented frame
    #[must_use]
    pub fn last_frame(&self) -> Option<&FrameRecord> {
        self.frames.last()
    }
}

impl RenderBackend for HeadlessBackend {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        debug!("Headless surface resized to {width}x{height}");
        self.surface = (width, height);
        Ok(())
    }

    fn present(&mut self, scene: &SceneState) -> Result<()> {
        self.frames.push(FrameRecord {
            camera_position: [scene.camera.position.x, scene.camera.position.y, scene.camera.position.z],
            displacement_scale: scene.applied_displacement,
            viewport: scene.viewport,
        });
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        self.pending_events.drain(..).collect()
    }
}
