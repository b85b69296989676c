//! Configuration management for the parallax photo viewer

use crate::{
    camera::{CameraMapping, LostDisplacement, PoseEasing},
    constants::{
        DEFAULT_FPS, DEFAULT_GAIN_X, DEFAULT_GAIN_Y, DEFAULT_GAIN_Z, DEFAULT_MESH_SEGMENTS_X, DEFAULT_MESH_SEGMENTS_Y,
        DEFAULT_QUIET_PERIOD_MS, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, DEFAULT_Z_OFFSET,
        DISPLACEMENT_SCALE_RANGE, NEUTRAL_CAMERA_POSITION,
    },
    error::{Error, Result},
    scene::MaterialSettings,
    tracker::TrackerOptions,
};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::{
    path::Path,
    time::Duration,
};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Options forwarded verbatim to the external head tracker
    pub tracker: TrackerOptions,

    /// Head-to-camera mapping configuration
    pub camera: CameraConfig,

    /// Liveness monitoring configuration
    pub liveness: LivenessConfig,

    /// Material defaults bound to the tweak panel
    pub material: MaterialSettings,

    /// Display configuration
    pub display: DisplayConfig,

    /// Mesh tessellation configuration
    pub mesh: MeshConfig,
}

/// Head-to-camera mapping parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Gain applied to the horizontal head offset
    pub gain_x: f64,

    /// Gain applied to the vertical head offset
    pub gain_y: f64,

    /// Gain applied to the head distance
    pub gain_z: f64,

    /// Offset added to the mapped camera depth
    pub z_offset: f64,

    /// Displacement policy while tracking is lost
    pub lost_displacement: LostDisplacement,

    /// How the applied pose approaches its target
    pub easing: PoseEasing,
}

/// Liveness monitoring parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LivenessConfig {
    /// Quiet period before an unchanged signal counts as lost (ms)
    pub quiet_period_ms: u64,
}

/// Display parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Target framerate
    pub target_fps: u32,

    /// Initial surface width
    pub surface_width: u32,

    /// Initial surface height
    pub surface_height: u32,
}

/// Mesh tessellation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Horizontal segment count
    pub segments_x: u32,

    /// Vertical segment count
    pub segments_y: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker: TrackerOptions::default(),
            camera: CameraConfig::default(),
            liveness: LivenessConfig::default(),
            material: MaterialSettings::default(),
            display: DisplayConfig::default(),
            mesh: MeshConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            gain_x: DEFAULT_GAIN_X,
            gain_y: DEFAULT_GAIN_Y,
            gain_z: DEFAULT_GAIN_Z,
            z_offset: DEFAULT_Z_OFFSET,
            lost_displacement: LostDisplacement::default(),
            easing: PoseEasing::default(),
        }
    }
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: DEFAULT_QUIET_PERIOD_MS,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_FPS,
            surface_width: DEFAULT_SURFACE_WIDTH,
            surface_height: DEFAULT_SURFACE_HEIGHT,
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            segments_x: DEFAULT_MESH_SEGMENTS_X,
            segments_y: DEFAULT_MESH_SEGMENTS_Y,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Build the camera mapping from configuration
    #[must_use]
    pub fn camera_mapping(&self) -> CameraMapping {
        CameraMapping {
            gain: Vector3::new(self.camera.gain_x, self.camera.gain_y, self.camera.gain_z),
            z_offset: self.camera.z_offset,
            neutral_position: Point3::new(
                NEUTRAL_CAMERA_POSITION[0],
                NEUTRAL_CAMERA_POSITION[1],
                NEUTRAL_CAMERA_POSITION[2],
            ),
            lost_displacement: self.camera.lost_displacement,
        }
    }

    /// Configured quiet period
    #[must_use]
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.liveness.quiet_period_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.tracker.threshold) {
            return Err(Error::ConfigError(
                "Tracker threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        if self.liveness.quiet_period_ms == 0 {
            return Err(Error::ConfigError("Quiet period must be greater than 0".to_string()));
        }

        if self.display.target_fps == 0 {
            return Err(Error::ConfigError("Target FPS must be greater than 0".to_string()));
        }
        if self.display.surface_width == 0 || self.display.surface_height == 0 {
            return Err(Error::ConfigError("Surface dimensions must be nonzero".to_string()));
        }

        if self.mesh.segments_x == 0 || self.mesh.segments_y == 0 {
            return Err(Error::ConfigError("Mesh segment counts must be nonzero".to_string()));
        }

        if !(0.0..=1.0).contains(&self.material.ambient_intensity) {
            return Err(Error::ConfigError(
                "Ambient intensity must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=30.0).contains(&self.material.displacement_scale) {
            return Err(Error::ConfigError(
                "Displacement scale must be between 0.0 and 30.0".to_string(),
            ));
        }
        if !(-10.0..=10.0).contains(&self.material.displacement_bias) {
            return Err(Error::ConfigError(
                "Displacement bias must be between -10.0 and 10.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.material.metalness) || !(0.0..=1.0).contains(&self.material.roughness) {
            return Err(Error::ConfigError(
                "Metalness and roughness must be between 0.0 and 1.0".to_string(),
            ));
        }

        if let PoseEasing::Smooth { rate } = self.camera.easing {
            if rate <= 0.0 {
                return Err(Error::ConfigError("Easing rate must be greater than 0".to_string()));
            }
        }
        if let LostDisplacement::Fixed(value) = self.camera.lost_displacement {
            let (min, max) = DISPLACEMENT_SCALE_RANGE;
            if !(min..=max).contains(&value) {
                return Err(Error::ConfigError(
                    "Fixed lost displacement must be between 0.0 and 30.0".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Parallax Photo Viewer Configuration

# Options forwarded verbatim to the external head tracker
tracker:
  smoothEye: 0.1
  smoothDist: 0.15
  defautDist: 0.12
  threshold: 0.85

# Head-to-camera mapping
camera:
  gain_x: 0.5
  gain_y: 0.3
  gain_z: 1.5
  z_offset: 3.0
  lost_displacement: zero
  easing: snap

# Liveness monitoring
liveness:
  quiet_period_ms: 2000

# Material defaults
material:
  ambient_intensity: 0.90
  displacement_scale: 5.0
  displacement_bias: -0.5
  metalness: 0.0
  roughness: 0.14

# Display settings
display:
  target_fps: 60
  surface_width: 1280
  surface_height: 720

# Mesh tessellation
mesh:
  segments_x: 512
  segments_y: 1024
"#;
