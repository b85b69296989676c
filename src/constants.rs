//! Constants used throughout the application

/// Quiet period after which an unchanged tracking signal counts as lost (ms)
pub const DEFAULT_QUIET_PERIOD_MS: u64 = 2000;

/// Default frames per second for the render loop
pub const DEFAULT_FPS: u32 = 60;

/// Camera gain applied to the horizontal head offset
pub const DEFAULT_GAIN_X: f64 = 0.5;

/// Camera gain applied to the vertical head offset
pub const DEFAULT_GAIN_Y: f64 = 0.3;

/// Camera gain applied to the head distance
pub const DEFAULT_GAIN_Z: f64 = 1.5;

/// Offset added to the mapped camera depth
pub const DEFAULT_Z_OFFSET: f64 = 3.0;

/// Neutral camera position used while tracking is lost
pub const NEUTRAL_CAMERA_POSITION: [f64; 3] = [0.0, 0.0, 5.0];

/// Default material parameters
pub const DEFAULT_AMBIENT_INTENSITY: f64 = 0.90;
pub const DEFAULT_DISPLACEMENT_SCALE: f64 = 5.0;
pub const DEFAULT_DISPLACEMENT_BIAS: f64 = -0.5;
pub const DEFAULT_METALNESS: f64 = 0.0;
pub const DEFAULT_ROUGHNESS: f64 = 0.14;

/// Tunable parameter ranges
pub const AMBIENT_INTENSITY_RANGE: (f64, f64) = (0.0, 1.0);
pub const DISPLACEMENT_SCALE_RANGE: (f64, f64) = (0.0, 30.0);
pub const DISPLACEMENT_BIAS_RANGE: (f64, f64) = (-10.0, 10.0);

/// Default tracker options forwarded to the external sensor
pub const DEFAULT_SMOOTH_EYE: f64 = 0.1;
pub const DEFAULT_SMOOTH_DIST: f64 = 0.15;
pub const DEFAULT_DEFAULT_DIST: f64 = 0.12;
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.85;

/// Camera projection parameters
pub const CAMERA_FOV_DEGREES: f64 = 45.0;
pub const CAMERA_NEAR: f64 = 1.0;
pub const CAMERA_FAR: f64 = 1000.0;

/// Mesh plane dimensions and tessellation
pub const MESH_PLANE_WIDTH: f64 = 10.0;
pub const MESH_PLANE_HEIGHT: f64 = 10.0;
pub const DEFAULT_MESH_SEGMENTS_X: u32 = 512;
pub const DEFAULT_MESH_SEGMENTS_Y: u32 = 1024;

/// Uniform scale applied to the mesh after aspect correction
pub const MESH_UNIFORM_SCALE: f64 = 0.23;

/// Default smoothing rate for eased camera transitions (1/s)
pub const DEFAULT_EASING_RATE: f64 = 6.0;

/// Default headless surface size
pub const DEFAULT_SURFACE_WIDTH: u32 = 1280;
pub const DEFAULT_SURFACE_HEIGHT: u32 = 720;
