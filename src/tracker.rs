//! Head tracker adapter wrapping the external face/eye position sensor.
//!
//! The sensor itself is opaque: it delivers `{x, y, z}` head-position
//! estimates at whatever cadence it produces them, including never. The
//! adapter pumps it from the render thread and keeps the latest value
//! available for the liveness check.

use crate::{
    constants::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_DEFAULT_DIST, DEFAULT_SMOOTH_DIST, DEFAULT_SMOOTH_EYE},
    error::{Error, Result},
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single head-position estimate in the sensor's coordinate space.
///
/// Equality is exact, field by field; the liveness monitor relies on it to
/// detect an unchanged signal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionSample {
    /// Horizontal head offset
    pub x: f64,
    /// Vertical head offset
    pub y: f64,
    /// Head distance
    pub z: f64,
}

impl PositionSample {
    /// The resting position reported when no sample has ever arrived
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Create a new sample
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Options forwarded verbatim to the external tracker.
///
/// Field names serialize under the upstream tracker's own option spellings,
/// including its `defautDist` spelling of the default distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerOptions {
    /// Smoothing factor for the eye position estimate
    #[serde(rename = "smoothEye")]
    pub smooth_eye: f64,

    /// Smoothing factor for the distance estimate
    #[serde(rename = "smoothDist")]
    pub smooth_dist: f64,

    /// Distance assumed before the first estimate settles
    #[serde(rename = "defautDist")]
    pub default_dist: f64,

    /// Detection confidence threshold (0.0-1.0)
    pub threshold: f64,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            smooth_eye: DEFAULT_SMOOTH_EYE,
            smooth_dist: DEFAULT_SMOOTH_DIST,
            default_dist: DEFAULT_DEFAULT_DIST,
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

/// Trait for external head/eye position sensors
pub trait HeadSensor {
    /// Initialize the sensor with the given options
    fn initialize(&mut self, options: &TrackerOptions) -> Result<()>;

    /// Poll for a new sample; `None` when nothing arrived since the last poll
    fn poll(&mut self) -> Option<PositionSample>;

    /// Get sensor name
    fn name(&self) -> &str;
}

/// Subscription handle over a head sensor.
///
/// `subscribe` always returns a handle. A sensor that fails to initialize
/// (camera denied, no hardware) is dropped after one diagnostic line and the
/// handle behaves as a permanently quiet sensor.
pub struct TrackerSubscription {
    sensor: Option<Box<dyn HeadSensor>>,
    last_view: Option<PositionSample>,
}

impl TrackerSubscription {
    /// Subscribe to a sensor, forwarding the options verbatim
    pub fn subscribe(mut sensor: Box<dyn HeadSensor>, options: &TrackerOptions) -> Self {
        match sensor.initialize(options) {
            Ok(()) => {
                debug!("Head tracker '{}' initialized", sensor.name());
                Self {
                    sensor: Some(sensor),
                    last_view: None,
                }
            }
            Err(e) => {
                warn!("Failed to initialize head tracker: {e}. Continuing without tracking.");
                Self {
                    sensor: None,
                    last_view: None,
                }
            }
        }
    }

    /// Drain the next new sample, if any arrived since the last pump
    pub fn poll_sample(&mut self) -> Option<PositionSample> {
        let sample = self.sensor.as_mut()?.poll()?;
        self.last_view = Some(sample);
        Some(sample)
    }

    /// Latest value the sensor ever reported
    #[must_use]
    pub fn last_view(&self) -> Option<PositionSample> {
        self.last_view
    }

    /// Whether a live sensor backs this subscription
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.sensor.is_some()
    }
}

/// Demo sensor sweeping the head position along a smooth closed path
pub struct SweepSensor {
    phase: f64,
    step: f64,
    amplitude: f64,
}

impl SweepSensor {
    /// Create a sweep sensor advancing `step` radians per poll
    #[must_use]
    pub fn new(step: f64, amplitude: f64) -> Self {
        Self {
            phase: 0.0,
            step,
            amplitude,
        }
    }
}

impl Default for SweepSensor {
    fn default() -> Self {
        Self::new(0.02, 0.6)
    }
}

impl HeadSensor for SweepSensor {
    fn initialize(&mut self, _options: &TrackerOptions) -> Result<()> {
        Ok(())
    }

    fn poll(&mut self) -> Option<PositionSample> {
        self.phase += self.step;
        Some(PositionSample::new(
            self.amplitude * self.phase.sin(),
            self.amplitude * 0.5 * (self.phase * 0.7).cos(),
            0.1 * (self.phase * 0.3).sin(),
        ))
    }

    fn name(&self) -> &str {
        "SweepSensor"
    }
}

/// Sensor replaying a fixed list of samples, one per poll
pub struct ScriptedSensor {
    samples: VecDeque<Option<PositionSample>>,
}

impl ScriptedSensor {
    /// Create a sensor that yields each entry in order, then nothing.
    /// `None` entries model polls where the tracker produced no sample.
    #[must_use]
    pub fn new(samples: Vec<Option<PositionSample>>) -> Self {
        Self {
            samples: samples.into(),
        }
    }

    /// Convenience constructor from plain samples
    #[must_use]
    pub fn from_samples(samples: &[PositionSample]) -> Self {
        Self::new(samples.iter().copied().map(Some).collect())
    }
}

impl HeadSensor for ScriptedSensor {
    fn initialize(&mut self, _options: &TrackerOptions) -> Result<()> {
        Ok(())
    }

    fn poll(&mut self) -> Option<PositionSample> {
        self.samples.pop_front().flatten()
    }

    fn name(&self) -> &str {
        "ScriptedSensor"
    }
}

/// Sensor standing in for absent tracking hardware; never initializes
pub struct NullSensor;

impl HeadSensor for NullSensor {
    fn initialize(&mut self, _options: &TrackerOptions) -> Result<()> {
        Err(Error::Tracker("no tracking hardware available".to_string()))
    }

    fn poll(&mut self) -> Option<PositionSample> {
        None
    }

    fn name(&self) -> &str {
        "NullSensor"
    }
}
