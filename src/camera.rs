//! Camera mapping from head position to a target pose.
//!
//! The mapping is a total pure function over the two tracking states: an
//! `Active` sample scales into a camera offset, and `Lost` resolves to the
//! fixed neutral pose. How the applied pose reaches the target is a separate
//! concern handled by [`EasedPose`].

use crate::{
    constants::{DEFAULT_GAIN_X, DEFAULT_GAIN_Y, DEFAULT_GAIN_Z, DEFAULT_Z_OFFSET, NEUTRAL_CAMERA_POSITION},
    tracker::PositionSample,
};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Target camera position and displacement magnitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    /// Where the camera should be
    pub position: Point3<f64>,
    /// Displacement magnitude the material should apply
    pub displacement_scale: f64,
}

/// Displacement magnitude policy while tracking is lost.
///
/// The observed deployments disagree on this value, so it is a named
/// configuration rather than a hardcoded pick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LostDisplacement {
    /// Flatten the relief entirely
    Zero,
    /// Keep the active displacement unchanged
    Hold,
    /// Use a fixed magnitude
    Fixed(f64),
}

impl Default for LostDisplacement {
    fn default() -> Self {
        Self::Zero
    }
}

/// How the applied pose approaches its target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseEasing {
    /// Jump to the target in one frame
    Snap,
    /// Exponential approach at `rate` per second, frame-rate independent
    Smooth {
        /// Approach rate (1/s); higher settles faster
        rate: f64,
    },
}

impl Default for PoseEasing {
    fn default() -> Self {
        Self::Snap
    }
}

/// Pure mapping from head position to camera target
#[derive(Debug, Clone)]
pub struct CameraMapping {
    /// Per-axis gain applied to the head position
    pub gain: Vector3<f64>,
    /// Offset added to the mapped camera depth
    pub z_offset: f64,
    /// Resting pose used while tracking is lost
    pub neutral_position: Point3<f64>,
    /// Displacement policy while tracking is lost
    pub lost_displacement: LostDisplacement,
}

impl Default for CameraMapping {
    fn default() -> Self {
        Self {
            gain: Vector3::new(DEFAULT_GAIN_X, DEFAULT_GAIN_Y, DEFAULT_GAIN_Z),
            z_offset: DEFAULT_Z_OFFSET,
            neutral_position: Point3::new(
                NEUTRAL_CAMERA_POSITION[0],
                NEUTRAL_CAMERA_POSITION[1],
                NEUTRAL_CAMERA_POSITION[2],
            ),
            lost_displacement: LostDisplacement::default(),
        }
    }
}

impl CameraMapping {
    /// Target for an active head-position sample
    #[must_use]
    pub fn target_for_sample(&self, sample: PositionSample, active_displacement: f64) -> CameraTarget {
        CameraTarget {
            position: Point3::new(
                sample.x * self.gain.x,
                sample.y * self.gain.y,
                sample.z * self.gain.z + self.z_offset,
            ),
            displacement_scale: active_displacement,
        }
    }

    /// Target for the lost state, regardless of any prior pose
    #[must_use]
    pub fn target_for_lost(&self, active_displacement: f64) -> CameraTarget {
        let displacement_scale = match self.lost_displacement {
            LostDisplacement::Zero => 0.0,
            LostDisplacement::Hold => active_displacement,
            LostDisplacement::Fixed(value) => value,
        };

        CameraTarget {
            position: self.neutral_position,
            displacement_scale,
        }
    }
}

/// Pose applied to the scene each frame, moved toward the current target
pub struct EasedPose {
    easing: PoseEasing,
    position: Point3<f64>,
    displacement_scale: f64,
}

impl EasedPose {
    /// Start at the given target
    #[must_use]
    pub fn new(initial: CameraTarget, easing: PoseEasing) -> Self {
        Self {
            easing,
            position: initial.position,
            displacement_scale: initial.displacement_scale,
        }
    }

    /// Advance the applied pose toward `target` over a frame of `dt` seconds
    pub fn advance(&mut self, target: &CameraTarget, dt: f64) {
        match self.easing {
            PoseEasing::Snap => {
                self.position = target.position;
                self.displacement_scale = target.displacement_scale;
            }
            PoseEasing::Smooth { rate } => {
                let blend = 1.0 - (-rate * dt).exp();
                self.position += (target.position - self.position) * blend;
                self.displacement_scale += (target.displacement_scale - self.displacement_scale) * blend;
            }
        }
    }

    /// Currently applied camera position
    #[must_use]
    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// Currently applied displacement magnitude
    #[must_use]
    pub fn displacement_scale(&self) -> f64 {
        self.displacement_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_sample_mapping() {
        let mapping = CameraMapping::default();
        let target = mapping.target_for_sample(PositionSample::new(2.0, 1.0, 0.0), 5.0);

        assert_eq!(target.position, Point3::new(1.0, 0.3, 3.0));
        assert_eq!(target.displacement_scale, 5.0);
    }

    #[test]
    fn test_lost_target_is_neutral() {
        let mapping = CameraMapping::default();
        let target = mapping.target_for_lost(5.0);

        assert_eq!(target.position, Point3::new(0.0, 0.0, 5.0));
        assert_eq!(target.displacement_scale, 0.0);
    }

    #[test]
    fn test_lost_displacement_policies() {
        let mut mapping = CameraMapping::default();

        mapping.lost_displacement = LostDisplacement::Hold;
        assert_eq!(mapping.target_for_lost(5.0).displacement_scale, 5.0);

        mapping.lost_displacement = LostDisplacement::Fixed(2.5);
        assert_eq!(mapping.target_for_lost(5.0).displacement_scale, 2.5);
    }

    #[test]
    fn test_snap_reaches_target_in_one_frame() {
        let mapping = CameraMapping::default();
        let start = mapping.target_for_lost(5.0);
        let target = mapping.target_for_sample(PositionSample::new(2.0, 1.0, 0.0), 5.0);

        let mut pose = EasedPose::new(start, PoseEasing::Snap);
        pose.advance(&target, 1.0 / 60.0);

        assert_eq!(pose.position(), target.position);
        assert_eq!(pose.displacement_scale(), target.displacement_scale);
    }

    #[test]
    fn test_smooth_approach_is_monotone_and_settles() {
        let mapping = CameraMapping::default();
        let start = mapping.target_for_lost(5.0);
        let target = mapping.target_for_sample(PositionSample::new(2.0, 0.0, 0.0), 5.0);

        let mut pose = EasedPose::new(start, PoseEasing::Smooth { rate: 6.0 });
        let mut last_distance = (pose.position() - target.position).norm();

        for _ in 0..300 {
            pose.advance(&target, 1.0 / 60.0);
            let distance = (pose.position() - target.position).norm();
            assert!(distance <= last_distance);
            last_distance = distance;
        }

        assert!(last_distance < 1e-6);
        assert!((pose.displacement_scale() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_smooth_approach_is_frame_rate_independent() {
        let target = CameraTarget {
            position: Point3::new(1.0, 1.0, 1.0),
            displacement_scale: 5.0,
        };
        let start = CameraTarget {
            position: Point3::origin(),
            displacement_scale: 0.0,
        };

        let mut coarse = EasedPose::new(start, PoseEasing::Smooth { rate: 4.0 });
        coarse.advance(&target, 0.1);

        let mut fine = EasedPose::new(start, PoseEasing::Smooth { rate: 4.0 });
        fine.advance(&target, 0.05);
        fine.advance(&target, 0.05);

        assert!((coarse.position() - fine.position()).norm() < 1e-9);
    }
}
