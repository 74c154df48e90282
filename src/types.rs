// Shared value types for both flight models
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LAUNCH_ANGLE_DEG;

/// Launch conditions of a single batted ball
///
/// Angles are in degrees, speed in mph, distance in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitParameters {
    pub exit_velocity_mph: f64,
    pub launch_angle_deg: f64,
    /// Horizontal deflection from straight-away center field
    #[serde(default)]
    pub spray_angle_deg: f64,
    /// Absent or zero means neutral lift scaling
    #[serde(default)]
    pub spin_rate_rpm: Option<f64>,
    /// Recorded hit distance, only used to size the Bezier arc
    #[serde(default)]
    pub hit_distance_ft: Option<f64>,
    /// Landing position (x, z) derived from raw hit coordinates
    #[serde(default)]
    pub landing_offset_ft: Option<(f64, f64)>,
}

impl Default for HitParameters {
    fn default() -> Self {
        Self {
            exit_velocity_mph: 100.0,
            launch_angle_deg: DEFAULT_LAUNCH_ANGLE_DEG,
            spray_angle_deg: 0.0,
            spin_rate_rpm: None,
            hit_distance_ft: None,
            landing_offset_ft: None,
        }
    }
}

impl HitParameters {
    pub fn new(exit_velocity_mph: f64, launch_angle_deg: f64, spray_angle_deg: f64) -> Self {
        Self {
            exit_velocity_mph,
            launch_angle_deg,
            spray_angle_deg,
            ..Default::default()
        }
    }

    pub fn with_spin_rate(mut self, rpm: f64) -> Self {
        self.spin_rate_rpm = Some(rpm);
        self
    }

    pub fn with_distance(mut self, distance_ft: f64) -> Self {
        self.hit_distance_ft = Some(distance_ft);
        self
    }

    pub fn with_landing_offset(mut self, x_ft: f64, z_ft: f64) -> Self {
        self.landing_offset_ft = Some((x_ft, z_ft));
        self
    }
}

/// A position along a trajectory: `x` lateral, `y` height above the field,
/// `z` depth (negative values run from home plate into the outfield).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl TrajectoryPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Ground-plane distance from the origin
    pub fn horizontal_distance(&self) -> f64 {
        (self.x * self.x + self.z * self.z).sqrt()
    }
}

impl From<Vector3<f64>> for TrajectoryPoint {
    fn from(v: Vector3<f64>) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<&Vector3<f64>> for TrajectoryPoint {
    fn from(v: &Vector3<f64>) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_parameters_builders() {
        let hit = HitParameters::new(95.0, 28.0, -12.0)
            .with_spin_rate(2500.0)
            .with_distance(380.0);

        assert_eq!(hit.exit_velocity_mph, 95.0);
        assert_eq!(hit.spray_angle_deg, -12.0);
        assert_eq!(hit.spin_rate_rpm, Some(2500.0));
        assert_eq!(hit.hit_distance_ft, Some(380.0));
        assert!(hit.landing_offset_ft.is_none());
    }

    #[test]
    fn test_default_launch_angle_matches_arc_fallback() {
        assert_eq!(HitParameters::default().launch_angle_deg, DEFAULT_LAUNCH_ANGLE_DEG);
    }

    #[test]
    fn test_hit_parameters_json_defaults() {
        let hit: HitParameters =
            serde_json::from_str(r#"{"exit_velocity_mph": 88.0, "launch_angle_deg": 12.0}"#).unwrap();
        assert_eq!(hit.spray_angle_deg, 0.0);
        assert!(hit.spin_rate_rpm.is_none());
    }

    #[test]
    fn test_point_vector_conversion() {
        let p = TrajectoryPoint::from(Vector3::new(3.0, 1.0, -4.0));
        assert_eq!(p, TrajectoryPoint::new(3.0, 1.0, -4.0));
        assert_eq!(p.to_vector(), Vector3::new(3.0, 1.0, -4.0));
        assert!((p.horizontal_distance() - 5.0).abs() < 1e-12);
    }
}
