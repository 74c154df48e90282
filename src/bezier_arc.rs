//! Geometric flight path: a quadratic Bezier curve through three control
//! points (bat contact, apex, landing spot).
//!
//! No physics is involved beyond sizing the apex from the vertical launch
//! velocity. This is the cheap model used for drawing many hits at once.

use nalgebra::Vector3;

use crate::constants::{
    APEX_HEIGHT_FACTOR, CONTACT_POINT_FT, DEFAULT_ARC_STEPS, DEFAULT_LAUNCH_ANGLE_DEG, G_ACCEL_FPS2,
    LANDING_HEIGHT_FT, MPH_TO_FPS,
};
use crate::error::FlightError;
use crate::hit_record::landing_offset;
use crate::types::{HitParameters, TrajectoryPoint};

/// Evaluate `P(t) = (1-t)²·start + 2(1-t)t·apex + t²·end`
pub fn bezier_point(start: &Vector3<f64>, apex: &Vector3<f64>, end: &Vector3<f64>, t: f64) -> Vector3<f64> {
    let u = 1.0 - t;
    start * (u * u) + apex * (2.0 * u * t) + end * (t * t)
}

/// Lazily evaluated points of a quadratic Bezier curve at `t = i / steps`
#[derive(Debug, Clone)]
pub struct BezierPoints {
    start: Vector3<f64>,
    apex: Vector3<f64>,
    end: Vector3<f64>,
    steps: usize,
    next: usize,
}

impl BezierPoints {
    pub fn new(start: Vector3<f64>, apex: Vector3<f64>, end: Vector3<f64>, steps: usize) -> Self {
        Self { start, apex, end, steps, next: 0 }
    }
}

impl Iterator for BezierPoints {
    type Item = TrajectoryPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.steps {
            return None;
        }
        let i = self.next;
        self.next += 1;

        // Zero steps degenerates to the start point alone
        if self.steps == 0 {
            return Some(TrajectoryPoint::from(self.start));
        }
        // Exact endpoints rather than trusting the polynomial at t = 1
        if i == self.steps {
            return Some(TrajectoryPoint::from(self.end));
        }

        let t = i as f64 / self.steps as f64;
        Some(TrajectoryPoint::from(bezier_point(&self.start, &self.apex, &self.end, t)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps + 1).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BezierPoints {}

/// Materialize `steps + 1` points of the curve, endpoints included
pub fn quadratic_bezier(
    start: Vector3<f64>,
    apex: Vector3<f64>,
    end: Vector3<f64>,
    steps: usize,
) -> Vec<TrajectoryPoint> {
    BezierPoints::new(start, apex, end, steps).collect()
}

/// Control points of the approximated arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcControl {
    pub start: Vector3<f64>,
    pub apex: Vector3<f64>,
    pub end: Vector3<f64>,
}

impl ArcControl {
    pub fn new(start: Vector3<f64>, apex: Vector3<f64>, end: Vector3<f64>) -> Self {
        Self { start, apex, end }
    }

    /// Derive control points from hit parameters.
    ///
    /// The landing spot comes from `landing_offset_ft` when present, otherwise
    /// from `hit_distance_ft` along the spray angle. Zero or non-finite launch
    /// angles are replaced with 45 degrees.
    pub fn from_hit(hit: &HitParameters) -> Result<Self, FlightError> {
        let start = Vector3::new(CONTACT_POINT_FT.0, CONTACT_POINT_FT.1, CONTACT_POINT_FT.2);

        let (landing_x, landing_z) = match (hit.landing_offset_ft, hit.hit_distance_ft) {
            (Some(offset), _) => offset,
            (None, Some(distance)) => landing_offset(distance, hit.spray_angle_deg),
            (None, None) => return Err(FlightError::MissingField("hit_distance")),
        };

        let max_height = apex_height(hit.exit_velocity_mph, hit.launch_angle_deg);

        let apex = Vector3::new(landing_x / 2.0, start.y + max_height, landing_z / 2.0);
        let end = Vector3::new(landing_x, LANDING_HEIGHT_FT, landing_z);

        Ok(Self { start, apex, end })
    }

    pub fn points(&self, steps: usize) -> Vec<TrajectoryPoint> {
        quadratic_bezier(self.start, self.apex, self.end, steps)
    }

    pub fn iter(&self, steps: usize) -> BezierPoints {
        BezierPoints::new(self.start, self.apex, self.end, steps)
    }

    pub fn default_points(&self) -> Vec<TrajectoryPoint> {
        self.points(DEFAULT_ARC_STEPS)
    }
}

fn effective_launch_angle_deg(launch_angle_deg: f64) -> f64 {
    if launch_angle_deg == 0.0 || !launch_angle_deg.is_finite() {
        DEFAULT_LAUNCH_ANGLE_DEG
    } else {
        launch_angle_deg
    }
}

/// Height of the apex control point above the contact point (ft)
///
/// Vacuum peak height `vy0² / 2g` scaled by the empirical apex factor.
pub fn apex_height(exit_velocity_mph: f64, launch_angle_deg: f64) -> f64 {
    let v0 = exit_velocity_mph * MPH_TO_FPS;
    let vy0 = v0 * effective_launch_angle_deg(launch_angle_deg).to_radians().sin();
    vy0 * vy0 / (2.0 * G_ACCEL_FPS2) * APEX_HEIGHT_FACTOR
}

/// Vacuum hang time estimate `2·vy0 / g` for a hit drawn as an arc
pub fn estimated_hang_time(hit: &HitParameters) -> f64 {
    let v0 = hit.exit_velocity_mph * MPH_TO_FPS;
    let vy0 = v0 * effective_launch_angle_deg(hit.launch_angle_deg).to_radians().sin();
    2.0 * vy0 / G_ACCEL_FPS2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_control() -> ArcControl {
        ArcControl::new(
            Vector3::new(0.0, 2.5, -0.5),
            Vector3::new(-40.0, 180.0, -170.0),
            Vector3::new(-80.0, 1.0, -340.0),
        )
    }

    #[test]
    fn test_endpoints_exact() {
        let arc = sample_control();
        let points = arc.points(50);
        assert_eq!(points.len(), 51);
        assert_eq!(points[0], TrajectoryPoint::from(arc.start));
        assert_eq!(points[50], TrajectoryPoint::from(arc.end));
    }

    #[test]
    fn test_midpoint_value() {
        let arc = sample_control();
        let mid = arc.points(2)[1];
        // 0.25 start + 0.5 apex + 0.25 end
        assert!((mid.x - (-40.0)).abs() < 1e-12);
        assert!((mid.y - (0.25 * 2.5 + 90.0 + 0.25)).abs() < 1e-12);
        assert!((mid.z - (-0.125 - 85.0 - 85.0)).abs() < 1e-12);
    }

    #[test]
    fn test_configurable_steps() {
        let arc = sample_control();
        for steps in [1usize, 7, 50, 200] {
            assert_eq!(arc.points(steps).len(), steps + 1);
            assert_eq!(arc.iter(steps).len(), steps + 1);
        }
        assert_eq!(arc.default_points().len(), DEFAULT_ARC_STEPS + 1);
    }

    #[test]
    fn test_zero_steps_yields_start() {
        let arc = sample_control();
        let points = arc.points(0);
        assert_eq!(points, vec![TrajectoryPoint::from(arc.start)]);
    }

    #[test]
    fn test_lazy_matches_materialized() {
        let arc = sample_control();
        let lazy: Vec<TrajectoryPoint> = arc.iter(30).collect();
        assert_eq!(lazy, arc.points(30));
    }

    #[test]
    fn test_from_hit_geometry() {
        let hit = HitParameters::new(100.0, 30.0, 0.0).with_distance(400.0);
        let arc = ArcControl::from_hit(&hit).unwrap();

        assert_eq!(arc.start, Vector3::new(0.0, 2.5, -0.5));
        assert!(arc.end.x.abs() < 1e-9);
        assert!((arc.end.z + 400.0).abs() < 1e-9);
        assert_eq!(arc.end.y, LANDING_HEIGHT_FT);
        assert!((arc.apex.z + 200.0).abs() < 1e-9);

        let vy0 = 100.0 * MPH_TO_FPS * 0.5;
        let expected = vy0 * vy0 / (2.0 * G_ACCEL_FPS2) * APEX_HEIGHT_FACTOR + 2.5;
        assert!((arc.apex.y - expected).abs() < 1e-9);
    }

    #[test]
    fn test_from_hit_prefers_landing_offset() {
        let hit = HitParameters::new(90.0, 20.0, 15.0)
            .with_distance(1000.0)
            .with_landing_offset(-50.0, -250.0);
        let arc = ArcControl::from_hit(&hit).unwrap();
        assert_eq!(arc.end, Vector3::new(-50.0, LANDING_HEIGHT_FT, -250.0));
        assert_eq!(arc.apex.x, -25.0);
    }

    #[test]
    fn test_from_hit_requires_distance() {
        let hit = HitParameters::new(90.0, 20.0, 0.0);
        assert_eq!(ArcControl::from_hit(&hit), Err(FlightError::MissingField("hit_distance")));
    }

    #[test]
    fn test_zero_launch_angle_uses_default() {
        assert_eq!(apex_height(95.0, 0.0), apex_height(95.0, DEFAULT_LAUNCH_ANGLE_DEG));
        let hit = HitParameters::new(95.0, 0.0, 0.0);
        let hang = estimated_hang_time(&hit);
        let expected = 2.0 * 95.0 * MPH_TO_FPS * 45f64.to_radians().sin() / G_ACCEL_FPS2;
        assert!((hang - expected).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let hit = HitParameters::new(103.0, 33.0, -18.0).with_distance(377.0);
        let a = ArcControl::from_hit(&hit).unwrap().default_points();
        let b = ArcControl::from_hit(&hit).unwrap().default_points();
        assert_eq!(a, b);
    }
}
