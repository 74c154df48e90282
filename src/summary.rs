// Flight summary derived from a finished trajectory
use serde::Serialize;

use crate::types::TrajectoryPoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightSummary {
    pub hang_time_s: f64,
    pub max_height_ft: f64,
    /// Ground-plane distance from home plate to the landing point
    pub carry_distance_ft: f64,
    pub landing: TrajectoryPoint,
    pub point_count: usize,
}

impl FlightSummary {
    /// Summarize points sampled every `time_step` seconds.
    ///
    /// Returns `None` for an empty trajectory.
    pub fn from_points(points: &[TrajectoryPoint], time_step: f64) -> Option<Self> {
        let landing = *points.last()?;
        let max_height_ft = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            hang_time_s: (points.len() - 1) as f64 * time_step,
            max_height_ft,
            carry_distance_ft: landing.horizontal_distance(),
            landing,
            point_count: points.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_trajectory() {
        assert!(FlightSummary::from_points(&[], 0.01).is_none());
    }

    #[test]
    fn test_summary_values() {
        let points = vec![
            TrajectoryPoint::new(0.0, 3.0, 0.0),
            TrajectoryPoint::new(1.0, 20.0, -10.0),
            TrajectoryPoint::new(2.0, 12.0, -20.0),
            TrajectoryPoint::new(3.0, -0.4, -40.0),
        ];
        let summary = FlightSummary::from_points(&points, 0.5).unwrap();

        assert_eq!(summary.point_count, 4);
        assert!((summary.hang_time_s - 1.5).abs() < 1e-12);
        assert_eq!(summary.max_height_ft, 20.0);
        assert_eq!(summary.landing, points[3]);
        assert!((summary.carry_distance_ft - (9.0f64 + 1600.0).sqrt()).abs() < 1e-12);
    }
}
