//! Choice of flight model behind a single "hit in, points out" contract.

use log::debug;

use crate::bezier_arc::{estimated_hang_time, ArcControl};
use crate::constants::DEFAULT_ARC_STEPS;
use crate::error::FlightError;
use crate::flight_simulator::FlightSimulator;
use crate::summary::FlightSummary;
use crate::types::{HitParameters, TrajectoryPoint};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrajectoryModel {
    /// Quadratic Bezier arc with `steps` segments
    Arc { steps: usize },
    /// Drag and lift integration
    Physics(FlightSimulator),
}

impl Default for TrajectoryModel {
    fn default() -> Self {
        TrajectoryModel::Physics(FlightSimulator::default())
    }
}

impl TrajectoryModel {
    pub fn arc() -> Self {
        TrajectoryModel::Arc { steps: DEFAULT_ARC_STEPS }
    }

    pub fn physics() -> Self {
        TrajectoryModel::default()
    }

    pub fn name(&self) -> &'static str {
        match self {
            TrajectoryModel::Arc { .. } => "arc",
            TrajectoryModel::Physics(_) => "physics",
        }
    }

    pub fn trajectory(&self, hit: &HitParameters) -> Result<Vec<TrajectoryPoint>, FlightError> {
        let points = match self {
            TrajectoryModel::Arc { steps } => ArcControl::from_hit(hit)?.points(*steps),
            TrajectoryModel::Physics(sim) => sim.simulate(hit),
        };
        debug!("{} model produced {} points", self.name(), points.len());
        Ok(points)
    }

    /// Trajectory plus its summary. Arc points carry no timing, so the arc's
    /// hang time is the vacuum estimate spread evenly over its samples.
    pub fn trajectory_with_summary(
        &self,
        hit: &HitParameters,
    ) -> Result<(Vec<TrajectoryPoint>, FlightSummary), FlightError> {
        let points = self.trajectory(hit)?;
        let time_step = match self {
            TrajectoryModel::Arc { steps } => estimated_hang_time(hit) / (*steps).max(1) as f64,
            TrajectoryModel::Physics(sim) => sim.time_step(),
        };
        let summary = FlightSummary::from_points(&points, time_step)
            .ok_or_else(|| FlightError::InvalidInput("empty trajectory".to_string()))?;
        Ok((points, summary))
    }
}
