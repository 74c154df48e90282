//! Integrated flight model: gravity, aerodynamic drag and a simplified
//! vertical-only Magnus lift, stepped at a fixed time increment until the
//! ball comes back below the field.

use log::{debug, warn};
use nalgebra::Vector3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{
    AIR_DENSITY_SLUG_FT3, BALL_CROSS_SECTION_FT2, BALL_MASS_SLUG, DEFAULT_TIME_STEP, DRAG_COEFFICIENT,
    G_ACCEL_FPS2, LIFT_COEFFICIENT, MAX_INTEGRATION_STEPS, MIN_VELOCITY_THRESHOLD, MPH_TO_FPS,
    REFERENCE_SPIN_RPM, RELEASE_HEIGHT_FT,
};
use crate::error::FlightError;
use crate::types::{HitParameters, TrajectoryPoint};

/// Physical constants of the integrated model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConstants {
    pub gravity: f64,            // ft/s²
    pub air_density: f64,        // slug/ft³
    pub drag_coefficient: f64,
    pub lift_coefficient: f64,
    pub cross_section_area: f64, // ft²
    pub mass: f64,               // slug
    pub reference_spin_rpm: f64,
    pub release_height: f64,     // ft
    pub mph_to_fps: f64,
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            gravity: G_ACCEL_FPS2,
            air_density: AIR_DENSITY_SLUG_FT3,
            drag_coefficient: DRAG_COEFFICIENT,
            lift_coefficient: LIFT_COEFFICIENT,
            cross_section_area: BALL_CROSS_SECTION_FT2,
            mass: BALL_MASS_SLUG,
            reference_spin_rpm: REFERENCE_SPIN_RPM,
            release_height: RELEASE_HEIGHT_FT,
            mph_to_fps: MPH_TO_FPS,
        }
    }
}

impl PhysicsConstants {
    /// Constants with drag and lift switched off (vacuum flight)
    pub fn vacuum() -> Self {
        Self {
            drag_coefficient: 0.0,
            lift_coefficient: 0.0,
            ..Default::default()
        }
    }

    /// Reject values that make the integration non-physical or non-terminating
    pub fn validate(&self) -> Result<(), FlightError> {
        let positive = [
            ("gravity", self.gravity),
            ("mass", self.mass),
            ("reference_spin_rpm", self.reference_spin_rpm),
            ("mph_to_fps", self.mph_to_fps),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(FlightError::InvalidConstant { name, value });
            }
        }

        let non_negative = [
            ("air_density", self.air_density),
            ("drag_coefficient", self.drag_coefficient),
            ("lift_coefficient", self.lift_coefficient),
            ("cross_section_area", self.cross_section_area),
            ("release_height", self.release_height),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(FlightError::InvalidConstant { name, value });
            }
        }

        Ok(())
    }

    /// ½ρA/m, the factor shared by drag and lift accelerations
    fn aero_factor(&self) -> f64 {
        0.5 * self.air_density * self.cross_section_area / self.mass
    }
}

/// Integration scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Integrator {
    /// Explicit Euler: velocity first, then position with the new velocity
    #[default]
    Euler,
    /// Classical fourth-order Runge-Kutta with the same force model
    Rk4,
}

/// Per-hit quantities that stay fixed for the whole flight
#[derive(Debug, Clone, Copy)]
struct FlightForces {
    gravity: f64,
    drag_factor: f64,
    lift_factor: f64,
    /// cos(launch angle), the lift's vertical scaling
    lift_scale: f64,
}

impl FlightForces {
    fn new(constants: &PhysicsConstants, hit: &HitParameters) -> Self {
        let spin_factor = match hit.spin_rate_rpm {
            Some(rpm) if rpm != 0.0 => rpm / constants.reference_spin_rpm,
            _ => 1.0,
        };
        let aero = constants.aero_factor();
        Self {
            gravity: constants.gravity,
            drag_factor: aero * constants.drag_coefficient,
            lift_factor: aero * constants.lift_coefficient * spin_factor,
            lift_scale: hit.launch_angle_deg.to_radians().cos(),
        }
    }

    /// Acceleration for a given velocity.
    ///
    /// Drag opposes the velocity; lift acts only on the vertical axis. Below
    /// the velocity threshold both vanish and only gravity remains.
    fn acceleration(&self, velocity: &Vector3<f64>) -> Vector3<f64> {
        let v = velocity.norm();
        if v < MIN_VELOCITY_THRESHOLD {
            return Vector3::new(0.0, -self.gravity, 0.0);
        }

        let v_sq = v * v;
        let drag = -(self.drag_factor * v_sq) * (velocity / v);
        let lift_y = self.lift_factor * v_sq * self.lift_scale;

        Vector3::new(drag.x, -self.gravity + drag.y + lift_y, drag.z)
    }
}

/// Fixed-step flight simulator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightSimulator {
    constants: PhysicsConstants,
    integrator: Integrator,
    time_step: f64,
    max_steps: usize,
}

impl Default for FlightSimulator {
    fn default() -> Self {
        Self {
            constants: PhysicsConstants::default(),
            integrator: Integrator::Euler,
            time_step: DEFAULT_TIME_STEP,
            max_steps: MAX_INTEGRATION_STEPS,
        }
    }
}

impl FlightSimulator {
    pub fn new(constants: PhysicsConstants) -> Result<Self, FlightError> {
        constants.validate()?;
        Ok(Self {
            constants,
            ..Default::default()
        })
    }

    pub fn set_time_step(&mut self, step: f64) -> Result<(), FlightError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(FlightError::InvalidConstant { name: "time_step", value: step });
        }
        self.time_step = step;
        Ok(())
    }

    pub fn set_integrator(&mut self, integrator: Integrator) {
        self.integrator = integrator;
    }

    pub fn set_max_steps(&mut self, max_steps: usize) {
        self.max_steps = max_steps.max(1);
    }

    pub fn constants(&self) -> &PhysicsConstants {
        &self.constants
    }

    pub fn integrator(&self) -> Integrator {
        self.integrator
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Initial position and velocity for a hit.
    ///
    /// Positive spray turns the ball toward `-x`, the same side the arc
    /// model's landing offset uses.
    pub fn initial_state(&self, hit: &HitParameters) -> (Vector3<f64>, Vector3<f64>) {
        let v0 = hit.exit_velocity_mph * self.constants.mph_to_fps;
        let theta = hit.launch_angle_deg.to_radians();
        let phi = hit.spray_angle_deg.to_radians();

        let velocity = Vector3::new(
            -v0 * theta.cos() * phi.sin(),
            v0 * theta.sin(),
            -v0 * theta.cos() * phi.cos(),
        );
        let position = Vector3::new(0.0, self.constants.release_height, 0.0);
        (position, velocity)
    }

    /// Simulate one hit from release until the first sample below the field.
    ///
    /// Every returned point has `y >= 0` except the last, which is the first
    /// post-step position below ground, kept as is without clamping.
    pub fn simulate(&self, hit: &HitParameters) -> Vec<TrajectoryPoint> {
        let forces = FlightForces::new(&self.constants, hit);
        let (mut position, mut velocity) = self.initial_state(hit);
        let dt = self.time_step;

        let mut points = Vec::with_capacity(self.estimate_capacity(&velocity));
        let mut steps = 0usize;

        while position.y >= 0.0 {
            points.push(TrajectoryPoint::from(&position));

            if velocity.norm() < MIN_VELOCITY_THRESHOLD {
                // Drag and lift have no direction at rest
                debug!("zero speed at step {}, stopping", steps);
                return points;
            }
            if steps >= self.max_steps {
                warn!(
                    "integration ceiling of {} steps reached at y = {:.3} ft, stopping",
                    self.max_steps, position.y
                );
                return points;
            }

            match self.integrator {
                Integrator::Euler => euler_step(&forces, &mut position, &mut velocity, dt),
                Integrator::Rk4 => rk4_step(&forces, &mut position, &mut velocity, dt),
            }
            steps += 1;
        }

        // First sample below ground
        points.push(TrajectoryPoint::from(&position));

        debug!(
            "simulated {:.1} mph at {:.1} deg: {} steps, landed at ({:.1}, {:.1})",
            hit.exit_velocity_mph, hit.launch_angle_deg, steps, position.x, position.z
        );
        points
    }

    /// Simulate many hits in parallel, preserving input order
    pub fn simulate_batch(&self, hits: &[HitParameters]) -> Vec<Vec<TrajectoryPoint>> {
        hits.par_iter().map(|hit| self.simulate(hit)).collect()
    }

    // Vacuum hang time is a good upper bound for the sample count. The
    // preallocation never exceeds the default ceiling; longer runs grow the Vec.
    fn estimate_capacity(&self, velocity: &Vector3<f64>) -> usize {
        let vy = velocity.y.max(0.0);
        let g = self.constants.gravity;
        let h = self.constants.release_height;
        let hang_time = (vy + (vy * vy + 2.0 * g * h).sqrt()) / g;
        let steps = (hang_time / self.time_step).ceil();
        if !steps.is_finite() {
            return 0;
        }
        let limit = self.max_steps.min(MAX_INTEGRATION_STEPS).saturating_add(2);
        (steps.min(limit as f64) as usize).saturating_add(2).min(limit)
    }
}

fn euler_step(forces: &FlightForces, position: &mut Vector3<f64>, velocity: &mut Vector3<f64>, dt: f64) {
    let accel = forces.acceleration(velocity);
    *velocity += accel * dt;
    *position += *velocity * dt;
}

fn rk4_step(forces: &FlightForces, position: &mut Vector3<f64>, velocity: &mut Vector3<f64>, dt: f64) {
    let v1 = *velocity;
    let a1 = forces.acceleration(&v1);

    let v2 = v1 + a1 * (0.5 * dt);
    let a2 = forces.acceleration(&v2);

    let v3 = v1 + a2 * (0.5 * dt);
    let a3 = forces.acceleration(&v3);

    let v4 = v1 + a3 * dt;
    let a4 = forces.acceleration(&v4);

    *position += (v1 + v2 * 2.0 + v3 * 2.0 + v4) * (dt / 6.0);
    *velocity += (a1 + a2 * 2.0 + a3 * 2.0 + a4) * (dt / 6.0);
}
