/// Physical constants and calibration values used in batted-ball calculations.
///
/// All quantities are imperial: feet, seconds, slugs.

/// Gravitational acceleration in ft/s²
pub const G_ACCEL_FPS2: f64 = 32.174;

/// Conversion factor: miles per hour to feet per second
pub const MPH_TO_FPS: f64 = 1.467;

/// Sea-level air density (slug/ft³)
pub const AIR_DENSITY_SLUG_FT3: f64 = 0.002376;

/// Drag coefficient of a baseball in flight
pub const DRAG_COEFFICIENT: f64 = 0.35;

/// Lift coefficient used for the simplified Magnus force
///
/// Real lift varies with spin parameter; the model scales this single value
/// by `spin_rate / REFERENCE_SPIN_RPM` instead.
pub const LIFT_COEFFICIENT: f64 = 0.2;

/// Cross-sectional area of the ball (ft²), 2.9 in diameter
pub const BALL_CROSS_SECTION_FT2: f64 = 0.00426;

/// Ball mass in slugs
pub const BALL_MASS_SLUG: f64 = 0.32;

/// Spin rate (rpm) at which the lift scaling factor equals one
pub const REFERENCE_SPIN_RPM: f64 = 2200.0;

/// Height of the ball at release for the integrated model (ft)
pub const RELEASE_HEIGHT_FT: f64 = 3.0;

/// Fixed integration time step (s)
pub const DEFAULT_TIME_STEP: f64 = 0.01;

/// Hard ceiling on integration steps
///
/// 100 000 steps at 0.01 s is 1000 s of flight, far beyond any batted ball.
/// Only reached with misconfigured constants.
pub const MAX_INTEGRATION_STEPS: usize = 100_000;

/// Minimum threshold for velocity magnitude to avoid division by zero
pub const MIN_VELOCITY_THRESHOLD: f64 = 1e-9;

// Arc approximation

/// Number of Bezier segments used when none is requested
pub const DEFAULT_ARC_STEPS: usize = 50;

/// Bat contact point (x, y, z) used as the arc start
pub const CONTACT_POINT_FT: (f64, f64, f64) = (0.0, 2.5, -0.5);

/// Height of the arc end point above the field (ft)
pub const LANDING_HEIGHT_FT: f64 = 1.0;

/// Launch angle substituted when the recorded value is absent or zero
pub const DEFAULT_LAUNCH_ANGLE_DEG: f64 = 45.0;

/// Empirical correction applied to the spray angle derived from hit
/// coordinates so landing spots line up with stadium models.
pub const SPRAY_CORRECTION: f64 = 0.95;

/// Empirical multiplier on the kinematic apex height.
///
/// A quadratic Bezier only reaches half of its control point's height, so the
/// apex control point has to sit well above the true peak.
pub const APEX_HEIGHT_FACTOR: f64 = 2.005;

/// Home plate position in the hit-coordinate image space (hc_x, hc_y)
pub const HOME_PLATE_HC_X: f64 = 125.42;
pub const HOME_PLATE_HC_Y: f64 = 198.27;
