//! # Batted Ball Flight
//!
//! Turns a batted ball's launch conditions into an ordered list of 3D points
//! for a renderer. Two models are available: a quadratic Bezier arc for cheap
//! drawing and a fixed-step integration with drag and Magnus lift.

// Re-export the main types and functions
pub use bezier_arc::{quadratic_bezier, ArcControl, BezierPoints};
pub use error::FlightError;
pub use flight_simulator::{FlightSimulator, Integrator, PhysicsConstants};
pub use hit_record::{load_hit_records, parse_hit_records, spray_angle_from_coordinates, HitRecord};
pub use summary::FlightSummary;
pub use trajectory_model::TrajectoryModel;
pub use types::{HitParameters, TrajectoryPoint};

// Module declarations
pub mod bezier_arc;
pub mod constants;
mod error;
pub mod flight_simulator;
pub mod hit_record;
mod summary;
mod trajectory_model;
mod types;

#[cfg(feature = "wasm")]
pub mod wasm;
