//! Raw hit records and the derivation of launch parameters from them.
//!
//! Records carry the field names of the pitch-tracking feed (`launch_speed`,
//! `hit_distance_sc`, `hc_x`, ...). Hit coordinates are image-space positions
//! on the feed's field diagram with home plate at
//! (`HOME_PLATE_HC_X`, `HOME_PLATE_HC_Y`) and `hc_y` growing toward the
//! catcher.

use std::io::Read;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LAUNCH_ANGLE_DEG, HOME_PLATE_HC_X, HOME_PLATE_HC_Y, SPRAY_CORRECTION};
use crate::error::FlightError;
use crate::types::HitParameters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitRecord {
    /// Exit velocity (mph)
    pub launch_speed: f64,
    /// Degrees; absent or zero falls back to 45
    #[serde(default)]
    pub launch_angle: Option<f64>,
    /// Feet
    #[serde(default)]
    pub hit_distance_sc: Option<f64>,
    #[serde(default)]
    pub hc_x: Option<f64>,
    #[serde(default)]
    pub hc_y: Option<f64>,
    /// rpm
    #[serde(default)]
    pub spin_rate: Option<f64>,
}

/// Spray angle in degrees from raw hit coordinates.
///
/// Pulled-to-left hits (small `hc_x`) come out positive.
pub fn spray_angle_from_coordinates(hc_x: f64, hc_y: f64) -> f64 {
    let dx = hc_x - HOME_PLATE_HC_X;
    let dy = HOME_PLATE_HC_Y - hc_y;
    -dx.atan2(dy).to_degrees() * SPRAY_CORRECTION
}

/// Landing position (x, z) for a ball carrying `distance_ft` along `spray_deg`.
pub fn landing_offset(distance_ft: f64, spray_deg: f64) -> (f64, f64) {
    let spray = spray_deg.to_radians();
    let x = -distance_ft * spray.sin();
    let z = -distance_ft * spray.cos();
    (x, z)
}

impl HitRecord {
    pub fn to_parameters(&self) -> Result<HitParameters, FlightError> {
        if !self.launch_speed.is_finite() || self.launch_speed < 0.0 {
            return Err(FlightError::InvalidInput(format!(
                "launch_speed must be a non-negative number, got {}",
                self.launch_speed
            )));
        }

        let hc_x = self.hc_x.ok_or(FlightError::MissingField("hc_x"))?;
        let hc_y = self.hc_y.ok_or(FlightError::MissingField("hc_y"))?;
        let spray_deg = spray_angle_from_coordinates(hc_x, hc_y);

        let launch_angle_deg = match self.launch_angle {
            Some(angle) if angle != 0.0 && angle.is_finite() => angle,
            _ => DEFAULT_LAUNCH_ANGLE_DEG,
        };

        let landing_offset_ft = self
            .hit_distance_sc
            .filter(|d| d.is_finite())
            .map(|d| landing_offset(d, spray_deg));

        Ok(HitParameters {
            exit_velocity_mph: self.launch_speed,
            launch_angle_deg,
            spray_angle_deg: spray_deg,
            spin_rate_rpm: self.spin_rate,
            hit_distance_ft: self.hit_distance_sc,
            landing_offset_ft,
        })
    }
}

/// Parse a JSON array of hit records
pub fn parse_hit_records(json: &str) -> Result<Vec<HitRecord>, FlightError> {
    let records: Vec<HitRecord> = serde_json::from_str(json)?;
    debug!("parsed {} hit records", records.len());
    Ok(records)
}

/// Read a JSON array of hit records from any reader
pub fn load_hit_records<R: Read>(reader: R) -> Result<Vec<HitRecord>, FlightError> {
    let records: Vec<HitRecord> = serde_json::from_reader(reader)?;
    debug!("loaded {} hit records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hc_x: f64, hc_y: f64) -> HitRecord {
        HitRecord {
            launch_speed: 104.2,
            launch_angle: Some(27.0),
            hit_distance_sc: Some(410.0),
            hc_x: Some(hc_x),
            hc_y: Some(hc_y),
            spin_rate: Some(2350.0),
        }
    }

    #[test]
    fn test_spray_straightaway() {
        let spray = spray_angle_from_coordinates(HOME_PLATE_HC_X, 50.0);
        assert!(spray.abs() < 1e-12);
    }

    #[test]
    fn test_spray_sign_and_correction() {
        // 45 degrees toward the third-base side before correction
        let left = spray_angle_from_coordinates(HOME_PLATE_HC_X - 100.0, HOME_PLATE_HC_Y - 100.0);
        assert!((left - 45.0 * SPRAY_CORRECTION).abs() < 1e-9);

        let right = spray_angle_from_coordinates(HOME_PLATE_HC_X + 100.0, HOME_PLATE_HC_Y - 100.0);
        assert!((right + 45.0 * SPRAY_CORRECTION).abs() < 1e-9);
    }

    #[test]
    fn test_landing_offset_orientation() {
        let (x, z) = landing_offset(400.0, 0.0);
        assert!(x.abs() < 1e-12);
        assert!((z + 400.0).abs() < 1e-12);

        let (x, z) = landing_offset(300.0, 30.0);
        assert!((x + 150.0).abs() < 1e-9);
        assert!((z + 300.0 * 30f64.to_radians().cos()).abs() < 1e-9);
    }

    #[test]
    fn test_to_parameters() {
        let hit = record(100.0, 90.0).to_parameters().unwrap();
        assert_eq!(hit.exit_velocity_mph, 104.2);
        assert_eq!(hit.launch_angle_deg, 27.0);
        assert!(hit.spray_angle_deg > 0.0);
        assert_eq!(hit.spin_rate_rpm, Some(2350.0));

        let (x, z) = hit.landing_offset_ft.unwrap();
        assert!(((x * x + z * z).sqrt() - 410.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_launch_angle() {
        let mut raw = record(125.0, 80.0);
        raw.launch_angle = None;
        assert_eq!(raw.to_parameters().unwrap().launch_angle_deg, DEFAULT_LAUNCH_ANGLE_DEG);

        raw.launch_angle = Some(0.0);
        assert_eq!(raw.to_parameters().unwrap().launch_angle_deg, DEFAULT_LAUNCH_ANGLE_DEG);
    }

    #[test]
    fn test_missing_coordinates() {
        let mut raw = record(125.0, 80.0);
        raw.hc_y = None;
        assert_eq!(raw.to_parameters(), Err(FlightError::MissingField("hc_y")));
    }

    #[test]
    fn test_missing_distance_has_no_landing() {
        let mut raw = record(125.0, 80.0);
        raw.hit_distance_sc = None;
        let hit = raw.to_parameters().unwrap();
        assert!(hit.landing_offset_ft.is_none());
    }

    #[test]
    fn test_parse_records_ignores_extra_fields() {
        let json = r#"[
            {"launch_speed": 101.3, "launch_angle": 31, "hit_distance_sc": 402,
             "hc_x": 80.1, "hc_y": 60.2, "events": "home_run", "pitcher_name": "X"},
            {"launch_speed": 67.0, "hc_x": 140.0, "hc_y": 150.0}
        ]"#;
        let records = parse_hit_records(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].hit_distance_sc, Some(402.0));
        assert!(records[1].launch_angle.is_none());

        let loaded = load_hit_records(json.as_bytes()).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_negative_speed_rejected() {
        let mut raw = record(125.0, 80.0);
        raw.launch_speed = -5.0;
        assert!(matches!(raw.to_parameters(), Err(FlightError::InvalidInput(_))));
    }
}
