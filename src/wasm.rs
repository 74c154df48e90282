// WASM bindings so a browser renderer can request trajectories as JSON
use wasm_bindgen::prelude::*;

use crate::hit_record::parse_hit_records;
use crate::{FlightError, HitParameters, TrajectoryModel};

fn to_js(err: FlightError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn model_from_str(name: &str, steps: usize) -> Result<TrajectoryModel, FlightError> {
    match name.to_lowercase().as_str() {
        "arc" | "bezier" => Ok(TrajectoryModel::Arc { steps }),
        "physics" | "simulated" => Ok(TrajectoryModel::physics()),
        other => Err(FlightError::InvalidInput(format!("unknown model '{}'", other))),
    }
}

#[wasm_bindgen]
pub struct WasmFlight {
    arc_steps: usize,
}

#[wasm_bindgen]
impl WasmFlight {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        WasmFlight { arc_steps: crate::constants::DEFAULT_ARC_STEPS }
    }

    #[wasm_bindgen(js_name = setArcSteps)]
    pub fn set_arc_steps(&mut self, steps: usize) {
        self.arc_steps = steps;
    }

    /// Points for one `HitParameters` JSON object, as a JSON array of {x, y, z}
    #[wasm_bindgen(js_name = trajectory)]
    pub fn trajectory(&self, hit_json: &str, model: &str) -> Result<String, JsValue> {
        let hit: HitParameters = serde_json::from_str(hit_json).map_err(|e| to_js(e.into()))?;
        let model = model_from_str(model, self.arc_steps).map_err(to_js)?;
        let points = model.trajectory(&hit).map_err(to_js)?;
        serde_json::to_string(&points).map_err(|e| to_js(e.into()))
    }

    /// Trajectories for a JSON array of raw hit records. Records that cannot
    /// be converted produce an empty list so indices stay aligned.
    #[wasm_bindgen(js_name = trajectoriesFromRecords)]
    pub fn trajectories_from_records(&self, records_json: &str, model: &str) -> Result<String, JsValue> {
        let records = parse_hit_records(records_json).map_err(to_js)?;
        let model = model_from_str(model, self.arc_steps).map_err(to_js)?;

        let paths: Vec<Vec<crate::TrajectoryPoint>> = records
            .iter()
            .map(|record| {
                record
                    .to_parameters()
                    .and_then(|hit| model.trajectory(&hit))
                    .unwrap_or_else(|e| {
                        log::warn!("skipping hit record: {}", e);
                        Vec::new()
                    })
            })
            .collect();

        serde_json::to_string(&paths).map_err(|e| to_js(e.into()))
    }
}

impl Default for WasmFlight {
    fn default() -> Self {
        Self::new()
    }
}
