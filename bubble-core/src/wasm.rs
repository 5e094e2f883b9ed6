//! WASM bindings for the bubble-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.

use wasm_bindgen::prelude::*;

use crate::layout::{BubbleMode, LayoutConfig};
use crate::output::BubbleOutput;
use crate::request::run_request;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

/// Lay out the bubble cluster for a JSON request and return the circles as JSON.
#[wasm_bindgen]
pub fn compute_bubble_layout(input: &str) -> String {
    let output = match run_request(input) {
        Ok(circles) => BubbleOutput::ok(circles),
        Err(e) => {
            console_error(&format!("Error computing bubble layout: {}", e));
            BubbleOutput::failed(&e)
        }
    };
    output.to_json()
}

/// Get the layout parameters of a preset ("cluster" or "separated") as JSON.
/// Returns "{}" for an unknown mode.
#[wasm_bindgen]
pub fn layout_preset(mode: &str) -> String {
    match preset_json(mode) {
        Ok(json) => json,
        Err(e) => {
            console_error(&format!("Unknown bubble mode '{}': {}", mode, e));
            "{}".to_string()
        }
    }
}

fn preset_json(mode: &str) -> serde_json::Result<String> {
    let mode: BubbleMode = serde_json::from_value(serde_json::Value::String(mode.to_string()))?;
    serde_json::to_string(&LayoutConfig::for_mode(mode))
}
