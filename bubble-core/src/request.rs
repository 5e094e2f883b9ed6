//! Layout requests as sent by the host page.
//!
//! A request names a preset mode and may override single parameters of it.
//! Validation happens here so the layout pipeline itself never has to fail.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{LayoutError, Result};
use crate::layout::{layout_bubbles, BubbleMode, LayoutConfig, LayoutResult, SizeF, WeightedItem};

/// Largest accepted pixel quantity (radius, padding, margin, viewport side).
pub const MAX_PIXELS: f64 = 100_000.0;

/// Largest accepted fit scale.
pub const MAX_SCALE: f64 = 1_000.0;

/// Per-request tweaks applied on top of the mode preset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub min_radius: Option<f64>,
    pub max_radius: Option<f64>,
    pub padding: Option<f64>,
    pub margin: Option<f64>,
    pub max_scale: Option<f64>,
    pub safety_factor: Option<f64>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut cfg: LayoutConfig) -> LayoutConfig {
        if let Some(v) = self.min_radius { cfg.min_radius = v; }
        if let Some(v) = self.max_radius { cfg.max_radius = v; }
        if let Some(v) = self.padding { cfg.padding = v; }
        if let Some(v) = self.margin { cfg.margin = v; }
        if let Some(v) = self.max_scale { cfg.max_scale = v; }
        if let Some(v) = self.safety_factor { cfg.safety_factor = v; }
        cfg
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutRequest {
    pub items: Vec<WeightedItem>,
    pub viewport: SizeF,
    #[serde(default)]
    pub mode: BubbleMode,
    #[serde(default)]
    pub overrides: ConfigOverrides,
}

impl LayoutRequest {
    pub fn parse(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// The preset for `mode` with overrides applied.
    pub fn config(&self) -> LayoutConfig {
        self.overrides.apply(LayoutConfig::for_mode(self.mode))
    }

    pub fn validate(&self, cfg: &LayoutConfig) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for item in &self.items {
            if !item.value.is_finite() || item.value < 0.0 {
                return Err(LayoutError::InvalidValue { id: item.id.clone(), value: item.value });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(LayoutError::DuplicateId { id: item.id.clone() });
            }
        }

        let SizeF { width, height } = self.viewport;
        if !(in_pixel_range(width) && in_pixel_range(height) && width > 0.0 && height > 0.0) {
            return Err(LayoutError::InvalidViewport { width, height });
        }

        validate_config(cfg)
    }

    pub fn run(&self) -> Result<Vec<LayoutResult>> {
        let cfg = self.config();
        self.validate(&cfg)?;
        Ok(layout_bubbles(&self.items, self.viewport, &cfg))
    }
}

pub fn validate_config(cfg: &LayoutConfig) -> Result<()> {
    let (min, max) = (cfg.min_radius, cfg.max_radius);
    if !(in_pixel_range(min) && in_pixel_range(max) && min > 0.0 && min <= max) {
        return Err(LayoutError::InvalidRadiusBand { min, max });
    }
    if !in_pixel_range(cfg.padding) {
        return Err(LayoutError::InvalidParameter { name: "padding", value: cfg.padding });
    }
    if !(in_pixel_range(cfg.margin) && cfg.margin >= 0.0) {
        return Err(LayoutError::InvalidParameter { name: "margin", value: cfg.margin });
    }
    if !(cfg.max_scale.is_finite() && cfg.max_scale > 0.0 && cfg.max_scale <= MAX_SCALE) {
        return Err(LayoutError::InvalidParameter { name: "max_scale", value: cfg.max_scale });
    }
    if !(cfg.safety_factor.is_finite() && cfg.safety_factor > 0.0) {
        return Err(LayoutError::InvalidParameter { name: "safety_factor", value: cfg.safety_factor });
    }
    Ok(())
}

fn in_pixel_range(v: f64) -> bool {
    v.is_finite() && v.abs() <= MAX_PIXELS
}

/// Parse, validate and lay out a JSON request.
pub fn run_request(input: &str) -> Result<Vec<LayoutResult>> {
    LayoutRequest::parse(input)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_request_uses_cluster_preset() {
        let req = LayoutRequest::parse(r#"{"items": [], "viewport": {"width": 300, "height": 200}}"#).unwrap();
        assert_eq!(req.mode, BubbleMode::Cluster);
        assert_eq!(req.config(), LayoutConfig::cluster());
        assert!(req.run().unwrap().is_empty());
    }

    #[test]
    fn test_overrides_apply_on_top_of_mode() {
        let req = LayoutRequest::parse(
            r#"{
                "items": [{"id": "food", "value": 10}],
                "viewport": {"width": 300, "height": 200},
                "mode": "separated",
                "overrides": {"padding": 12.5, "margin": 4}
            }"#,
        )
        .unwrap();

        let cfg = req.config();
        assert_eq!(cfg.padding, 12.5);
        assert_eq!(cfg.margin, 4.0);
        assert_eq!(cfg.min_radius, LayoutConfig::separated().min_radius);
        assert_eq!(cfg.max_radius, LayoutConfig::separated().max_radius);
    }

    #[test]
    fn test_run_request_single_item() {
        let out = run_request(
            r#"{"items": [{"id": "food", "value": 100}], "viewport": {"width": 300, "height": 300}}"#,
        )
        .unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "food");
        assert!((out[0].r - 66.5).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(run_request("{not json"), Err(LayoutError::Json(_))));
        assert!(matches!(run_request(r#"{"items": []}"#), Err(LayoutError::Json(_))));
        assert!(matches!(run_request(r#"{"items": [], "viewport": {"width": 1, "height": 1}, "mode": "spiral"}"#), Err(LayoutError::Json(_))));
    }

    #[test]
    fn test_negative_value_rejected() {
        let err = run_request(
            r#"{"items": [{"id": "refund", "value": -3}], "viewport": {"width": 300, "height": 300}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidValue { ref id, .. } if id == "refund"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = run_request(
            r#"{"items": [{"id": "a", "value": 1}, {"id": "a", "value": 2}], "viewport": {"width": 300, "height": 300}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateId { ref id } if id == "a"));
    }

    #[test]
    fn test_bad_viewport_rejected() {
        let err = run_request(r#"{"items": [], "viewport": {"width": 0, "height": 300}}"#).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidViewport { .. }));
    }

    #[test]
    fn test_bad_radius_band_rejected() {
        let err = run_request(
            r#"{"items": [], "viewport": {"width": 300, "height": 300}, "overrides": {"min_radius": 80, "max_radius": 60}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidRadiusBand { .. }));

        let err = run_request(
            r#"{"items": [], "viewport": {"width": 300, "height": 300}, "overrides": {"min_radius": 0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidRadiusBand { .. }));
    }

    #[test]
    fn test_bad_parameters_rejected() {
        let cases = [
            (r#"{"margin": -1}"#, "margin"),
            (r#"{"max_scale": 0}"#, "max_scale"),
            (r#"{"safety_factor": -0.5}"#, "safety_factor"),
        ];
        for (overrides, expected) in cases {
            let input = format!(
                r#"{{"items": [], "viewport": {{"width": 300, "height": 300}}, "overrides": {}}}"#,
                overrides
            );
            match run_request(&input) {
                Err(LayoutError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected InvalidParameter({}), got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_negative_padding_is_allowed() {
        let cfg = LayoutConfig { padding: -20.0, ..LayoutConfig::cluster() };
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_huge_parameters_rejected() {
        let base = r#""items": [{"id": "a", "value": 1}, {"id": "b", "value": 2}], "viewport": {"width": 300, "height": 300}"#;

        let cases = [
            (r#"{"padding": 1e308}"#, "padding"),
            (r#"{"padding": -1e308}"#, "padding"),
            (r#"{"margin": 1e300}"#, "margin"),
            (r#"{"max_scale": 1e300}"#, "max_scale"),
        ];
        for (overrides, expected) in cases {
            let input = format!(r#"{{{}, "overrides": {}}}"#, base, overrides);
            match run_request(&input) {
                Err(LayoutError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected InvalidParameter({}), got {:?}", expected, other),
            }
        }

        let input = format!(r#"{{{}, "overrides": {{"max_radius": 9e307}}}}"#, base);
        assert!(matches!(run_request(&input), Err(LayoutError::InvalidRadiusBand { .. })));

        let err = run_request(r#"{"items": [], "viewport": {"width": 1e308, "height": 300}}"#).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidViewport { .. }));
    }

    #[test]
    fn test_largest_accepted_parameters_still_lay_out() {
        let input = format!(
            r#"{{"items": [{{"id": "a", "value": 1}}, {{"id": "b", "value": 2}}], "viewport": {{"width": {max}, "height": {max}}}, "mode": "separated", "overrides": {{"max_radius": {max}, "padding": {max}}}}}"#,
            max = MAX_PIXELS
        );
        let out = run_request(&input).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|c| c.x.is_finite() && c.y.is_finite() && c.r.is_finite()));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = run_request(
            r#"{"items": [], "viewport": {"width": 300, "height": 300}, "overrides": {"minRadius": 10}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::Json(_)));

        let err = run_request(r#"{"items": [], "viewport": {"width": 300, "height": 300}, "layout": "grid"}"#).unwrap_err();
        assert!(matches!(err, LayoutError::Json(_)));
    }
}
