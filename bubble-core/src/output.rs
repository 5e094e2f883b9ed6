//! Output types for the host page.
//!
//! These structs are serialized to JSON and handed to the renderer, which draws
//! one styled circle per entry around the center of its drawing area.

use serde::Serialize;

use crate::error::LayoutError;
use crate::layout::LayoutResult;

/// Error information shown by the host instead of the bubble view
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

impl From<&LayoutError> for ErrorInfo {
    fn from(e: &LayoutError) -> Self {
        ErrorInfo { message: e.to_string() }
    }
}

/// The combined output sent to the host
#[derive(Debug, Clone, Serialize)]
pub struct BubbleOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub circles: Vec<LayoutResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl BubbleOutput {
    pub fn ok(circles: Vec<LayoutResult>) -> Self {
        BubbleOutput { circles, error: None }
    }

    pub fn failed(e: &LayoutError) -> Self {
        BubbleOutput { circles: vec![], error: Some(e.into()) }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| "{\"error\": {\"message\": \"Serialization error\"}}".to_string())
    }
}
