#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid layout request: {0}")]
    Json(#[from] serde_json::Error),
    #[error("item '{id}' has invalid value {value}: weights must be finite and non-negative")]
    InvalidValue { id: String, value: f64 },
    #[error("duplicate item id '{id}'")]
    DuplicateId { id: String },
    #[error("invalid radius band [{min}, {max}]: expected 0 < min <= max")]
    InvalidRadiusBand { min: f64, max: f64 },
    #[error("invalid viewport {width}x{height}: both sides must be positive")]
    InvalidViewport { width: f64, height: f64 },
    #[error("invalid parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
