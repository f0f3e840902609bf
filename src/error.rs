use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("invalid config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("region bounds have zero or negative size ({width}x{height})")]
    DegenerateRegion { width: f64, height: f64 },

    #[error("preset {0} does not drive a pointer-relative transform")]
    NotPointerRelative(&'static str),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("unknown palette color: {0}")]
    UnknownColor(String),

    #[error("invalid thumbnail dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MotionError>;

impl MotionError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        MotionError::InvalidConfig {
            field,
            value,
            reason,
        }
    }
}
