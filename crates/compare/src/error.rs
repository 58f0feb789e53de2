use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("malformed options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be a finite, non-negative pixel size (got {value})")]
    InvalidSize { field: &'static str, value: f64 },
}
