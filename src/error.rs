use thiserror::Error;

/// Errors raised at the validated boundaries of the estimator
#[derive(Debug, Error)]
pub enum BangThumpError {
    #[error("invalid {field} = {value}: {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("could not parse {field} from {input:?}")]
    Parse { field: String, input: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BangThumpError>;

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BangThumpError::InvalidInput {
            field,
            value,
            reason: "must be a finite number",
        })
    }
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(BangThumpError::InvalidInput {
            field,
            value,
            reason: "must be greater than zero",
        })
    }
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(BangThumpError::InvalidInput {
            field,
            value,
            reason: "must not be negative",
        })
    }
}
