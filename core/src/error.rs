use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Automation multiplier {value} does not match any automation level")]
    UnknownAutomationLevel { value: f64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type CalcResult<T> = Result<T, CalcError>;
