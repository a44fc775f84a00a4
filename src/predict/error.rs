use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Propagation error: {0}")]
    Propagation(String),
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

impl From<sgp4::Error> for PredictError {
    fn from(err: sgp4::Error) -> Self {
        PredictError::Propagation(err.to_string())
    }
}
