use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::predict::PredictError;
use crate::tracker::TrackerError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Predict(#[from] PredictError),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
