use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("TLE data unavailable: {0}")]
    DataUnavailable(String),
    #[error("Invalid TLE data in {file}: {message}")]
    Parse { file: String, message: String },
    #[error("Invalid selection {input:?}: expected an index in 0..{count}")]
    InvalidSelection { input: String, count: usize },
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::DataUnavailable(err.to_string())
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::DataUnavailable(err.to_string())
    }
}
