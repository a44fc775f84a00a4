mod error;
mod fetch;
mod loader;
mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::CatalogError;
pub use fetch::{fetch, HttpSource, TleSource, DEFAULT_TLE_URL};
pub use loader::{parse, parse_selection, parse_str, Catalog};
pub use types::{SatelliteInfo, SatelliteRecord};
