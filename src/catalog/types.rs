use std::fmt;

use serde::Serialize;
use sgp4::{Constants, Elements};

/// Name and catalog number of a loaded satellite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatelliteInfo {
    pub name: String,
    pub norad_id: u64,
    pub tle_source: String,
}

/// One element set from a TLE file, ready for propagation
pub struct SatelliteRecord {
    pub info: SatelliteInfo,
    pub line1: String,
    pub line2: String,
    pub elements: Elements,
    pub constants: Constants,
}

impl SatelliteRecord {
    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn norad_id(&self) -> u64 {
        self.info.norad_id
    }
}

impl fmt::Debug for SatelliteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SatelliteRecord")
            .field("info", &self.info)
            .field("line1", &self.line1)
            .field("line2", &self.line2)
            .finish_non_exhaustive()
    }
}
