use chrono::{DateTime, Utc};
use serde::Serialize;

/// Point on the WGS84 ellipsoid beneath a satellite
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Subpoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatelliteState {
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub norad_id: u64,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
    pub speed_km_s: f64,
}

/// Satellite as seen from a ground station
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObserverView {
    pub timestamp: DateTime<Utc>,
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
    pub distance_km: f64,
}

/// State and view derived from one propagation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub state: SatelliteState,
    pub view: ObserverView,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroundTrackPoint {
    pub timestamp: DateTime<Utc>,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}
