use serde::Serialize;

use crate::predict::frames::geodetic_to_ecef;

/// Fixed observer on the WGS84 ellipsoid
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroundStation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
}

impl Default for GroundStation {
    fn default() -> Self {
        Self {
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            altitude_m: 0.0,
        }
    }
}

impl GroundStation {
    /// Parse `"lat, lon"` in decimal degrees
    pub fn from_coordinates(coordinates: &str, altitude_m: Option<f64>) -> Option<Self> {
        let (lat, lon) = coordinates.split_once(',')?;
        let latitude_deg: f64 = lat.trim().parse().ok()?;
        let longitude_deg: f64 = lon.trim().parse().ok()?;

        let on_globe =
            (-90.0..=90.0).contains(&latitude_deg) && (-180.0..=180.0).contains(&longitude_deg);
        on_globe.then_some(Self {
            latitude_deg,
            longitude_deg,
            altitude_m: altitude_m.unwrap_or(0.0),
        })
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn position_ecef_km(&self) -> [f64; 3] {
        geodetic_to_ecef(self.lat_rad(), self.lon_rad(), self.altitude_m / 1000.0)
    }
}
