//! Frame rotations and WGS84 conversions used on top of SGP4 output.

use chrono::{DateTime, Utc};

use crate::predict::types::Subpoint;

// WGS-84
pub const WGS84_A_KM: f64 = 6378.137;
pub const WGS84_E2: f64 = 0.00669437999014;

/// Greenwich mean sidereal time in radians
pub fn gmst_rad(timestamp: DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&timestamp.naive_utc()))
}

/// Rotate a TEME vector into the Earth-fixed frame (about z by GMST)
pub fn teme_to_ecef_position(teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let (sin_g, cos_g) = gmst.sin_cos();
    let [x, y, z] = teme;
    [cos_g * x + sin_g * y, cos_g * y - sin_g * x, z]
}

/// ECEF position of a point at geodetic latitude/longitude and height
pub fn geodetic_to_ecef(lat_rad: f64, lon_rad: f64, height_km: f64) -> [f64; 3] {
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lon, cos_lon) = lon_rad.sin_cos();
    let n = prime_vertical_radius(sin_lat);
    let horizontal = (n + height_km) * cos_lat;
    [
        horizontal * cos_lon,
        horizontal * sin_lon,
        (n * (1.0 - WGS84_E2) + height_km) * sin_lat,
    ]
}

/// East, north and up components of `offset` at the given geodetic point
pub fn ecef_to_enu(offset: [f64; 3], lat_rad: f64, lon_rad: f64) -> [f64; 3] {
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lon, cos_lon) = lon_rad.sin_cos();
    let [dx, dy, dz] = offset;

    // component of the offset along the local meridian plane
    let radial = cos_lon * dx + sin_lon * dy;
    [
        cos_lon * dy - sin_lon * dx,
        cos_lat * dz - sin_lat * radial,
        cos_lat * radial + sin_lat * dz,
    ]
}

fn prime_vertical_radius(sin_lat: f64) -> f64 {
    WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt()
}

/// Geodetic point beneath an ECEF position, Bowring iteration
pub fn ecef_to_geodetic(ecef: [f64; 3]) -> Subpoint {
    let [x, y, z] = ecef;
    let p = (x * x + y * y).sqrt();
    let longitude = y.atan2(x).to_degrees();

    let mut lat = z.atan2(p * (1.0 - WGS84_E2));
    for _ in 0..5 {
        let sin_lat = lat.sin();
        lat = (z + WGS84_E2 * prime_vertical_radius(sin_lat) * sin_lat).atan2(p);
    }

    let (sin_lat, cos_lat) = lat.sin_cos();
    let n = prime_vertical_radius(sin_lat);
    let altitude_km = if cos_lat.abs() > 1e-10 {
        p / cos_lat - n
    } else {
        z.abs() / sin_lat.abs() - n * (1.0 - WGS84_E2)
    };

    Subpoint {
        latitude_deg: lat.to_degrees(),
        longitude_deg: longitude,
        altitude_km,
    }
}

pub fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
