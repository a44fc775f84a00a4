use chrono::{DateTime, Utc};

use crate::catalog::SatelliteRecord;
use crate::predict::error::PredictError;
use crate::predict::frames::{ecef_to_enu, ecef_to_geodetic, gmst_rad, norm, teme_to_ecef_position};
use crate::predict::observer::GroundStation;
use crate::predict::types::{Observation, ObserverView, SatelliteState, Subpoint};

/// SGP4 output at one instant, TEME frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocentricState {
    pub timestamp: DateTime<Utc>,
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
    pub gmst_rad: f64,
}

impl GeocentricState {
    pub fn position_ecef_km(&self) -> [f64; 3] {
        teme_to_ecef_position(self.position_km, self.gmst_rad)
    }

    pub fn speed_km_s(&self) -> f64 {
        norm(self.velocity_km_s)
    }

    pub fn subpoint(&self) -> Subpoint {
        ecef_to_geodetic(self.position_ecef_km())
    }

    pub fn satellite_state(&self, record: &SatelliteRecord) -> SatelliteState {
        let subpoint = self.subpoint();
        SatelliteState {
            timestamp: self.timestamp,
            name: record.name().to_string(),
            norad_id: record.norad_id(),
            latitude_deg: subpoint.latitude_deg,
            longitude_deg: subpoint.longitude_deg,
            altitude_km: subpoint.altitude_km,
            speed_km_s: self.speed_km_s(),
        }
    }

    /// Look angles from `station`; the station is Earth-fixed so its
    /// position needs no time of its own.
    pub fn view_from(&self, station: &GroundStation) -> ObserverView {
        let sat_ecef = self.position_ecef_km();
        let sta_ecef = station.position_ecef_km();

        let dr = [
            sat_ecef[0] - sta_ecef[0],
            sat_ecef[1] - sta_ecef[1],
            sat_ecef[2] - sta_ecef[2],
        ];
        let range_km = norm(dr);

        let [east, north, up] = ecef_to_enu(dr, station.lat_rad(), station.lon_rad());
        let azimuth = east.atan2(north).to_degrees().rem_euclid(360.0);
        let altitude = if range_km > 0.0 {
            (up / range_km).clamp(-1.0, 1.0).asin().to_degrees()
        } else {
            0.0
        };

        ObserverView {
            timestamp: self.timestamp,
            altitude_deg: altitude,
            azimuth_deg: azimuth,
            distance_km: range_km,
        }
    }
}

/// Run SGP4 once for `record` at `timestamp`
pub fn propagate(
    record: &SatelliteRecord,
    timestamp: DateTime<Utc>,
) -> Result<GeocentricState, PredictError> {
    let minutes = record
        .elements
        .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
        .map_err(|e| PredictError::Propagation(e.to_string()))?;

    let prediction = record.constants.propagate(minutes)?;

    Ok(GeocentricState {
        timestamp,
        position_km: prediction.position,
        velocity_km_s: prediction.velocity,
        gmst_rad: gmst_rad(timestamp),
    })
}

/// Propagate a whole sequence of instants, failing on the first bad one
pub fn propagate_many(
    record: &SatelliteRecord,
    timestamps: &[DateTime<Utc>],
) -> Result<Vec<GeocentricState>, PredictError> {
    timestamps
        .iter()
        .map(|&t| propagate(record, t))
        .collect()
}

pub fn satellite_state(
    record: &SatelliteRecord,
    timestamp: DateTime<Utc>,
) -> Result<SatelliteState, PredictError> {
    Ok(propagate(record, timestamp)?.satellite_state(record))
}

pub fn observer_view(
    record: &SatelliteRecord,
    station: &GroundStation,
    timestamp: DateTime<Utc>,
) -> Result<ObserverView, PredictError> {
    Ok(propagate(record, timestamp)?.view_from(station))
}

/// Subpoint and look angles from a single propagation at `timestamp`
pub fn observe(
    record: &SatelliteRecord,
    station: &GroundStation,
    timestamp: DateTime<Utc>,
) -> Result<Observation, PredictError> {
    let geocentric = propagate(record, timestamp)?;
    Ok(Observation {
        state: geocentric.satellite_state(record),
        view: geocentric.view_from(station),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{epoch, record, ISS_TLE, VALLADO_00005_TLE};
    use chrono::Duration;

    fn angle_between(a: f64, b: f64) -> f64 {
        let diff = (a - b).rem_euclid(360.0);
        diff.min(360.0 - diff)
    }

    #[test]
    fn reference_satellite_matches_published_state_at_epoch() {
        let sat = record(VALLADO_00005_TLE);
        let state = propagate(&sat, epoch(&sat)).unwrap();

        // sgp4 output at epoch, and Vallado's published vector it tracks
        // to within a few tens of metres
        let crate_r = [7022.466472491371, -1400.066561817828, 0.0510655827503411];
        let published_r = [7022.46529266, -1400.08296755, 0.03995155];
        let published_v = [1.893841015, 6.405893759, 4.534807250];
        for i in 0..3 {
            assert!((state.position_km[i] - crate_r[i]).abs() < 1e-6);
            assert!((state.position_km[i] - published_r[i]).abs() < 0.05);
            assert!((state.velocity_km_s[i] - published_v[i]).abs() < 1e-3);
        }
    }

    #[test]
    fn reference_satellite_subpoint_at_epoch() {
        let sat = record(VALLADO_00005_TLE);
        let t = epoch(&sat);
        let geocentric = propagate(&sat, t).unwrap();
        let state = satellite_state(&sat, t).unwrap();

        assert_eq!(state.name, "VANGUARD 1");
        assert_eq!(state.norad_id, 5);
        assert_eq!(state.timestamp, t);
        // z is a few tens of metres: essentially over the equator
        assert!(state.latitude_deg.abs() < 0.01);
        assert!((state.altitude_km - 782.5349).abs() < 0.01);
        assert!((state.speed_km_s - 8.073821).abs() < 1e-3);
        assert_eq!(state.speed_km_s, geocentric.speed_km_s());

        let [x, y, _] = geocentric.position_km;
        let expected_lon = y.atan2(x).to_degrees() - gmst_rad(t).to_degrees();
        assert!(angle_between(state.longitude_deg, expected_lon) < 1e-6);
        assert!((-180.0..=180.0).contains(&state.longitude_deg));
    }

    #[test]
    fn iss_state_is_plausible_low_earth_orbit() {
        let sat = record(ISS_TLE);
        let state = satellite_state(&sat, epoch(&sat) + Duration::minutes(42)).unwrap();

        assert!((350.0..460.0).contains(&state.altitude_km), "{}", state.altitude_km);
        assert!((7.5..7.8).contains(&state.speed_km_s), "{}", state.speed_km_s);
        assert!(state.latitude_deg.abs() <= 52.0);
    }

    #[test]
    fn observer_beneath_satellite_sees_it_at_zenith() {
        let sat = record(ISS_TLE);
        let t = epoch(&sat);
        let state = satellite_state(&sat, t).unwrap();
        let station = GroundStation {
            latitude_deg: state.latitude_deg,
            longitude_deg: state.longitude_deg,
            altitude_m: 0.0,
        };

        let view = observer_view(&sat, &station, t).unwrap();

        assert!(view.altitude_deg > 89.9, "{}", view.altitude_deg);
        assert!((view.distance_km - state.altitude_km).abs() < 0.01);
        assert_eq!(view.timestamp, t);
    }

    #[test]
    fn observer_on_far_side_sees_it_below_horizon() {
        let sat = record(ISS_TLE);
        let t = epoch(&sat);
        let state = satellite_state(&sat, t).unwrap();
        let antipode = GroundStation {
            latitude_deg: -state.latitude_deg,
            longitude_deg: if state.longitude_deg > 0.0 {
                state.longitude_deg - 180.0
            } else {
                state.longitude_deg + 180.0
            },
            altitude_m: 0.0,
        };

        let view = observer_view(&sat, &antipode, t).unwrap();

        assert!(view.altitude_deg < -80.0, "{}", view.altitude_deg);
        assert!(view.distance_km > 12_000.0);
        assert!((0.0..360.0).contains(&view.azimuth_deg));
    }

    #[test]
    fn observe_matches_separate_calls_at_same_instant() {
        let sat = record(ISS_TLE);
        let station = GroundStation::from_coordinates("51.4779, -0.0015", Some(45.0)).unwrap();
        let t = epoch(&sat) + Duration::seconds(1234);

        let observation = observe(&sat, &station, t).unwrap();

        assert_eq!(observation.state, satellite_state(&sat, t).unwrap());
        assert_eq!(observation.view, observer_view(&sat, &station, t).unwrap());
        assert_eq!(observation.state.timestamp, observation.view.timestamp);
    }

    #[test]
    fn fixed_instant_is_deterministic() {
        let sat = record(ISS_TLE);
        let station = GroundStation::from_coordinates("35.6762, 139.6503", None).unwrap();
        let t = epoch(&sat) + Duration::minutes(10);

        let first = observe(&sat, &station, t).unwrap();
        let second = observe(&sat, &station, t).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn batched_propagation_matches_single_calls() {
        let sat = record(ISS_TLE);
        let start = epoch(&sat);
        let times: Vec<_> = (0..5).map(|i| start + Duration::seconds(i * 60)).collect();

        let batch = propagate_many(&sat, &times).unwrap();

        assert_eq!(batch.len(), times.len());
        for (state, t) in batch.iter().zip(&times) {
            assert_eq!(*state, propagate(&sat, *t).unwrap());
        }
    }
}
