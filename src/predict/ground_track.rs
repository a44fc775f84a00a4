use chrono::{DateTime, Duration, Utc};

use crate::catalog::SatelliteRecord;
use crate::predict::error::PredictError;
use crate::predict::propagation::propagate_many;
use crate::predict::types::GroundTrackPoint;

// Roughly one LEO revolution
pub const DEFAULT_MINUTES_AHEAD: u32 = 90;
pub const DEFAULT_STEP_SECONDS: u32 = 30;
/// A week at five-second steps
pub const MAX_GROUND_TRACK_POINTS: u64 = 120_960;

/// Instants from `start`, `step_seconds` apart, covering `minutes_ahead`.
/// The last partial step still gets a sample.
pub fn sample_instants(
    start: DateTime<Utc>,
    minutes_ahead: u32,
    step_seconds: u32,
) -> Result<Vec<DateTime<Utc>>, PredictError> {
    if step_seconds == 0 {
        return Err(PredictError::InvalidParameters(
            "ground track step must be at least one second".to_string(),
        ));
    }
    if minutes_ahead == 0 {
        return Err(PredictError::InvalidParameters(
            "ground track span must be at least one minute".to_string(),
        ));
    }

    let span_seconds = u64::from(minutes_ahead) * 60;
    let count = span_seconds.div_ceil(u64::from(step_seconds));
    if count > MAX_GROUND_TRACK_POINTS {
        return Err(PredictError::InvalidParameters(format!(
            "ground track of {} points exceeds the limit of {}",
            count, MAX_GROUND_TRACK_POINTS
        )));
    }
    let step = Duration::seconds(i64::from(step_seconds));

    let mut cursor = start;
    let mut instants = Vec::with_capacity(count as usize);
    for _ in 0..count {
        instants.push(cursor);
        cursor = cursor.checked_add_signed(step).ok_or_else(|| {
            PredictError::InvalidParameters("ground track runs past representable time".into())
        })?;
    }

    Ok(instants)
}

/// Subpoints of `record` sampled over the next `minutes_ahead` minutes
pub fn ground_track(
    record: &SatelliteRecord,
    start: DateTime<Utc>,
    minutes_ahead: u32,
    step_seconds: u32,
) -> Result<Vec<GroundTrackPoint>, PredictError> {
    let instants = sample_instants(start, minutes_ahead, step_seconds)?;
    let states = propagate_many(record, &instants)?;

    log::debug!(
        "Ground track for {}: {} points from {}",
        record.name(),
        states.len(),
        start
    );

    Ok(states
        .iter()
        .map(|state| {
            let subpoint = state.subpoint();
            GroundTrackPoint {
                timestamp: state.timestamp,
                latitude_deg: subpoint.latitude_deg,
                longitude_deg: subpoint.longitude_deg,
                altitude_km: subpoint.altitude_km,
            }
        })
        .collect())
}
