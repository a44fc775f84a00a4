//! Console rendering of catalog listings, snapshots, ground tracks and
//! live ticks.

use std::io::{self, Write};

use chrono::SecondsFormat;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::predict::{GroundStation, GroundTrackPoint, Observation, ObserverView, SatelliteState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct SnapshotReport<'a> {
    observer: &'a GroundStation,
    state: &'a SatelliteState,
    view: &'a ObserverView,
}

#[derive(Serialize)]
struct GroundTrackReport<'a> {
    name: &'a str,
    norad_id: u64,
    points: &'a [GroundTrackPoint],
}

pub fn write_catalog<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    for (i, record) in catalog.records().iter().enumerate() {
        writeln!(
            out,
            "{:>4} -> {} (NORAD {})",
            i,
            record.name(),
            record.norad_id()
        )?;
    }
    Ok(())
}

pub fn write_snapshot<W: Write>(
    out: &mut W,
    observation: &Observation,
    station: &GroundStation,
    format: OutputFormat,
) -> io::Result<()> {
    let state = &observation.state;
    let view = &observation.view;

    if format == OutputFormat::Json {
        let report = SnapshotReport {
            observer: station,
            state,
            view,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        return writeln!(out);
    }

    writeln!(
        out,
        "{} (NORAD {}) at {}",
        state.name,
        state.norad_id,
        state.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    writeln!(out, "  Latitude:  {:.4}°", state.latitude_deg)?;
    writeln!(out, "  Longitude: {:.4}°", state.longitude_deg)?;
    writeln!(out, "  Altitude:  {:.4} km", state.altitude_km)?;
    writeln!(out, "  Speed:     {:.4} km/s", state.speed_km_s)?;
    writeln!(
        out,
        "Seen from {:.4}°, {:.4}°:",
        station.latitude_deg, station.longitude_deg
    )?;
    writeln!(out, "  Altitude:  {:.4}°", view.altitude_deg)?;
    writeln!(out, "  Azimuth:   {:.4}°", view.azimuth_deg)?;
    writeln!(out, "  Distance:  {:.4} km", view.distance_km)?;
    Ok(())
}

pub fn write_ground_track<W: Write>(
    out: &mut W,
    name: &str,
    norad_id: u64,
    points: &[GroundTrackPoint],
    format: OutputFormat,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        let report = GroundTrackReport {
            name,
            norad_id,
            points,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        return writeln!(out);
    }

    writeln!(out, "Ground track for {} ({} points)", name, points.len())?;
    for (i, point) in points.iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {}  {:>9.4}  {:>9.4}  {:>9.4} km",
            i,
            point.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            point.latitude_deg,
            point.longitude_deg,
            point.altitude_km
        )?;
    }
    Ok(())
}

/// One line per live tick, timestamp first
pub fn write_tick<W: Write>(
    out: &mut W,
    observation: &Observation,
    format: OutputFormat,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        serde_json::to_writer(&mut *out, observation)?;
        return writeln!(out);
    }

    let state = &observation.state;
    let view = &observation.view;
    writeln!(
        out,
        "{}  {}  lat {:>7.2}  lon {:>7.2}  alt {:>7.1} km  {:.2} km/s  |  el {:>6.2}  az {:>6.2}  dist {:>8.1} km",
        state.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        state.name,
        state.latitude_deg,
        state.longitude_deg,
        state.altitude_km,
        state.speed_km_s,
        view.altitude_deg,
        view.azimuth_deg,
        view.distance_km
    )
}
