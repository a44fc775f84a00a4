//! Element sets shared by unit tests.

pub const ISS_TLE: &str = "ISS (ZARYA)
1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992
2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008";

/// Vallado's SGP4 verification satellite; its state at epoch is published.
pub const VALLADO_00005_TLE: &str = "VANGUARD 1
1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753
2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667";

pub fn record(tle: &str) -> crate::catalog::SatelliteRecord {
    let mut records = crate::catalog::parse_str(tle, "fixture.tle")
        .unwrap()
        .into_records();
    records.remove(0)
}

pub fn epoch(record: &crate::catalog::SatelliteRecord) -> chrono::DateTime<chrono::Utc> {
    record.elements.datetime.and_utc()
}
