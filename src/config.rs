use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::catalog::DEFAULT_TLE_URL;
use crate::predict::{GroundStation, DEFAULT_MINUTES_AHEAD, DEFAULT_STEP_SECONDS};
use crate::tracker::DEFAULT_INTERVAL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub observer: ObserverConfig,
    pub tle: TleConfig,
    pub tracking: TrackingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub coordinates: String,
    pub altitude_m: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            coordinates: "0.0, 0.0".to_string(),
            altitude_m: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TleConfig {
    pub url: String,
    pub cache_file: PathBuf,
    pub max_age_days: u64,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for TleConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_TLE_URL.to_string(),
            cache_file: PathBuf::from("stations.tle"),
            max_age_days: 7,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TleConfig {
    /// Zero means the cache is always stale
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_days.saturating_mul(86_400))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    #[serde(deserialize_with = "deserialize_duration")]
    pub interval: Duration,
    pub ground_track_minutes: u32,
    pub ground_track_step_seconds: u32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            ground_track_minutes: DEFAULT_MINUTES_AHEAD,
            ground_track_step_seconds: DEFAULT_STEP_SECONDS,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.station()?;
        if self.tracking.interval.is_zero() {
            return Err(ConfigError::Invalid(
                "tracking.interval must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn station(&self) -> Result<GroundStation, ConfigError> {
        GroundStation::from_coordinates(&self.observer.coordinates, Some(self.observer.altitude_m))
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "observer coordinates {:?} are not \"lat, lon\" in degrees",
                    self.observer.coordinates
                ))
            })
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        for content in ["", "{}", "observer: {}\ntle: {}\n"] {
            let config = Config::from_str(content).unwrap();
            assert_eq!(config.tle.url, DEFAULT_TLE_URL);
            assert_eq!(config.tle.cache_file, PathBuf::from("stations.tle"));
            assert_eq!(config.tle.max_age(), Duration::from_secs(7 * 86_400));
            assert_eq!(config.tracking.interval, Duration::from_secs(1));
            assert_eq!(config.tracking.ground_track_minutes, 90);
            assert_eq!(config.tracking.ground_track_step_seconds, 30);
            assert_eq!(config.station().unwrap(), GroundStation::default());
        }
    }

    #[test]
    fn yaml_overrides_defaults() {
        let yaml = r#"
observer:
  coordinates: "51.4779, -0.0015"
  altitude_m: 45
tle:
  url: https://celestrak.org/NORAD/elements/stations.txt
  cache_file: /tmp/tle/stations.tle
  max_age_days: 2
  timeout: 10s
tracking:
  interval: 500ms
  ground_track_minutes: 100
  ground_track_step_seconds: 60
"#;
        let config = Config::from_str(yaml).unwrap();

        let station = config.station().unwrap();
        assert_eq!(station.latitude_deg, 51.4779);
        assert_eq!(station.longitude_deg, -0.0015);
        assert_eq!(station.altitude_m, 45.0);
        assert_eq!(config.tle.url, "https://celestrak.org/NORAD/elements/stations.txt");
        assert_eq!(config.tle.max_age(), Duration::from_secs(2 * 86_400));
        assert_eq!(config.tle.timeout, Duration::from_secs(10));
        assert_eq!(config.tracking.interval, Duration::from_millis(500));
        assert_eq!(config.tracking.ground_track_step_seconds, 60);
    }

    #[test]
    fn invalid_coordinates_are_rejected() {
        let err = Config::from_str("observer:\n  coordinates: somewhere\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn bad_duration_is_a_yaml_error() {
        let err = Config::from_str("tracking:\n  interval: often\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = Config::from_str("tracking:\n  interval: 0s\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn huge_max_age_saturates() {
        let config = Config::from_str("tle:\n  max_age_days: 300000000000000\n").unwrap();
        assert_eq!(config.tle.max_age(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn zero_max_age_is_accepted() {
        let config = Config::from_str("tle:\n  max_age_days: 0\n").unwrap();
        assert_eq!(config.tle.max_age(), Duration::ZERO);
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sat-track.yaml");
        std::fs::write(&path, "tle:\n  max_age_days: 1\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.tle.max_age_days, 1);
    }
}
