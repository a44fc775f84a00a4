use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::catalog::error::CatalogError;

pub const DEFAULT_TLE_URL: &str =
    "https://celestrak.org/NORAD/elements/gp.php?GROUP=stations&FORMAT=tle";

/// Anything that can hand back the body of a TLE endpoint
pub trait TleSource {
    fn download(&self, url: &str) -> Result<String, CatalogError>;
}

pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sat-track/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                CatalogError::DataUnavailable(format!("Failed to create HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }
}

impl TleSource for HttpSource {
    fn download(&self, url: &str) -> Result<String, CatalogError> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(CatalogError::DataUnavailable(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        let body = response.text()?;
        if body.trim().is_empty() {
            return Err(CatalogError::DataUnavailable(format!(
                "{} returned an empty body",
                url
            )));
        }

        Ok(body)
    }
}

/// Make sure `cache_path` holds TLE data younger than `max_age`.
///
/// Downloads through `source` when the cache is missing or stale, otherwise
/// leaves the file alone. Returns the path of the cache file.
pub fn fetch(
    source: &impl TleSource,
    url: &str,
    cache_path: &Path,
    max_age: Duration,
) -> Result<PathBuf, CatalogError> {
    fetch_at(source, url, cache_path, max_age, SystemTime::now())
}

fn fetch_at(
    source: &impl TleSource,
    url: &str,
    cache_path: &Path,
    max_age: Duration,
    now: SystemTime,
) -> Result<PathBuf, CatalogError> {
    if cache_is_fresh(cache_path, max_age, now)? {
        log::info!("Using cached TLE data from {}", cache_path.display());
        return Ok(cache_path.to_path_buf());
    }

    log::info!("Downloading fresh TLE data from {}", url);
    let body = source.download(url).map_err(|e| {
        log::error!("Failed to download TLE data: {}", e);
        e
    })?;
    write_atomically(cache_path, &body)?;
    log::debug!("Wrote {} bytes to {}", body.len(), cache_path.display());

    Ok(cache_path.to_path_buf())
}

fn cache_is_fresh(path: &Path, max_age: Duration, now: SystemTime) -> io::Result<bool> {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if !metadata.is_file() {
        return Ok(false);
    }

    // mtime in the future counts as brand new
    let age = now
        .duration_since(metadata.modified()?)
        .unwrap_or(Duration::ZERO);

    Ok(age < max_age)
}

fn write_atomically(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");
    let result = fs::write(&temp_path, content).and_then(|()| fs::rename(&temp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}
