use std::fs;
use std::path::Path;

use sgp4::{Constants, Elements};

use crate::catalog::error::CatalogError;
use crate::catalog::types::{SatelliteInfo, SatelliteRecord};

/// Ordered set of satellites loaded from one TLE file
#[derive(Debug)]
pub struct Catalog {
    source: String,
    records: Vec<SatelliteRecord>,
}

impl Catalog {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn records(&self) -> &[SatelliteRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SatelliteRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pick a record by its zero-based position in the file
    pub fn select(&self, index: i64) -> Result<&SatelliteRecord, CatalogError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.records.get(i))
            .ok_or_else(|| CatalogError::InvalidSelection {
                input: index.to_string(),
                count: self.records.len(),
            })
    }

    pub fn find_norad(&self, norad_id: u64) -> Option<&SatelliteRecord> {
        self.records.iter().find(|r| r.norad_id() == norad_id)
    }
}

/// Parse operator input into a catalog index
pub fn parse_selection(input: &str, count: usize) -> Result<i64, CatalogError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| CatalogError::InvalidSelection {
            input: input.trim().to_string(),
            count,
        })
}

/// Load every element set in a TLE file, preserving file order
pub fn parse(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)?;
    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    log::info!("Parsing TLE data from {}", path.display());
    let catalog = parse_str(&content, &filename)?;
    log::info!("Loaded {} satellites from {}", catalog.len(), filename);

    Ok(catalog)
}

pub fn parse_str(content: &str, source: &str) -> Result<Catalog, CatalogError> {
    let mut records = Vec::new();

    for (name, line1, line2) in parse_multi_tle(content) {
        let invalid = |message: String| CatalogError::Parse {
            file: source.to_string(),
            message,
        };
        let label = name.clone().unwrap_or_else(|| line1.clone());

        let elements = Elements::from_tle(name.clone(), line1.as_bytes(), line2.as_bytes())
            .map_err(|e| invalid(format!("{}: {}", label, e)))?;
        let constants = Constants::from_elements(&elements)
            .map_err(|e| invalid(format!("{}: {}", label, e)))?;

        let sat_name = name.unwrap_or_else(|| format!("NORAD {}", elements.norad_id));

        records.push(SatelliteRecord {
            info: SatelliteInfo {
                name: sat_name,
                norad_id: elements.norad_id,
                tle_source: source.to_string(),
            },
            line1,
            line2,
            elements,
            constants,
        });
    }

    if records.is_empty() {
        return Err(CatalogError::Parse {
            file: source.to_string(),
            message: "no element sets found".to_string(),
        });
    }

    Ok(Catalog {
        source: source.to_string(),
        records,
    })
}

fn is_line(line: &str, number: u8) -> bool {
    matches!(line.as_bytes(), [n, b' ', _, ..] if *n == number)
}

/// Split TLE text into (name, line 1, line 2) triples
fn parse_multi_tle(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut rest = lines.as_slice();

    while let Some((&first, tail)) = rest.split_first() {
        match tail {
            [second, ..] if is_line(first, b'1') && is_line(second, b'2') => {
                result.push((None, first.to_string(), second.to_string()));
                rest = &tail[1..];
            }
            [second, third, ..] if is_line(second, b'1') && is_line(third, b'2') => {
                // Space-Track prefixes names with "0 "
                let name = first.strip_prefix("0 ").unwrap_or(first).trim();
                result.push((Some(name.to_string()), second.to_string(), third.to_string()));
                rest = &tail[2..];
            }
            _ => {
                log::debug!("Skipping unrecognised TLE line: {}", first);
                rest = tail;
            }
        }
    }

    result
}
