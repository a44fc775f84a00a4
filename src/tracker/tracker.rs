use std::io::Write;
use std::time::Duration;

use tokio::sync::oneshot::{self, error::TryRecvError};

use super::clock::Clock;
use super::error::TrackerError;
use crate::catalog::SatelliteRecord;
use crate::predict::{observe, GroundStation};
use crate::report::{self, OutputFormat};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Live position printer for one satellite
pub struct Tracker<'a> {
    record: &'a SatelliteRecord,
    station: GroundStation,
    interval: Duration,
    format: OutputFormat,
}

impl<'a> Tracker<'a> {
    pub fn new(
        record: &'a SatelliteRecord,
        station: GroundStation,
        interval: Duration,
        format: OutputFormat,
    ) -> Self {
        Self {
            record,
            station,
            interval,
            format,
        }
    }

    /// Print one observation per tick until `stop` fires (or its sender is
    /// dropped) or `max_ticks` lines have been attempted. Returns the tick
    /// count.
    pub async fn run<C: Clock, W: Write>(
        &self,
        clock: &C,
        out: &mut W,
        mut stop: oneshot::Receiver<()>,
        max_ticks: Option<u64>,
    ) -> Result<u64, TrackerError> {
        log::info!(
            "Tracking {} (NORAD {}) every {:?}",
            self.record.name(),
            self.record.norad_id(),
            self.interval
        );

        let mut ticks = 0;
        let limit_reached = |ticks: u64| max_ticks.is_some_and(|max| ticks >= max);
        loop {
            if limit_reached(ticks) || !matches!(stop.try_recv(), Err(TryRecvError::Empty)) {
                break;
            }

            let now = clock.now();
            match observe(self.record, &self.station, now) {
                Ok(observation) => {
                    report::write_tick(out, &observation, self.format)?;
                    out.flush()?;
                }
                Err(e) => log::warn!("Skipping tick at {}: {}", now, e),
            }

            ticks += 1;
            if limit_reached(ticks) {
                break;
            }

            let should_stop = tokio::select! {
                biased;
                _ = &mut stop => true,
                _ = clock.sleep(self.interval) => false,
            };
            if should_stop {
                break;
            }
        }

        log::info!("Tracking stopped after {} ticks", ticks);
        Ok(ticks)
    }
}
