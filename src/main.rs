use chrono::Utc;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::sync::oneshot;

use sat_track::catalog::{self, parse_selection, Catalog, CatalogError, HttpSource, SatelliteRecord};
use sat_track::config::Config;
use sat_track::error::AppError;
use sat_track::predict::{self, GroundStation};
use sat_track::report::{self, OutputFormat};
use sat_track::tracker::{SystemClock, Tracker};

#[derive(Parser)]
#[command(name = "sat-track")]
#[command(about = "Satellite position tracker")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Observer location as "lat, lon" in degrees
    #[arg(long, global = true, allow_hyphen_values = true)]
    observer: Option<String>,
    /// Catalog index of the satellite (skips the prompt)
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    satellite: Option<i64>,
    /// NORAD catalog number of the satellite (skips the prompt)
    #[arg(long, global = true, conflicts_with = "satellite")]
    norad: Option<u64>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the loaded satellites
    List,
    /// Print the current position and observer view once
    Snapshot,
    /// Print the ground track over the coming minutes
    GroundTrack {
        #[arg(long)]
        minutes: Option<u32>,
        /// Seconds between samples
        #[arg(long)]
        step: Option<u32>,
    },
    /// Print the position every interval until Ctrl+C
    Track {
        /// Stop after this many lines
        #[arg(long)]
        ticks: Option<u64>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(observer) = &cli.observer {
        config.observer.coordinates = observer.clone();
        config.validate()?;
    }
    let station = config.station()?;
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let source = HttpSource::new(config.tle.timeout)?;
    let path = catalog::fetch(
        &source,
        &config.tle.url,
        &config.tle.cache_file,
        config.tle.max_age(),
    )?;
    let catalog = catalog::parse(&path)?;

    let tracking = &config.tracking;
    match &cli.command {
        Some(Commands::List) => {
            report::write_catalog(&mut io::stdout().lock(), &catalog)?;
        }
        Some(Commands::Snapshot) => {
            let record = choose_satellite(&catalog, &cli)?;
            snapshot(record, &station, format)?;
        }
        Some(Commands::GroundTrack { minutes, step }) => {
            let record = choose_satellite(&catalog, &cli)?;
            print_ground_track(
                record,
                minutes.unwrap_or(tracking.ground_track_minutes),
                step.unwrap_or(tracking.ground_track_step_seconds),
                format,
            )?;
        }
        Some(Commands::Track { ticks }) => {
            let record = choose_satellite(&catalog, &cli)?;
            track(record, station, tracking.interval, format, *ticks)?;
        }
        None => {
            let record = choose_satellite(&catalog, &cli)?;
            snapshot(record, &station, format)?;
            print_ground_track(
                record,
                tracking.ground_track_minutes,
                tracking.ground_track_step_seconds,
                format,
            )?;
            track(record, station, tracking.interval, format, None)?;
        }
    }

    Ok(())
}

fn choose_satellite<'a>(catalog: &'a Catalog, cli: &Cli) -> Result<&'a SatelliteRecord, AppError> {
    if let Some(norad_id) = cli.norad {
        let record = catalog
            .find_norad(norad_id)
            .ok_or_else(|| CatalogError::InvalidSelection {
                input: format!("NORAD {}", norad_id),
                count: catalog.len(),
            })?;
        log::info!("Selected {} (NORAD {})", record.name(), norad_id);
        return Ok(record);
    }

    let index = match cli.satellite {
        Some(index) => index,
        None => {
            let mut out = io::stdout().lock();
            report::write_catalog(&mut out, catalog)?;
            write!(out, "Select satellite index: ")?;
            out.flush()?;

            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            parse_selection(&line, catalog.len())?
        }
    };

    let record = catalog.select(index)?;
    log::info!("Selected {} (NORAD {})", record.name(), record.norad_id());
    Ok(record)
}

fn snapshot(
    record: &SatelliteRecord,
    station: &GroundStation,
    format: OutputFormat,
) -> Result<(), AppError> {
    let observation = predict::observe(record, station, Utc::now())?;
    report::write_snapshot(&mut io::stdout().lock(), &observation, station, format)?;
    Ok(())
}

fn print_ground_track(
    record: &SatelliteRecord,
    minutes: u32,
    step_seconds: u32,
    format: OutputFormat,
) -> Result<(), AppError> {
    let points = predict::ground_track(record, Utc::now(), minutes, step_seconds)?;
    report::write_ground_track(
        &mut io::stdout().lock(),
        record.name(),
        record.norad_id(),
        &points,
        format,
    )?;
    Ok(())
}

fn track(
    record: &SatelliteRecord,
    station: GroundStation,
    interval: Duration,
    format: OutputFormat,
    ticks: Option<u64>,
) -> Result<(), AppError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let (stop_tx, stop_rx) = oneshot::channel();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    log::info!("Interrupt received, stopping");
                    let _ = stop_tx.send(());
                }
                Err(e) => {
                    log::warn!("Cannot listen for Ctrl+C: {}", e);
                    // keep the sender alive so the tracker is not stopped
                    std::future::pending::<()>().await;
                    drop(stop_tx);
                }
            }
        });

        let tracker = Tracker::new(record, station, interval, format);
        let mut out = io::stdout().lock();
        tracker.run(&SystemClock, &mut out, stop_rx, ticks).await
    })?;

    Ok(())
}
