use crate::AppError::ConfigError;
use clap::Parser;
use config::Config;
use rocktab::{
    parse_song_json, parse_sync_data, Arrangement, ArrangementBuilder, RockTabError,
    TimeSignature, TimeTable,
};
use std::io;
use std::io::Write;
use std::path::PathBuf;

mod config;

fn main() {
    let result = main_result();
    std::process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            // use Display instead of Debug for user friendly error messages
            log::error!("{err}");
            1
        }
    });
}

pub fn main_result() -> Result<(), AppError> {
    // setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("rocktab=info"))
        .init();

    // args
    let args = CliArgs::parse();
    let tab_file_path = PathBuf::from(&args.tab_file_path);
    let sync_file_path = PathBuf::from(&args.sync_file_path);

    for path in [&tab_file_path, &sync_file_path] {
        if !path.exists() {
            return Err(ConfigError(format!("Input file not found {path:?}")));
        }
    }

    // read local config
    let local_config = Config::read_config()?;
    let track_index = args.track.unwrap_or_else(|| local_config.default_track());

    log::info!("Reading tablature {tab_file_path:?}");
    let song = parse_song_json(&std::fs::read(&tab_file_path)?)?;

    log::info!("Reading sync data {sync_file_path:?}");
    let sync_points = parse_sync_data(&std::fs::read_to_string(&sync_file_path)?)?;
    let time_table = TimeTable::build(sync_points)?;

    let mut builder = ArrangementBuilder::new(&song, track_index, &time_table)?;
    if let Some(time_signature) = args.time_signature {
        builder = builder.with_time_signature(time_signature);
    }
    let arrangement = builder.build()?;
    report(&arrangement);

    let json = if local_config.pretty_output() {
        serde_json::to_string_pretty(&arrangement)
    } else {
        serde_json::to_string(&arrangement)
    }
    .map_err(RockTabError::from)?;

    match args.output {
        Some(output) => {
            std::fs::write(&output, json)?;
            log::info!("Arrangement written to {output:?}");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn report(arrangement: &Arrangement) {
    log::info!(
        "Track '{}': {} notes, {} chords, {} beats, {} sections, {} tone changes",
        arrangement.metadata.arrangement,
        arrangement.notes.len(),
        arrangement.chords.len(),
        arrangement.ebeats.len(),
        arrangement.sections.len(),
        arrangement.tones.len()
    );
    if !arrangement.diagnostics.sync_anomalies.is_empty() {
        log::warn!(
            "{} sync anomalies, timestamps may go backwards",
            arrangement.diagnostics.sync_anomalies.len()
        );
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the tablature in JSON.
    #[arg(long = "tab")]
    tab_file_path: String,
    /// Path to the Go PlayAlong sync data.
    #[arg(long = "sync")]
    sync_file_path: String,
    /// Index of the track to convert, defaults to the configured track.
    #[arg(long)]
    track: Option<usize>,
    /// Time signature used until the tablature declares one, e.g. 4/4.
    #[arg(long)]
    time_signature: Option<TimeSignature>,
    /// Optional output file, stdout otherwise.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("conversion error: {0}")]
    ConversionError(RockTabError),
    #[error("other error: {0}")]
    OtherError(String),
}

impl From<RockTabError> for AppError {
    fn from(error: RockTabError) -> Self {
        match error {
            RockTabError::IoError(s) => Self::OtherError(s),
            other => Self::ConversionError(other),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::OtherError(error.to_string())
    }
}
