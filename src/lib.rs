//! Rocktab - synchronized tablature to Rocksmith arrangement converter
//!
//! This library provides:
//! - A time table interpolating sparse sync breakpoints (Go PlayAlong sync data)
//! - A single pass over a tablature track producing a fully time-stamped arrangement
//!   (beat grid, sections, tone changes, notes and chords)
//!
//! # Example
//!
//! ```no_run
//! use rocktab::{parse_song_json, parse_sync_data, ArrangementBuilder, TimeTable};
//!
//! let song = parse_song_json(&std::fs::read("song.json").unwrap()).unwrap();
//! let sync_data = std::fs::read_to_string("sync.txt").unwrap();
//! let time_table = TimeTable::build(parse_sync_data(&sync_data).unwrap()).unwrap();
//! let arrangement = ArrangementBuilder::new(&song, 0, &time_table)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! ```

pub mod arrangement;
pub mod error;
pub mod sync;
pub mod tab;

// Re-export main types for convenience
pub use arrangement::{
    builder::ArrangementBuilder,
    metadata::ArrangementMetadata,
    types::{
        Arrangement, ArrangementNote, BendValue, Chord, Diagnostics, EBeat, Section, ToneChange,
        UnsupportedFeature, BASE_TONE, NOT_A_DOWNBEAT,
    },
};
pub use error::RockTabError;
pub use sync::{
    sync_parser::parse_sync_data,
    time_table::{SyncAnomaly, SyncPoint, TimeTable},
};
pub use tab::{
    song::{
        parse_song_json, Beat, Duration, Measure, MeasureHeader, Note, Song, TimeSignature, Track,
    },
    tuning::{tuning_offsets, TuningOffsets},
};

/// Convert one track of `song` using a Go PlayAlong sync block
pub fn convert(
    song: &Song,
    track_index: usize,
    sync_data: &str,
) -> Result<Arrangement, RockTabError> {
    let time_table = TimeTable::build(parse_sync_data(sync_data)?)?;
    ArrangementBuilder::new(song, track_index, &time_table)?.build()
}
