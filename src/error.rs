//! Error types for the rocktab library

use std::io;

/// Library error type for rocktab operations
///
/// Every variant is fatal: the conversion pass stops at the first one.
#[derive(Debug, thiserror::Error)]
pub enum RockTabError {
    /// Parsing error when reading the tablature model
    #[error("parsing error: {0}")]
    ParsingError(String),

    /// Malformed synchronization breakpoints
    #[error("invalid sync data: {0}")]
    InvalidSyncData(String),

    /// Duration value without a known note value
    #[error("unknown duration value {0}")]
    UnknownDuration(u16),

    /// Duration with an impossible tuplet ratio
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    /// Time signature with a zero numerator or denominator
    #[error("invalid time signature {numerator}/{denominator}")]
    InvalidTimeSignature { numerator: u8, denominator: u16 },

    /// Only 6-string instruments are supported
    #[error("unsupported string count {0}, only 6 string instruments are supported")]
    UnsupportedStringCount(usize),

    /// Pitch name that cannot be converted to a semitone
    #[error("invalid pitch name '{0}'")]
    InvalidPitch(String),

    /// Note on a string the track does not have
    #[error("string {string} out of range for a {string_count} string track")]
    InvalidString { string: u8, string_count: usize },

    /// No time signature before the given 1-based measure
    #[error("no time signature established before measure {0}")]
    MissingTimeSignature(usize),

    /// Track index not present in the song
    #[error("track {0} not found")]
    TrackNotFound(usize),

    /// Track measures do not line up with the measure headers
    #[error("track has {measures} measures but the song has {headers} measure headers")]
    MeasureCountMismatch { measures: usize, headers: usize },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<io::Error> for RockTabError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for RockTabError {
    fn from(error: serde_json::Error) -> Self {
        Self::ParsingError(error.to_string())
    }
}
