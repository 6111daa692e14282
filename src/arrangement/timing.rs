use crate::tab::song::{Duration, TimeSignature};
use crate::RockTabError;

/// Start and length in seconds of the beat a note belongs to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatTiming {
    pub time: f64,
    pub length: f64,
}

impl BeatTiming {
    pub const fn new(time: f64, length: f64) -> Self {
        Self { time, length }
    }
}

/// Fraction of a measure occupied by `duration` under `signature`.
pub fn measure_fraction(
    duration: &Duration,
    signature: &TimeSignature,
) -> Result<f64, RockTabError> {
    let quarter_notes = duration.whole_notes()? * 4.0;
    Ok(quarter_notes / signature.beat_units()?)
}

/// Offsets within a measure of the beat grid, the downbeat first.
///
/// One beat per whole beat unit, evenly spaced by `1 / beat_units`.
pub fn beat_grid_offsets(signature: &TimeSignature) -> Result<Vec<f64>, RockTabError> {
    let beat_units = signature.beat_units()?;
    let count = (beat_units.floor() as usize).max(1);
    Ok((0..count).map(|i| i as f64 / beat_units).collect())
}
