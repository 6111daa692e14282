use crate::RockTabError;
use serde::Deserialize;

// In-memory tablature model, produced upstream from Guitar Pro files.
// Strings are numbered the Guitar Pro way: 1 is the highest pitched string.

pub const QUARTER: u16 = 4;

pub const DURATION_WHOLE: u16 = 1;
pub const DURATION_HALF: u16 = 2;
pub const DURATION_EIGHTH: u16 = 8;
pub const DURATION_SIXTEENTH: u16 = 16;
pub const DURATION_THIRTY_SECOND: u16 = 32;
pub const DURATION_SIXTY_FOURTH: u16 = 64;

/// Parse the tablature model from its JSON representation
pub fn parse_song_json(data: &[u8]) -> Result<Song, RockTabError> {
    let song: Song = serde_json::from_slice(data)?;
    log::debug!(
        "Parsed song '{}' with {} tracks and {} measures",
        song.song_info.name,
        song.tracks.len(),
        song.measure_headers.len()
    );
    Ok(song)
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Song {
    pub song_info: SongInfo,
    pub tempo: Tempo,
    pub measure_headers: Vec<MeasureHeader>,
    pub tracks: Vec<Track>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SongInfo {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub copyright: String,
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tempo {
    pub value: u32,
}

impl Default for Tempo {
    fn default() -> Self {
        Tempo { value: 120 }
    }
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct Marker {
    pub title: String,
}

/// Settings shared by all tracks for a given measure
#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MeasureHeader {
    /// Present only when the measure changes the time signature
    pub time_signature: Option<TimeSignature>,
    pub marker: Option<Marker>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Deserialize)]
pub struct TimeSignature {
    pub numerator: u8,
    pub denominator: u16,
}

impl Default for TimeSignature {
    fn default() -> Self {
        TimeSignature {
            numerator: 4,
            denominator: QUARTER,
        }
    }
}

impl TimeSignature {
    pub const fn new(numerator: u8, denominator: u16) -> Self {
        TimeSignature {
            numerator,
            denominator,
        }
    }

    /// Number of quarter note pulses in a measure, `4 * numerator / denominator`
    pub fn beat_units(&self) -> Result<f64, RockTabError> {
        if self.numerator == 0 || self.denominator == 0 {
            return Err(RockTabError::InvalidTimeSignature {
                numerator: self.numerator,
                denominator: self.denominator,
            });
        }
        Ok(4.0 * f64::from(self.numerator) / f64::from(self.denominator))
    }
}

impl std::str::FromStr for TimeSignature {
    type Err = RockTabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RockTabError::ParsingError(format!("invalid time signature '{s}'"));
        let (numerator, denominator) = s.split_once('/').ok_or_else(invalid)?;
        let numerator = numerator.trim().parse().map_err(|_| invalid())?;
        let denominator = denominator.trim().parse().map_err(|_| invalid())?;
        let signature = TimeSignature::new(numerator, denominator);
        signature.beat_units()?;
        Ok(signature)
    }
}

impl std::fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Duration {
    pub value: u16,
    pub dotted: bool,
    pub double_dotted: bool,
    pub tuplet_enters: u8,
    pub tuplet_times: u8,
}

impl Default for Duration {
    fn default() -> Self {
        Duration {
            value: QUARTER,
            dotted: false,
            double_dotted: false,
            tuplet_enters: 1,
            tuplet_times: 1,
        }
    }
}

impl Duration {
    pub const fn new(value: u16) -> Self {
        Duration {
            value,
            dotted: false,
            double_dotted: false,
            tuplet_enters: 1,
            tuplet_times: 1,
        }
    }

    /// Exponent `n` such that the plain note value lasts `1 / 2^n` whole note
    pub fn exponent(&self) -> Result<u32, RockTabError> {
        match self.value {
            DURATION_WHOLE => Ok(0),
            DURATION_HALF => Ok(1),
            QUARTER => Ok(2),
            DURATION_EIGHTH => Ok(3),
            DURATION_SIXTEENTH => Ok(4),
            DURATION_THIRTY_SECOND => Ok(5),
            DURATION_SIXTY_FOURTH => Ok(6),
            other => Err(RockTabError::UnknownDuration(other)),
        }
    }

    /// Length in whole notes including dots and tuplet ratio
    pub fn whole_notes(&self) -> Result<f64, RockTabError> {
        if self.tuplet_enters == 0 || self.tuplet_times == 0 {
            return Err(RockTabError::InvalidDuration(format!(
                "tuplet {}:{}",
                self.tuplet_enters, self.tuplet_times
            )));
        }
        let mut length = 1.0 / f64::from(1u32 << self.exponent()?);
        if self.dotted {
            length += length / 2.0;
        } else if self.double_dotted {
            length += (length / 4.0) * 3.0;
        }
        Ok(length * f64::from(self.tuplet_times) / f64::from(self.tuplet_enters))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum HarmonicType {
    Natural,
    Pinch,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BendPoint {
    /// Position within the note, from 0.0 (start) to 1.0 (end)
    pub position: f64,
    /// Pitch alteration in cents
    pub cents: i32,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct BendEffect {
    pub points: Vec<BendPoint>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NoteEffect {
    pub accentuated_note: bool,
    pub palm_mute: bool,
    pub tremolo_picking: bool,
    pub harmonic: Option<HarmonicType>,
    pub bend: Option<BendEffect>,
    // recognized but not translated
    pub slide: bool,
    pub hammer: bool,
    pub grace: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub enum NoteType {
    #[default]
    Normal,
    Tie,
    Dead,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Note {
    pub fret: u8,
    /// 1-based, 1 is the highest string
    pub string: u8,
    #[serde(default)]
    pub kind: NoteType,
    #[serde(default)]
    pub effect: NoteEffect,
}

impl Note {
    pub fn new(fret: u8, string: u8) -> Self {
        Note {
            fret,
            string,
            kind: NoteType::Normal,
            effect: NoteEffect::default(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Beat {
    pub notes: Vec<Note>,
    pub duration: Duration,
    pub text: Option<String>,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Voice {
    pub beats: Vec<Beat>,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Measure {
    pub voices: Vec<Voice>,
}

impl Measure {
    /// The lead voice, the only one transcribed
    pub fn primary_voice(&self) -> Option<&Voice> {
        self.voices.first()
    }
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Track {
    pub name: String,
    /// Pitch names in tablature order, highest string first
    pub strings: Vec<String>,
    pub capo: u8,
    pub measures: Vec<Measure>,
}
