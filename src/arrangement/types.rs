use crate::arrangement::metadata::ArrangementMetadata;
use crate::sync::time_table::SyncAnomaly;
use crate::tab::tuning::TuningOffsets;
use serde::Serialize;
use std::collections::BTreeMap;

/// Measure number carried by beats which are not the first of their measure
pub const NOT_A_DOWNBEAT: i32 = -1;

/// Tone name always present at index 0 of the tone table
pub const BASE_TONE: &str = "ToneBase";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BendValue {
    pub time: f64,
    /// Pitch alteration in semitones
    pub step: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArrangementNote {
    pub time: f64,
    /// 0 is the lowest string
    pub string: u8,
    pub fret: u8,
    pub accent: bool,
    pub bend: bool,
    pub harmonic: bool,
    pub harmonic_pinch: bool,
    pub hopo: bool,
    pub ignore: bool,
    pub mute: bool,
    pub palm_mute: bool,
    pub tremolo: bool,
    pub bend_values: Vec<BendValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chord {
    pub time: f64,
    pub accent: bool,
    pub ignore: bool,
    pub palm_mute: bool,
    pub hopo: bool,
    pub notes: Vec<ArrangementNote>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EBeat {
    pub time: f64,
    /// 1-based measure number on downbeats, [`NOT_A_DOWNBEAT`] otherwise
    pub measure: i32,
}

impl EBeat {
    pub const fn is_downbeat(&self) -> bool {
        self.measure != NOT_A_DOWNBEAT
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub name: String,
    pub number: usize,
    pub start_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToneChange {
    /// Index into [`Arrangement::tone_names`]
    pub id: usize,
    pub time: f64,
}

/// Source features recognized but not translated into the arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum UnsupportedFeature {
    Slide,
    HammerPull,
    Grace,
    ChordBend,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    pub sync_anomalies: Vec<SyncAnomaly>,
    /// Occurrences per untranslated feature
    pub unsupported: BTreeMap<UnsupportedFeature, usize>,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.sync_anomalies.is_empty() && self.unsupported.is_empty()
    }
}

/// Fully time-stamped arrangement for one track
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arrangement {
    pub metadata: ArrangementMetadata,
    pub tuning: TuningOffsets,
    /// First-seen ordered tone names, starting with [`BASE_TONE`]
    pub tone_names: Vec<String>,
    pub tones: Vec<ToneChange>,
    pub ebeats: Vec<EBeat>,
    pub sections: Vec<Section>,
    pub notes: Vec<ArrangementNote>,
    pub chords: Vec<Chord>,
    pub diagnostics: Diagnostics,
}

impl Arrangement {
    /// Tone names for the A to D slots, empty when unused
    pub fn tone_slots(&self) -> [&str; 4] {
        let slot = |i: usize| self.tone_names.get(i).map_or("", String::as_str);
        [slot(1), slot(2), slot(3), slot(4)]
    }
}
