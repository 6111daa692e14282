use crate::arrangement::timing::BeatTiming;
use crate::arrangement::types::{ArrangementNote, BendValue, Chord, UnsupportedFeature};
use crate::sync::time_table::round_millis;
use crate::tab::song::{HarmonicType, Note, NoteType};
use crate::RockTabError;

const CENTS_PER_SEMITONE: f64 = 100.0;

/// Convert a tablature string number (1 is the highest) to an arrangement string (0 is the lowest)
pub fn remap_string(string_count: usize, string: u8) -> Result<u8, RockTabError> {
    let index = usize::from(string);
    if index == 0 || index > string_count {
        return Err(RockTabError::InvalidString {
            string,
            string_count,
        });
    }
    Ok((string_count - index) as u8)
}

/// Note effects present in the source which are not transcribed
pub fn unsupported_features(note: &Note) -> Vec<UnsupportedFeature> {
    let effect = &note.effect;
    let mut features = Vec::new();
    if effect.slide {
        features.push(UnsupportedFeature::Slide);
    }
    if effect.hammer {
        features.push(UnsupportedFeature::HammerPull);
    }
    if effect.grace {
        features.push(UnsupportedFeature::Grace);
    }
    features
}

pub fn map_note(timing: &BeatTiming, string: u8, note: &Note) -> ArrangementNote {
    let effect = &note.effect;
    let bend_values: Vec<BendValue> = effect
        .bend
        .iter()
        .flat_map(|bend| &bend.points)
        .map(|point| BendValue {
            time: round_millis(timing.time + point.position * timing.length),
            step: f64::from(point.cents) / CENTS_PER_SEMITONE,
        })
        .collect();
    ArrangementNote {
        time: timing.time,
        string,
        fret: note.fret,
        accent: effect.accentuated_note,
        bend: !bend_values.is_empty(),
        harmonic: effect.harmonic == Some(HarmonicType::Natural),
        harmonic_pinch: effect.harmonic == Some(HarmonicType::Pinch),
        hopo: false,
        ignore: false,
        mute: note.kind == NoteType::Dead,
        palm_mute: effect.palm_mute,
        tremolo: effect.tremolo_picking,
        bend_values,
    }
}

/// Group notes struck together into a chord.
///
/// Flags marking a presence are OR-ed, flags which must hold for every note are AND-ed.
/// Bend values are not carried by chord notes.
pub fn map_chord(time: f64, mut notes: Vec<ArrangementNote>) -> Chord {
    debug_assert!(notes.len() > 1, "a chord needs at least two notes");
    for note in &mut notes {
        note.bend_values.clear();
    }
    Chord {
        time,
        accent: notes.iter().any(|n| n.accent),
        ignore: notes.iter().any(|n| n.ignore),
        palm_mute: notes.iter().all(|n| n.palm_mute),
        hopo: notes.iter().any(|n| n.hopo),
        notes,
    }
}
