use crate::RockTabError;
use serde::Serialize;

pub const SHARP_NOTES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

pub const STRING_COUNT: usize = 6;

/// Standard tuning from the lowest string, E2 A2 D3 G3 B3 E4 as MIDI keys
pub const STANDARD_TUNING: [i32; STRING_COUNT] = [40, 45, 50, 55, 59, 64];

/// Fret offset of each string against standard tuning, string 0 is the lowest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TuningOffsets(pub [i32; STRING_COUNT]);

impl TuningOffsets {
    pub const fn is_standard(&self) -> bool {
        let mut i = 0;
        while i < STRING_COUNT {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }
}

/// Convert a pitch name such as `E2`, `F#3`, `Bb1` or `E♭4` to its MIDI key number.
pub fn pitch_to_midi(name: &str) -> Result<i32, RockTabError> {
    let invalid = || RockTabError::InvalidPitch(name.to_string());
    let trimmed = name.trim();
    let mut chars = trimmed.chars();
    let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
    let mut pitch_class = SHARP_NOTES
        .iter()
        .position(|n| n.len() == 1 && n.starts_with(letter))
        .ok_or_else(invalid)? as i32;

    let rest = chars.as_str();
    let octave_start = rest
        .find(|c: char| c.is_ascii_digit() || c == '-')
        .ok_or_else(invalid)?;
    let (accidentals, octave) = rest.split_at(octave_start);
    for accidental in accidentals.chars() {
        match accidental {
            '#' | '♯' => pitch_class += 1,
            'b' | '♭' => pitch_class -= 1,
            _ => return Err(invalid()),
        }
    }
    let octave: i32 = octave.parse().map_err(|_| invalid())?;
    Ok((octave + 1) * 12 + pitch_class)
}

/// Compute the offset of every string against standard tuning.
///
/// `strings` follows the tablature order, highest string first.
pub fn tuning_offsets(strings: &[String]) -> Result<TuningOffsets, RockTabError> {
    if strings.len() != STRING_COUNT {
        return Err(RockTabError::UnsupportedStringCount(strings.len()));
    }
    let mut offsets = [0; STRING_COUNT];
    for (i, name) in strings.iter().rev().enumerate() {
        offsets[i] = pitch_to_midi(name)? - STANDARD_TUNING[i];
    }
    let offsets = TuningOffsets(offsets);
    log::debug!("Tuning offsets {:?} for {strings:?}", offsets.0);
    Ok(offsets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_pitch_to_midi() {
        assert_eq!(pitch_to_midi("C4").unwrap(), 60);
        assert_eq!(pitch_to_midi("E2").unwrap(), 40);
        assert_eq!(pitch_to_midi("F#3").unwrap(), 54);
        assert_eq!(pitch_to_midi("Gb3").unwrap(), 54);
        assert_eq!(pitch_to_midi("E♭4").unwrap(), 63);
        assert_eq!(pitch_to_midi("b3").unwrap(), 59);
        assert_eq!(pitch_to_midi("C-1").unwrap(), 0);
    }

    #[test]
    fn test_invalid_pitch() {
        for name in ["", "H2", "E", "Ex2", "E2.5"] {
            assert!(
                matches!(pitch_to_midi(name), Err(RockTabError::InvalidPitch(_))),
                "{name}"
            );
        }
    }

    #[test]
    fn test_standard_tuning_offsets() {
        let offsets = tuning_offsets(&tuning(&["E4", "B3", "G3", "D3", "A2", "E2"])).unwrap();
        assert_eq!(offsets, TuningOffsets([0; 6]));
        assert!(offsets.is_standard());
    }

    #[test]
    fn test_whole_step_down_offsets() {
        let offsets = tuning_offsets(&tuning(&["D4", "A3", "F3", "C3", "G2", "D2"])).unwrap();
        assert_eq!(offsets, TuningOffsets([-2; 6]));
        assert!(!offsets.is_standard());
    }

    #[test]
    fn test_drop_d_offsets() {
        let offsets = tuning_offsets(&tuning(&["E4", "B3", "G3", "D3", "A2", "D2"])).unwrap();
        assert_eq!(offsets, TuningOffsets([-2, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn test_seven_strings_not_supported() {
        let strings = tuning(&["E4", "B3", "G3", "D3", "A2", "E2", "B1"]);
        assert!(matches!(
            tuning_offsets(&strings),
            Err(RockTabError::UnsupportedStringCount(7))
        ));
    }
}
