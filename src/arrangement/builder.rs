use crate::arrangement::metadata::ArrangementMetadata;
use crate::arrangement::note_mapper::{map_chord, map_note, remap_string, unsupported_features};
use crate::arrangement::timing::{beat_grid_offsets, measure_fraction, BeatTiming};
use crate::arrangement::types::{
    Arrangement, ArrangementNote, Chord, Diagnostics, EBeat, Section, ToneChange,
    UnsupportedFeature, BASE_TONE, NOT_A_DOWNBEAT,
};
use crate::sync::time_table::TimeTable;
use crate::tab::song::{Beat, Measure, MeasureHeader, Song, TimeSignature, Track};
use crate::tab::tuning::{tuning_offsets, TuningOffsets};
use crate::RockTabError;
use std::collections::BTreeMap;

/// Tone names in order of first use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneTable {
    names: Vec<String>,
}

impl Default for ToneTable {
    fn default() -> Self {
        Self {
            names: vec![BASE_TONE.to_string()],
        }
    }
}

impl ToneTable {
    /// Index of the tone, appended if never seen before
    pub fn resolve(&mut self, name: &str) -> usize {
        if let Some(id) = self.names.iter().position(|n| n == name) {
            id
        } else {
            self.names.push(name.to_string());
            self.names.len() - 1
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Everything accumulated while walking the measures
#[derive(Debug, Default)]
struct PassState {
    measure_position: f64,
    time_signature: Option<TimeSignature>,
    ebeats: Vec<EBeat>,
    sections: Vec<Section>,
    tone_table: ToneTable,
    tones: Vec<ToneChange>,
    notes: Vec<ArrangementNote>,
    chords: Vec<Chord>,
    unsupported: BTreeMap<UnsupportedFeature, usize>,
}

impl PassState {
    fn new(time_signature: Option<TimeSignature>) -> Self {
        Self {
            time_signature,
            ..Default::default()
        }
    }

    fn record_unsupported(&mut self, feature: UnsupportedFeature) {
        *self.unsupported.entry(feature).or_default() += 1;
    }

    fn finish(
        self,
        metadata: ArrangementMetadata,
        tuning: TuningOffsets,
        time_table: &TimeTable,
    ) -> Arrangement {
        for (feature, count) in &self.unsupported {
            log::warn!("{feature:?} not supported, {count} occurrences left out");
        }
        Arrangement {
            metadata,
            tuning,
            tone_names: self.tone_table.names,
            tones: self.tones,
            ebeats: self.ebeats,
            sections: self.sections,
            notes: self.notes,
            chords: self.chords,
            diagnostics: Diagnostics {
                sync_anomalies: time_table.anomalies().to_vec(),
                unsupported: self.unsupported,
            },
        }
    }
}

/// Single forward pass over a track producing its time-stamped arrangement
pub struct ArrangementBuilder<'a> {
    song: &'a Song,
    track: &'a Track,
    time_table: &'a TimeTable,
    initial_time_signature: Option<TimeSignature>,
}

impl<'a> ArrangementBuilder<'a> {
    pub fn new(
        song: &'a Song,
        track_index: usize,
        time_table: &'a TimeTable,
    ) -> Result<Self, RockTabError> {
        let track = song
            .tracks
            .get(track_index)
            .ok_or(RockTabError::TrackNotFound(track_index))?;
        Ok(Self {
            song,
            track,
            time_table,
            initial_time_signature: None,
        })
    }

    /// Time signature in effect until the first measure declaring one
    #[must_use]
    pub const fn with_time_signature(mut self, time_signature: TimeSignature) -> Self {
        self.initial_time_signature = Some(time_signature);
        self
    }

    pub fn build(&self) -> Result<Arrangement, RockTabError> {
        let tuning = tuning_offsets(&self.track.strings)?;
        let headers = &self.song.measure_headers;
        let measures = &self.track.measures;
        if measures.len() != headers.len() {
            return Err(RockTabError::MeasureCountMismatch {
                measures: measures.len(),
                headers: headers.len(),
            });
        }
        log::debug!(
            "Building arrangement for track '{}' with {} measures",
            self.track.name,
            measures.len()
        );

        let mut state = PassState::new(self.initial_time_signature);
        for (measure_index, (measure, header)) in measures.iter().zip(headers).enumerate() {
            self.add_measure(&mut state, measure_index, measure, header)?;
        }

        let metadata = ArrangementMetadata::new(self.song, self.track);
        Ok(state.finish(metadata, tuning, self.time_table))
    }

    fn add_measure(
        &self,
        state: &mut PassState,
        measure_index: usize,
        measure: &Measure,
        header: &MeasureHeader,
    ) -> Result<(), RockTabError> {
        log::debug!("--------");
        log::debug!(
            "Measure {} at position {}",
            measure_index + 1,
            state.measure_position
        );
        if let Some(time_signature) = header.time_signature {
            log::debug!("Time signature change to {time_signature}");
            state.time_signature = Some(time_signature);
        }
        let time_signature = state
            .time_signature
            .ok_or(RockTabError::MissingTimeSignature(measure_index + 1))?;

        self.add_beat_grid(state, measure_index, &time_signature)?;
        self.add_section(state, header);
        if let Some(voice) = measure.primary_voice() {
            self.add_beats(state, &voice.beats, &time_signature)?;
        }

        state.measure_position += 1.0;
        Ok(())
    }

    fn add_beat_grid(
        &self,
        state: &mut PassState,
        measure_index: usize,
        time_signature: &TimeSignature,
    ) -> Result<(), RockTabError> {
        for (i, offset) in beat_grid_offsets(time_signature)?.into_iter().enumerate() {
            let measure = if i == 0 {
                measure_index as i32 + 1
            } else {
                NOT_A_DOWNBEAT
            };
            state.ebeats.push(EBeat {
                time: self.time_table.lookup(state.measure_position + offset),
                measure,
            });
        }
        Ok(())
    }

    fn add_section(&self, state: &mut PassState, header: &MeasureHeader) {
        if let Some(marker) = &header.marker {
            let section = Section {
                name: marker.title.clone(),
                number: state.sections.len() + 1,
                start_time: self.time_table.lookup(state.measure_position),
            };
            log::debug!("Section {section:?}");
            state.sections.push(section);
        }
    }

    fn add_beats(
        &self,
        state: &mut PassState,
        beats: &[Beat],
        time_signature: &TimeSignature,
    ) -> Result<(), RockTabError> {
        let mut offset = 0.0;
        for beat in beats {
            let position = state.measure_position + offset;
            let fraction = measure_fraction(&beat.duration, time_signature)?;
            let timing = BeatTiming::new(
                self.time_table.lookup(position),
                self.time_table.read(position + fraction) - self.time_table.read(position),
            );

            // an empty beat text is not a tone change
            if let Some(text) = beat.text.as_deref().filter(|t| !t.is_empty()) {
                let id = state.tone_table.resolve(text);
                log::debug!("Tone change to '{text}' ({id}) at {}", timing.time);
                state.tones.push(ToneChange {
                    id,
                    time: timing.time,
                });
            }

            self.add_notes(state, beat, &timing)?;
            offset += fraction;
        }
        Ok(())
    }

    fn add_notes(
        &self,
        state: &mut PassState,
        beat: &Beat,
        timing: &BeatTiming,
    ) -> Result<(), RockTabError> {
        let string_count = self.track.strings.len();
        let mut notes = Vec::with_capacity(beat.notes.len());
        for note in &beat.notes {
            for feature in unsupported_features(note) {
                state.record_unsupported(feature);
            }
            let string = remap_string(string_count, note.string)?;
            notes.push(map_note(timing, string, note));
        }

        match notes.len() {
            0 => {}
            1 => state.notes.append(&mut notes),
            _ => {
                if notes.iter().any(|n| !n.bend_values.is_empty()) {
                    state.record_unsupported(UnsupportedFeature::ChordBend);
                }
                state.chords.push(map_chord(timing.time, notes));
            }
        }
        Ok(())
    }
}
