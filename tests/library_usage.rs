//! Integration tests for rocktab library usage.
//!
//! These tests verify that the library can be used as a dependency
//! from external projects.

use rocktab::{
    convert, parse_song_json, parse_sync_data, Arrangement, ArrangementBuilder, RockTabError,
    Song, TimeTable, UnsupportedFeature, NOT_A_DOWNBEAT,
};
use std::io::Read;

fn read_test_file(path: &str) -> Vec<u8> {
    let mut file = std::fs::File::open(path).expect("Failed to open test file");
    let mut file_data: Vec<u8> = vec![];
    file.read_to_end(&mut file_data)
        .expect("Failed to read test file");
    file_data
}

fn demo_song() -> Song {
    parse_song_json(&read_test_file("test-files/demo_song.json")).expect("Failed to parse song")
}

fn demo_sync() -> String {
    String::from_utf8(read_test_file("test-files/demo_sync.txt")).expect("Invalid UTF-8")
}

fn demo_arrangement() -> Arrangement {
    convert(&demo_song(), 0, &demo_sync()).expect("Failed to convert demo song")
}

/// Test that all major types are accessible from the library.
#[test]
fn test_types_accessible() {
    // If any re-export is missing, this test will fail to compile.
    fn _assert_types() {
        let _: fn(&[u8]) -> Result<Song, RockTabError> = parse_song_json;
        let _: fn(&Song, usize, &str) -> Result<Arrangement, RockTabError> = convert;
        let _: i32 = NOT_A_DOWNBEAT;
    }
}

#[test]
fn test_sync_data_deduplicated() {
    let points = parse_sync_data(&demo_sync()).unwrap();
    assert_eq!(points.len(), 6);
    let table = TimeTable::build(points).unwrap();
    assert_eq!(table.points().len(), 5);
    assert!(table.anomalies().is_empty());
    assert_eq!(table.lookup(3.5), 6.25);
}

#[test]
fn test_demo_beat_grid() {
    let arrangement = demo_arrangement();
    let times: Vec<f64> = arrangement.ebeats.iter().map(|b| b.time).collect();
    assert_eq!(
        times,
        vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 5.5, 6.0, 6.5]
    );
    let downbeats: Vec<(i32, f64)> = arrangement
        .ebeats
        .iter()
        .filter(|b| b.is_downbeat())
        .map(|b| (b.measure, b.time))
        .collect();
    assert_eq!(downbeats, vec![(1, 0.0), (2, 2.0), (3, 4.0), (4, 5.5)]);
}

#[test]
fn test_demo_notes_and_chords() {
    let arrangement = demo_arrangement();
    let notes: Vec<(f64, u8, u8)> = arrangement
        .notes
        .iter()
        .map(|n| (n.time, n.string, n.fret))
        .collect();
    assert_eq!(
        notes,
        vec![
            (0.0, 0, 0),
            (0.5, 1, 3),
            (3.0, 5, 0),
            (3.25, 4, 12),
            (3.5, 3, 7),
            (4.0, 0, 5),
            (4.5, 0, 7),
            (5.0, 0, 9),
        ]
    );
    assert!(arrangement.notes[1].accent);
    assert!(arrangement.notes[2].mute);
    assert!(arrangement.notes[3].harmonic);
    assert!(arrangement.notes[5].harmonic_pinch);

    let bent = &arrangement.notes[4];
    assert!(bent.bend);
    let bend: Vec<(f64, f64)> = bent.bend_values.iter().map(|b| (b.time, b.step)).collect();
    assert_eq!(bend, vec![(3.5, 0.0), (3.75, 1.0)]);

    let chords: Vec<(f64, usize, bool)> = arrangement
        .chords
        .iter()
        .map(|c| (c.time, c.notes.len(), c.palm_mute))
        .collect();
    assert_eq!(chords, vec![(1.0, 2, false), (2.0, 3, true), (5.5, 2, false)]);
}

#[test]
fn test_demo_sections_and_tones() {
    let arrangement = demo_arrangement();
    let sections: Vec<(&str, usize, f64)> = arrangement
        .sections
        .iter()
        .map(|s| (s.name.as_str(), s.number, s.start_time))
        .collect();
    assert_eq!(sections, vec![("Intro", 1, 0.0), ("Verse", 2, 4.0)]);

    assert_eq!(arrangement.tone_names, vec!["ToneBase", "Clean", "Drive"]);
    let tones: Vec<(usize, f64)> = arrangement.tones.iter().map(|t| (t.id, t.time)).collect();
    assert_eq!(tones, vec![(1, 0.0), (2, 4.0), (1, 5.5)]);
    assert_eq!(arrangement.tone_slots(), ["Clean", "Drive", "", ""]);
}

#[test]
fn test_demo_metadata_and_diagnostics() {
    let arrangement = demo_arrangement();
    let metadata = &arrangement.metadata;
    assert_eq!(metadata.title, "The Demo Song");
    assert_eq!(metadata.song_name_sort, "Demo song");
    assert_eq!(metadata.artist_name_sort, "Examples");
    assert_eq!(metadata.album_name_sort, "Test album");
    assert_eq!(metadata.album_year, 2014);
    assert_eq!(metadata.internal_name, "TheExamples_TheDemoSong");
    assert_eq!(metadata.average_tempo, 120);
    assert!(arrangement.tuning.is_standard());

    let diagnostics = &arrangement.diagnostics;
    assert!(diagnostics.sync_anomalies.is_empty());
    assert_eq!(diagnostics.unsupported.len(), 1);
    assert_eq!(diagnostics.unsupported[&UnsupportedFeature::Slide], 1);
}

#[test]
fn test_arrangement_serializes() {
    let arrangement = demo_arrangement();
    let json = serde_json::to_value(&arrangement).expect("Failed to serialize");
    assert_eq!(json["ebeats"].as_array().map(Vec::len), Some(14));
    assert_eq!(json["metadata"]["arrangement"], "Lead");
    assert_eq!(json["tuning"], serde_json::json!([0, 0, 0, 0, 0, 0]));
    assert_eq!(json["diagnostics"]["unsupported"]["Slide"], 1);
}

#[test]
fn test_builder_matches_convert() {
    let song = demo_song();
    let table = TimeTable::build(parse_sync_data(&demo_sync()).unwrap()).unwrap();
    let arrangement = ArrangementBuilder::new(&song, 0, &table)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(arrangement, demo_arrangement());
}

/// Test error handling for invalid data.
#[test]
fn test_invalid_inputs() {
    let song = demo_song();
    assert!(matches!(
        convert(&song, 0, "#0;0;zero;1"),
        Err(RockTabError::InvalidSyncData(_))
    ));
    assert!(matches!(
        convert(&song, 0, "no records"),
        Err(RockTabError::InvalidSyncData(_))
    ));
    assert!(matches!(
        convert(&song, 3, &demo_sync()),
        Err(RockTabError::TrackNotFound(3))
    ));
    assert!(matches!(
        parse_song_json(&[0u8; 10]),
        Err(RockTabError::ParsingError(_))
    ));
}
