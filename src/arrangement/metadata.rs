use crate::tab::song::{Song, Track};
use serde::Serialize;

const SORT_ARTICLES: [&str; 3] = ["the", "a", "an"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrangementMetadata {
    pub title: String,
    pub song_name_sort: String,
    /// Name of the source track
    pub arrangement: String,
    pub artist_name: String,
    pub artist_name_sort: String,
    pub album_name: String,
    pub album_name_sort: String,
    pub album_year: i32,
    pub internal_name: String,
    pub average_tempo: u32,
    pub capo: u8,
}

impl ArrangementMetadata {
    pub fn new(song: &Song, track: &Track) -> Self {
        let info = &song.song_info;
        ArrangementMetadata {
            title: info.name.clone(),
            song_name_sort: sortable_name(&info.name),
            arrangement: track.name.clone(),
            artist_name: info.artist.clone(),
            artist_name_sort: sortable_name(&info.artist),
            album_name: info.album.clone(),
            album_name_sort: sortable_name(&info.album),
            album_year: album_year(&info.copyright),
            internal_name: internal_name(&info.artist, &info.name),
            average_tempo: song.tempo.value,
            capo: track.capo,
        }
    }
}

/// Drop a leading article and capitalize: "the rolling stones" -> "Rolling stones"
pub fn sortable_name(name: &str) -> String {
    let mut stripped = name;
    if let Some((first, rest)) = name.split_once(char::is_whitespace) {
        if SORT_ARTICLES.iter().any(|a| a.eq_ignore_ascii_case(first)) {
            stripped = rest.trim_start();
        }
    }
    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Alphanumeric artist and title joined by an underscore
pub fn internal_name(artist: &str, title: &str) -> String {
    let keep = |s: &str| -> String { s.chars().filter(char::is_ascii_alphanumeric).collect() };
    format!("{}_{}", keep(artist), keep(title))
}

/// Year from the leading digits of a copyright notice, 0 when there are none
pub fn album_year(copyright: &str) -> i32 {
    let digits: String = copyright
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}
