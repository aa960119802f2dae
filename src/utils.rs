use chrono::Local;

use crate::types::{Track, TrackField, TrackTableRow};

pub fn format_duration(seconds: Option<u64>) -> String {
    match seconds {
        Some(total) => format!("{}:{:02}", total / 60, total % 60),
        None => "Unknown".to_string(),
    }
}

pub fn parse_csv_fields(s: &str) -> Result<Vec<TrackField>, String> {
    let fields = s
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse::<TrackField>)
        .collect::<Result<Vec<_>, _>>()?;

    if fields.is_empty() {
        return Err("At least one field is required".to_string());
    }

    Ok(fields)
}

pub fn join_artists(artists: &[String]) -> String {
    artists.join(", ")
}

pub fn split_artists(value: &str) -> Vec<String> {
    if value.trim().is_empty() {
        return Vec::new();
    }

    value.split(',').map(|a| a.trim().to_string()).collect()
}

/// Case-insensitive substring match over title, any artist and album.
pub fn matches_query(track: &Track, query: &str) -> bool {
    let needle = query.to_lowercase();

    track.title.to_lowercase().contains(&needle)
        || track
            .artists
            .iter()
            .any(|artist| artist.to_lowercase().contains(&needle))
        || track.album.to_lowercase().contains(&needle)
}

pub fn filter_tracks(tracks: &[Track], query: &str) -> Vec<Track> {
    tracks
        .iter()
        .filter(|t| matches_query(t, query))
        .cloned()
        .collect()
}

pub fn track_table_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            index: i + 1,
            id: t.id,
            title: t.title.clone(),
            artists: join_artists(&t.artists),
            album: t.album.clone(),
            duration: format_duration(t.duration),
        })
        .collect()
}

pub fn ensure_csv_extension(filename: &str) -> String {
    if filename.ends_with(".csv") {
        filename.to_string()
    } else {
        format!("{}.csv", filename)
    }
}

pub fn default_export_filename(prefix: &str) -> String {
    let safe_prefix: String = prefix
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();

    format!(
        "{}_{}.csv",
        safe_prefix,
        Local::now().format("%Y%m%d_%H%M%S")
    )
}
