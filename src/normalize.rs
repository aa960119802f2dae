//! Conversion of raw Tidal records into the crate's domain entities.
//!
//! Normalization never fails: missing optional data degrades to a defined
//! default. A track without an album reference (or with an album that carries
//! no title) gets the album [`UNKNOWN_ALBUM`]; a missing duration stays absent
//! rather than becoming zero.

use crate::types::{Playlist, TidalPlaylist, TidalTrack, Track};

/// Album value used when the upstream record has no album reference.
pub const UNKNOWN_ALBUM: &str = "Unknown";

pub fn normalize_track(raw: &TidalTrack) -> Track {
    Track {
        id: raw.id,
        title: raw.title.clone(),
        artists: raw.artists.iter().map(|a| a.name.clone()).collect(),
        album: raw
            .album
            .as_ref()
            .and_then(|album| album.title.clone())
            .unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
        duration: raw.duration,
    }
}

pub fn normalize_tracks(raw: &[TidalTrack]) -> Vec<Track> {
    raw.iter().map(normalize_track).collect()
}

pub fn normalize_playlist(raw: &TidalPlaylist) -> Playlist {
    Playlist {
        id: raw.uuid.clone(),
        name: raw.title.clone(),
        description: raw.description.clone().unwrap_or_default(),
    }
}

impl From<&TidalTrack> for Track {
    fn from(raw: &TidalTrack) -> Self {
        normalize_track(raw)
    }
}

impl From<&TidalPlaylist> for Playlist {
    fn from(raw: &TidalPlaylist) -> Self {
        normalize_playlist(raw)
    }
}
