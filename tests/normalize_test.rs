use tidal_extractor::normalize::*;
use tidal_extractor::types::{
    TidalAlbum, TidalArtist, TidalCreator, TidalPlaylist, TidalTrack, Track,
};

fn create_raw_track(id: u64, title: &str) -> TidalTrack {
    TidalTrack {
        id,
        title: title.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_normalize_track_full_record() {
    let raw = TidalTrack {
        id: 77,
        title: "Teardrop".to_string(),
        artists: vec![
            TidalArtist {
                id: Some(1),
                name: "Massive Attack".to_string(),
            },
            TidalArtist {
                id: None,
                name: "Elizabeth Fraser".to_string(),
            },
        ],
        album: Some(TidalAlbum {
            id: Some(9),
            title: Some("Mezzanine".to_string()),
        }),
        duration: Some(330),
    };

    let track = normalize_track(&raw);
    assert_eq!(
        track,
        Track {
            id: 77,
            title: "Teardrop".to_string(),
            artists: vec!["Massive Attack".to_string(), "Elizabeth Fraser".to_string()],
            album: "Mezzanine".to_string(),
            duration: Some(330),
        }
    );
}

#[test]
fn test_normalize_track_defaults() {
    let track = normalize_track(&create_raw_track(5, "Untitled"));

    assert_eq!(track.album, UNKNOWN_ALBUM);
    assert_eq!(track.album, "Unknown");
    assert_eq!(track.duration, None);
    assert!(track.artists.is_empty());
}

#[test]
fn test_normalize_track_album_without_title() {
    let mut raw = create_raw_track(6, "B-Side");
    raw.album = Some(TidalAlbum {
        id: Some(3),
        title: None,
    });

    assert_eq!(normalize_track(&raw).album, "Unknown");
}

#[test]
fn test_normalize_track_zero_duration_is_kept() {
    let mut raw = create_raw_track(7, "Silence");
    raw.duration = Some(0);

    assert_eq!(normalize_track(&raw).duration, Some(0));
}

#[test]
fn test_normalize_track_from_json() {
    // Tidal omits album and duration on some catalogue entries
    let raw: TidalTrack = serde_json::from_str(
        r#"{"id": 123, "title": "Live Edit", "artists": [{"id": 4, "name": "Someone"}], "album": null}"#,
    )
    .unwrap();

    let track = Track::from(&raw);
    assert_eq!(track.id, 123);
    assert_eq!(track.artists, vec!["Someone".to_string()]);
    assert_eq!(track.album, "Unknown");
    assert_eq!(track.duration, None);
}

#[test]
fn test_normalize_tracks_keeps_order() {
    let raw = vec![create_raw_track(3, "c"), create_raw_track(1, "a")];
    let ids: Vec<u64> = normalize_tracks(&raw).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

#[test]
fn test_normalize_playlist() {
    let raw = TidalPlaylist {
        uuid: "abc-123".to_string(),
        title: "Road Trip".to_string(),
        description: None,
        number_of_tracks: 12,
        creator: Some(TidalCreator { id: Some(1) }),
    };

    let playlist = normalize_playlist(&raw);
    assert_eq!(playlist.id, "abc-123");
    assert_eq!(playlist.name, "Road Trip");
    assert_eq!(playlist.description, "");
}
