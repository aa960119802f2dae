use std::fs;

use tempfile::TempDir;
use tidal_extractor::codec::{
    read_tracks, read_tracks_from, write_text_tracks_to, write_tracks, write_tracks_to,
};
use tidal_extractor::types::{ExportFormat, Track, TrackField};

fn create_test_tracks() -> Vec<Track> {
    vec![
        Track {
            id: 1,
            title: "Song, with comma".to_string(),
            artists: vec!["Artist A".to_string(), "Artist B".to_string()],
            album: "Album \"Quoted\"".to_string(),
            duration: Some(185),
        },
        Track {
            id: 2,
            title: "Second".to_string(),
            artists: vec![],
            album: "Unknown".to_string(),
            duration: None,
        },
    ]
}

#[test]
fn test_write_then_read_all_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tracks.csv");
    let tracks = create_test_tracks();

    write_tracks(&tracks, &path, None).unwrap();
    let loaded = read_tracks(&path).unwrap();

    assert_eq!(loaded, tracks);
}

#[test]
fn test_write_then_read_field_subset() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("subset.csv");
    let tracks = create_test_tracks();

    write_tracks(&tracks, &path, Some(&[TrackField::Title, TrackField::Id])).unwrap();
    let loaded = read_tracks(&path).unwrap();

    assert_eq!(loaded.len(), 2);
    for (original, read) in tracks.iter().zip(&loaded) {
        assert_eq!(read.id, original.id);
        assert_eq!(read.title, original.title);
        // excluded columns come back as defaults
        assert!(read.artists.is_empty());
        assert_eq!(read.album, "");
        assert_eq!(read.duration, None);
    }
}

#[test]
fn test_write_then_read_subsets_without_album() {
    let dir = TempDir::new().unwrap();
    let tracks = create_test_tracks();
    let subsets: [&[TrackField]; 3] = [
        &[
            TrackField::Duration,
            TrackField::Artists,
            TrackField::Title,
            TrackField::Id,
        ],
        &[TrackField::Artists, TrackField::Id, TrackField::Title],
        &[TrackField::Title, TrackField::Duration, TrackField::Id],
    ];

    for (i, fields) in subsets.iter().enumerate() {
        let path = dir.path().join(format!("subset_{}.csv", i));
        write_tracks(&tracks, &path, Some(*fields)).unwrap();
        let loaded = read_tracks(&path).unwrap();

        assert_eq!(loaded.len(), tracks.len());
        for (original, read) in tracks.iter().zip(&loaded) {
            assert_eq!(read.id, original.id);
            assert_eq!(read.title, original.title);
            assert_eq!(read.album, "");

            if fields.contains(&TrackField::Artists) {
                assert_eq!(read.artists, original.artists);
            } else {
                assert!(read.artists.is_empty());
            }

            if fields.contains(&TrackField::Duration) {
                assert_eq!(read.duration, original.duration);
            } else {
                assert_eq!(read.duration, None);
            }
        }
    }
}

#[test]
fn test_write_then_read_empty_list() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");

    write_tracks(&[], &path, None).unwrap();
    let loaded = read_tracks(&path).unwrap();

    assert!(loaded.is_empty());
}

#[test]
fn test_read_header_only_file_is_empty() {
    let tracks = read_tracks_from("id,title\n".as_bytes()).unwrap();

    assert!(tracks.is_empty());
}

#[test]
fn test_write_header_follows_field_order() {
    let mut out = Vec::new();
    write_tracks_to(
        &create_test_tracks()[1..],
        &mut out,
        Some(&[TrackField::Duration, TrackField::Id, TrackField::Title]),
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("duration,id,title"));
    assert_eq!(lines.next(), Some(",2,Second"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_write_joins_artists() {
    let mut out = Vec::new();
    write_tracks_to(
        &create_test_tracks()[..1],
        &mut out,
        Some(&[TrackField::Id, TrackField::Artists]),
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("1,\"Artist A, Artist B\""));
}

#[test]
fn test_write_empty_tracks_truncates_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "old content\n").unwrap();

    write_tracks(&[], &path, None).unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn test_write_rejects_empty_field_list() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keep.csv");
    fs::write(&path, "id,title\n1,x\n").unwrap();

    let err = write_tracks(&create_test_tracks(), &path, Some(&[])).unwrap_err();

    assert!(err.is_invalid_format());
    // the existing file is left alone
    assert_eq!(fs::read_to_string(&path).unwrap(), "id,title\n1,x\n");
}

#[test]
fn test_read_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = read_tracks(dir.path().join("missing.csv")).unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn test_read_requires_id_and_title_columns() {
    for input in ["title,album\nx,y\n", "id,album\n1,y\n"] {
        let err = read_tracks_from(input.as_bytes()).unwrap_err();

        assert!(err.is_invalid_format());
        let message = err.to_string();
        assert!(message.contains("'id'"));
        assert!(message.contains("'title'"));
    }
}

#[test]
fn test_read_rejects_non_numeric_id() {
    let err = read_tracks_from("id,title\nabc,Song\n".as_bytes()).unwrap_err();

    assert!(err.is_invalid_format());
    assert!(err.to_string().contains("id"));
    assert!(err.to_string().contains("abc"));
}

#[test]
fn test_read_rejects_non_numeric_duration() {
    let err = read_tracks_from("id,title,duration\n1,Song,3:05\n".as_bytes()).unwrap_err();

    assert!(err.is_invalid_format());
    assert!(err.to_string().contains("duration"));
}

#[test]
fn test_read_hand_written_file() {
    let input = "title,id,artists,duration\n\
                 Intro,10, A ,\n\
                 Outro,11,\"B,C\",90\n";

    let tracks = read_tracks_from(input.as_bytes()).unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].id, 10);
    assert_eq!(tracks[0].artists, vec!["A".to_string()]);
    assert_eq!(tracks[0].duration, None);
    assert_eq!(tracks[0].album, "");
    assert_eq!(tracks[1].artists, vec!["B".to_string(), "C".to_string()]);
    assert_eq!(tracks[1].duration, Some(90));
}

#[test]
fn test_write_simple_listing() {
    let mut out = Vec::new();
    write_text_tracks_to(&create_test_tracks(), &mut out, ExportFormat::Simple).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "1. [1] Song, with comma - Artist A, Artist B\n2. [2] Second - \n"
    );
}

#[test]
fn test_write_detailed_listing() {
    let mut out = Vec::new();
    write_text_tracks_to(&create_test_tracks()[1..], &mut out, ExportFormat::Detailed).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Track #1",
            "ID: 2",
            "Title: Second",
            "Artist(s): ",
            "Album: Unknown",
            "Duration: Unknown",
            "----------------------------------------",
        ]
    );
}

#[test]
fn test_write_ids_listing() {
    let mut out = Vec::new();
    write_text_tracks_to(&create_test_tracks(), &mut out, ExportFormat::Ids).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "1\n2\n");
}

#[test]
fn test_export_format_from_str() {
    assert_eq!("ids".parse::<ExportFormat>(), Ok(ExportFormat::Ids));
    assert_eq!(" Detailed ".parse::<ExportFormat>(), Ok(ExportFormat::Detailed));
    assert_eq!(ExportFormat::default(), ExportFormat::Csv);

    let err = "xml".parse::<ExportFormat>().unwrap_err();
    assert!(err.contains("csv, simple, detailed, ids"));
}
