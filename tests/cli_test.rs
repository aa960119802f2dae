mod common;

use std::fs;

use common::{Call, MockAuth, MockTidal, create_raw_track};
use tempfile::TempDir;
use tidal_extractor::cli::{
    self, ExportTarget, MenuAction, export_or_print, load_track_ids, parse_choice,
};
use tidal_extractor::extractor::Extractor;
use tidal_extractor::types::ExportFormat;

fn create_extractor(mock: &MockTidal) -> Extractor<MockAuth> {
    Extractor::with_auth(MockAuth::connected(mock), true)
}

#[test]
fn test_parse_choice_bounds() {
    assert_eq!(parse_choice("1", 3), Some(0));
    assert_eq!(parse_choice(" 3 ", 3), Some(2));
    assert_eq!(parse_choice("0", 3), None);
    assert_eq!(parse_choice("4", 3), None);
    assert_eq!(parse_choice("two", 3), None);
    assert_eq!(parse_choice("1", 0), None);
}

#[test]
fn test_menu_action_from_str() {
    assert_eq!("1".parse::<MenuAction>(), Ok(MenuAction::ViewFavorites));
    assert_eq!("9".parse::<MenuAction>(), Ok(MenuAction::Exit));
    assert!("10".parse::<MenuAction>().is_err());
    assert!("exit".parse::<MenuAction>().is_err());
}

#[test]
fn test_menu_labels_are_unique() {
    let mut labels: Vec<&str> = MenuAction::ALL.iter().map(MenuAction::label).collect();
    labels.sort();
    labels.dedup();
    assert_eq!(labels.len(), MenuAction::ALL.len());
}

#[test]
fn test_load_track_ids_keeps_file_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("order.csv");
    fs::write(&path, "id,title\n3,c\n1,a\n2,b\n").unwrap();
    let extractor = Extractor::with_auth(MockAuth::failing(), true);

    let ids = load_track_ids(&extractor, &path).unwrap();

    assert_eq!(ids, vec!["3", "1", "2"]);
}

#[test]
fn test_load_track_ids_header_only_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("header.csv");
    fs::write(&path, "id,title\n").unwrap();
    let extractor = Extractor::with_auth(MockAuth::failing(), true);

    let err = load_track_ids(&extractor, &path).unwrap_err();

    assert!(err.is_no_tracks());
    assert!(err.to_string().contains("header.csv"));
}

#[test]
fn test_reorder_from_header_only_csv_leaves_playlist_alone() {
    let mock = MockTidal::new();
    mock.add_playlist(
        "p1",
        "Mine",
        vec![create_raw_track(1, "a"), create_raw_track(2, "b")],
        true,
    );
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("header.csv");
    fs::write(&path, "id,title\n").unwrap();
    let mut extractor = create_extractor(&mock);

    cli::playlist_reorder(&mut extractor, "p1", &path, true);

    assert!(mock.calls().is_empty());
    assert_eq!(mock.tracks_of("p1"), vec![1, 2]);
}

#[test]
fn test_reorder_from_csv() {
    let mock = MockTidal::new();
    mock.add_playlist(
        "p1",
        "Mine",
        vec![create_raw_track(1, "a"), create_raw_track(2, "b")],
        true,
    );
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("order.csv");
    fs::write(&path, "id,title\n2,b\n1,a\n").unwrap();
    let mut extractor = create_extractor(&mock);

    cli::playlist_reorder(&mut extractor, "p1", &path, true);

    assert_eq!(mock.tracks_of("p1"), vec![2, 1]);
}

#[test]
fn test_empty_favorites_when_already_empty() {
    let mock = MockTidal::new();
    let mut extractor = create_extractor(&mock);

    cli::empty_favorites(&mut extractor, true);

    assert_eq!(mock.calls(), vec![Call::FavoriteTracks]);
}

#[test]
fn test_empty_favorites_with_force() {
    let mock = MockTidal::new();
    mock.state.borrow_mut().favorites = vec![create_raw_track(1, "a"), create_raw_track(2, "b")];
    let mut extractor = create_extractor(&mock);

    cli::empty_favorites(&mut extractor, true);

    assert!(mock.state.borrow().favorites.is_empty());
    assert_eq!(mock.count(|c| matches!(c, Call::RemoveFavorite(_))), 2);
}

#[test]
fn test_export_to_ids_file() {
    let mock = MockTidal::new();
    mock.state.borrow_mut().favorites = vec![create_raw_track(7, "a"), create_raw_track(9, "b")];
    let mut extractor = create_extractor(&mock);
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ids.txt");

    let tracks = extractor.get_favorite_tracks();
    let target = ExportTarget {
        output: Some(path.as_path()),
        fields: None,
        format: ExportFormat::Ids,
    };
    export_or_print(&extractor, &tracks, "Favorites", &target);

    assert_eq!(fs::read_to_string(&path).unwrap(), "7\n9\n");
}
