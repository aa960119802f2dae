#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
    rc::Rc,
};

use tidal_extractor::error::ExtractorError;
use tidal_extractor::tidal::auth::AuthProvider;
use tidal_extractor::tidal::{OwnedPlaylist, PlaylistHandle, Session, TidalApi, TidalError};
use tidal_extractor::types::{TidalAlbum, TidalArtist, TidalPlaylist, TidalTrack};

/// Upstream call as seen by the mock, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FavoriteTracks,
    RemoveFavorite(u64),
    UserPlaylists,
    CreatePlaylist(String, String),
    Playlist(String),
    PlaylistTracks(String),
    Search(String, usize),
    Track(u64),
    Add(String, Vec<u64>),
    Clear(String),
    RemoveById(String, u64),
}

#[derive(Default)]
pub struct MockState {
    pub favorites: Vec<TidalTrack>,
    pub fail_favorites: bool,
    pub failing_removals: HashSet<u64>,
    pub playlists: Vec<TidalPlaylist>,
    pub owned: HashSet<String>,
    pub playlist_tracks: HashMap<String, Vec<TidalTrack>>,
    pub search_results: Vec<TidalTrack>,
    pub fail_create: bool,
    pub fail_add: bool,
    pub fail_clear: bool,
    pub calls: Vec<Call>,
}

/// In-memory stand-in for the Tidal API that records every call.
#[derive(Clone, Default)]
pub struct MockTidal {
    pub state: Rc<RefCell<MockState>>,
}

impl MockTidal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Session {
        Box::new(self.clone())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| matches(c)).count()
    }

    pub fn add_playlist(&self, uuid: &str, title: &str, tracks: Vec<TidalTrack>, owned: bool) {
        let mut state = self.state.borrow_mut();
        state.playlists.push(create_raw_playlist(uuid, title, tracks.len() as u32));
        state.playlist_tracks.insert(uuid.to_string(), tracks);
        if owned {
            state.owned.insert(uuid.to_string());
        }
    }

    pub fn tracks_of(&self, uuid: &str) -> Vec<u64> {
        self.state
            .borrow()
            .playlist_tracks
            .get(uuid)
            .map(|tracks| tracks.iter().map(|t| t.id).collect())
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

pub fn create_raw_track(id: u64, title: &str) -> TidalTrack {
    TidalTrack {
        id,
        title: title.to_string(),
        artists: vec![TidalArtist {
            id: Some(id * 10),
            name: format!("Artist {}", id),
        }],
        album: Some(TidalAlbum {
            id: Some(id * 100),
            title: Some(format!("Album {}", id)),
        }),
        duration: Some(180 + id),
    }
}

pub fn create_raw_playlist(uuid: &str, title: &str, number_of_tracks: u32) -> TidalPlaylist {
    TidalPlaylist {
        uuid: uuid.to_string(),
        title: title.to_string(),
        description: Some(format!("{} description", title)),
        number_of_tracks,
        creator: None,
    }
}

fn server_error() -> TidalError {
    TidalError::Status {
        status: 500,
        body: "internal error".to_string(),
    }
}

impl TidalApi for MockTidal {
    fn favorite_tracks(&self) -> Result<Vec<TidalTrack>, TidalError> {
        self.record(Call::FavoriteTracks);
        let state = self.state.borrow();
        if state.fail_favorites {
            return Err(server_error());
        }
        Ok(state.favorites.clone())
    }

    fn remove_favorite_track(&self, track_id: u64) -> Result<(), TidalError> {
        self.record(Call::RemoveFavorite(track_id));
        let mut state = self.state.borrow_mut();
        if state.failing_removals.contains(&track_id) {
            return Err(server_error());
        }
        state.favorites.retain(|t| t.id != track_id);
        Ok(())
    }

    fn user_playlists(&self) -> Result<Vec<TidalPlaylist>, TidalError> {
        self.record(Call::UserPlaylists);
        Ok(self.state.borrow().playlists.clone())
    }

    fn create_playlist(
        &self,
        name: &str,
        description: &str,
    ) -> Result<TidalPlaylist, TidalError> {
        self.record(Call::CreatePlaylist(
            name.to_string(),
            description.to_string(),
        ));
        if self.state.borrow().fail_create {
            return Err(server_error());
        }

        let uuid = format!("new-{}", self.state.borrow().playlists.len() + 1);
        self.add_playlist(&uuid, name, Vec::new(), true);

        let mut playlist = create_raw_playlist(&uuid, name, 0);
        playlist.description = Some(description.to_string());
        Ok(playlist)
    }

    fn playlist(&self, playlist_id: &str) -> Result<PlaylistHandle<'_>, TidalError> {
        self.record(Call::Playlist(playlist_id.to_string()));
        let state = self.state.borrow();

        let playlist = state
            .playlists
            .iter()
            .find(|p| p.uuid == playlist_id)
            .cloned()
            .ok_or_else(|| TidalError::NotFound(playlist_id.to_string()))?;

        if state.owned.contains(playlist_id) {
            Ok(PlaylistHandle::Owned(Box::new(MockOwnedPlaylist {
                mock: self.clone(),
                playlist,
            })))
        } else {
            Ok(PlaylistHandle::ReadOnly(playlist))
        }
    }

    fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<TidalTrack>, TidalError> {
        self.record(Call::PlaylistTracks(playlist_id.to_string()));
        self.state
            .borrow()
            .playlist_tracks
            .get(playlist_id)
            .cloned()
            .ok_or_else(|| TidalError::NotFound(playlist_id.to_string()))
    }

    fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<TidalTrack>, TidalError> {
        self.record(Call::Search(query.to_string(), limit));
        // ignores `limit` like an upstream that pages with its own size
        Ok(self.state.borrow().search_results.clone())
    }

    fn track(&self, track_id: u64) -> Result<TidalTrack, TidalError> {
        self.record(Call::Track(track_id));
        let state = self.state.borrow();
        let found = state
            .favorites
            .iter()
            .chain(state.search_results.iter())
            .find(|t| t.id == track_id)
            .cloned();
        found.ok_or_else(|| TidalError::NotFound(track_id.to_string()))
    }
}

pub struct MockOwnedPlaylist {
    mock: MockTidal,
    playlist: TidalPlaylist,
}

impl MockOwnedPlaylist {
    fn set_tracks(&self, tracks: Vec<TidalTrack>) {
        let mut state = self.mock.state.borrow_mut();
        let count = tracks.len() as u32;
        state
            .playlist_tracks
            .insert(self.playlist.uuid.clone(), tracks);
        if let Some(p) = state
            .playlists
            .iter_mut()
            .find(|p| p.uuid == self.playlist.uuid)
        {
            p.number_of_tracks = count;
        }
    }
}

impl OwnedPlaylist for MockOwnedPlaylist {
    fn info(&self) -> &TidalPlaylist {
        &self.playlist
    }

    fn add(&self, track_ids: &[u64]) -> Result<(), TidalError> {
        self.mock
            .record(Call::Add(self.playlist.uuid.clone(), track_ids.to_vec()));
        if self.mock.state.borrow().fail_add {
            return Err(server_error());
        }

        let mut tracks = self.mock.tracks_of_raw(&self.playlist.uuid);
        tracks.extend(track_ids.iter().map(|&id| create_raw_track(id, "added")));
        self.set_tracks(tracks);
        Ok(())
    }

    fn clear(&self) -> Result<bool, TidalError> {
        self.mock.record(Call::Clear(self.playlist.uuid.clone()));
        if self.mock.state.borrow().fail_clear {
            return Err(server_error());
        }

        self.set_tracks(Vec::new());
        Ok(true)
    }

    fn remove_by_id(&self, track_id: u64) -> Result<(), TidalError> {
        self.mock
            .record(Call::RemoveById(self.playlist.uuid.clone(), track_id));

        let mut tracks = self.mock.tracks_of_raw(&self.playlist.uuid);
        let index = tracks
            .iter()
            .position(|t| t.id == track_id)
            .ok_or_else(|| TidalError::NotFound(track_id.to_string()))?;
        tracks.remove(index);
        self.set_tracks(tracks);
        Ok(())
    }
}

impl MockTidal {
    fn tracks_of_raw(&self, uuid: &str) -> Vec<TidalTrack> {
        self.state
            .borrow()
            .playlist_tracks
            .get(uuid)
            .cloned()
            .unwrap_or_default()
    }
}

/// Auth provider that hands out a mock session, or fails when it has none.
#[derive(Default)]
pub struct MockAuth {
    pub mock: Option<MockTidal>,
    pub attempts: Rc<Cell<u32>>,
}

impl MockAuth {
    pub fn connected(mock: &MockTidal) -> Self {
        Self {
            mock: Some(mock.clone()),
            attempts: Rc::default(),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }
}

impl AuthProvider for MockAuth {
    fn connect(&self) -> Result<Session, ExtractorError> {
        self.attempts.set(self.attempts.get() + 1);
        match &self.mock {
            Some(mock) => Ok(mock.session()),
            None => Err(ExtractorError::Config(
                "TIDAL_CLIENT_ID must be set".to_string(),
            )),
        }
    }
}
