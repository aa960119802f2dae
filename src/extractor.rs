//! Session-oriented facade over authentication, collection and CSV I/O.
//!
//! An [`Extractor`] connects lazily: the first data call runs the
//! [`AuthProvider`] and keeps the resulting session for the rest of the
//! process. When connecting fails, reads return an empty result and
//! mutations return `false`, the same way upstream failures degrade inside
//! the [`Collector`].

use std::path::Path;

use tabled::Table;

use crate::{
    codec,
    collector::Collector,
    error::ExtractorError,
    progress::{ProgressReporter, reporter_for},
    tidal::auth::{AuthProvider, DeviceAuthProvider},
    types::{ExportFormat, Playlist, PlaylistTableRow, Track, TrackField},
    utils,
};

pub struct Extractor<A: AuthProvider = DeviceAuthProvider> {
    auth: A,
    silent: bool,
    console: Box<dyn ProgressReporter>,
    collector: Option<Collector>,
}

impl Extractor {
    /// Creates an extractor that logs in through the Tidal device flow.
    pub fn new(silent: bool) -> Self {
        Self::with_auth(DeviceAuthProvider::new(silent), silent)
    }
}

impl<A: AuthProvider> Extractor<A> {
    pub fn with_auth(auth: A, silent: bool) -> Self {
        Self {
            auth,
            silent,
            console: reporter_for(silent),
            collector: None,
        }
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Status output for command handlers; a no-op in silent mode.
    pub fn console(&self) -> &dyn ProgressReporter {
        self.console.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.collector.is_some()
    }

    /// Authenticates unless a session is already held.
    ///
    /// # Errors
    ///
    /// Returns whatever the auth provider reports: missing configuration,
    /// a rejected or expired device login, or a network failure.
    pub fn connect(&mut self) -> Result<(), ExtractorError> {
        if self.collector.is_some() {
            return Ok(());
        }

        let session = self.auth.connect()?;
        self.collector = Some(Collector::new(session, reporter_for(self.silent)));
        Ok(())
    }

    fn collector(&mut self) -> Option<&Collector> {
        if let Err(e) = self.connect() {
            tracing::warn!(error = %e, "failed to connect to Tidal");
            return None;
        }
        self.collector.as_ref()
    }

    pub fn get_favorite_tracks(&mut self) -> Vec<Track> {
        self.collector()
            .map(Collector::get_favorite_tracks)
            .unwrap_or_default()
    }

    pub fn get_playlists(&mut self) -> Vec<Playlist> {
        self.collector()
            .map(Collector::get_playlists)
            .unwrap_or_default()
    }

    pub fn get_playlist_tracks(&mut self, playlist_id: &str) -> Vec<Track> {
        self.collector()
            .map(|c| c.get_playlist_tracks(playlist_id))
            .unwrap_or_default()
    }

    /// Tracks of every playlist of the user, concatenated in playlist order.
    pub fn get_all_playlist_tracks(&mut self) -> Vec<Track> {
        let Some(collector) = self.collector() else {
            return Vec::new();
        };

        collector
            .get_playlists()
            .iter()
            .flat_map(|p| collector.get_playlist_tracks(&p.id))
            .collect()
    }

    pub fn search_tracks(&mut self, query: &str, limit: usize) -> Vec<Track> {
        self.collector()
            .map(|c| c.search_tracks(query, limit))
            .unwrap_or_default()
    }

    pub fn get_track_by_id(&mut self, track_id: &str) -> Option<Track> {
        self.collector().and_then(|c| c.get_track_by_id(track_id))
    }

    pub fn create_playlist(&mut self, name: &str, description: &str) -> Option<Playlist> {
        self.collector()
            .and_then(|c| c.create_playlist(name, description))
    }

    pub fn add_tracks_to_playlist<S: AsRef<str>>(
        &mut self,
        playlist_id: &str,
        track_ids: &[S],
    ) -> bool {
        self.collector()
            .is_some_and(|c| c.add_tracks_to_playlist(playlist_id, track_ids))
    }

    pub fn remove_track_from_playlist(&mut self, playlist_id: &str, track_id: &str) -> bool {
        self.collector()
            .is_some_and(|c| c.remove_track_from_playlist(playlist_id, track_id))
    }

    pub fn clear_playlist(&mut self, playlist_id: &str) -> bool {
        self.collector()
            .is_some_and(|c| c.clear_playlist(playlist_id))
    }

    pub fn reorder_playlist<S: AsRef<str>>(
        &mut self,
        playlist_id: &str,
        ordered_track_ids: &[S],
    ) -> bool {
        self.collector()
            .is_some_and(|c| c.reorder_playlist(playlist_id, ordered_track_ids))
    }

    pub fn empty_favorites(&mut self) -> bool {
        self.collector()
            .is_some_and(Collector::remove_all_favorite_tracks)
    }

    /// Renders `tracks` as a table. Does nothing in silent mode.
    pub fn print_tracks(&self, tracks: &[Track], title: &str) {
        if self.silent {
            return;
        }

        println!("\n{} ({} tracks)", title, tracks.len());
        if tracks.is_empty() {
            println!("No tracks found.");
            return;
        }

        println!("{}", Table::new(utils::track_table_rows(tracks)));
    }

    pub fn print_playlists(&self, playlists: &[Playlist]) {
        if self.silent {
            return;
        }

        println!("\nYour Playlists ({})", playlists.len());
        if playlists.is_empty() {
            println!("No playlists found.");
            return;
        }

        let rows: Vec<PlaylistTableRow> = playlists
            .iter()
            .enumerate()
            .map(|(i, p)| PlaylistTableRow {
                index: i + 1,
                id: p.id.clone(),
                name: p.name.clone(),
                description: p.description.clone(),
            })
            .collect();

        println!("{}", Table::new(rows));
    }

    pub fn save_tracks<P: AsRef<Path>>(
        &self,
        tracks: &[Track],
        path: P,
        fields: Option<&[TrackField]>,
    ) -> Result<(), ExtractorError> {
        codec::write_tracks(tracks, path, fields)
    }

    /// Writes `tracks` in `format`; `fields` only applies to CSV.
    pub fn export_tracks<P: AsRef<Path>>(
        &self,
        tracks: &[Track],
        path: P,
        fields: Option<&[TrackField]>,
        format: ExportFormat,
    ) -> Result<(), ExtractorError> {
        match format {
            ExportFormat::Csv => codec::write_tracks(tracks, path, fields),
            _ => codec::write_text_tracks(tracks, path, format),
        }
    }

    pub fn load_tracks<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Track>, ExtractorError> {
        codec::read_tracks(path)
    }
}
