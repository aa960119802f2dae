//! Data collection and bulk-operation bookkeeping.
//!
//! The [`Collector`] is the only place that talks to the upstream
//! [`Session`]. Every method catches upstream failures at this boundary:
//! reads degrade to an empty result, lookups to `None`, and mutations to
//! `false`. Failures are logged through `tracing` and never propagated.
//!
//! Bulk operations run sequentially. Partial failures are not retried or
//! rolled back; they are reported through the returned boolean.

use tracing::warn;

use crate::{
    normalize::{normalize_playlist, normalize_track, normalize_tracks},
    progress::{ProgressReporter, SilentReporter},
    tidal::{PlaylistHandle, Session, TidalError},
    types::{Playlist, Track},
};

pub struct Collector {
    session: Session,
    reporter: Box<dyn ProgressReporter>,
}

impl Collector {
    pub fn new(session: Session, reporter: Box<dyn ProgressReporter>) -> Self {
        Self { session, reporter }
    }

    pub fn silent(session: Session) -> Self {
        Self::new(session, Box::new(SilentReporter))
    }

    pub fn reporter(&self) -> &dyn ProgressReporter {
        self.reporter.as_ref()
    }

    /// Runs an upstream read behind a spinner.
    fn fetch<T>(
        &self,
        message: &str,
        call: impl FnOnce() -> Result<T, TidalError>,
    ) -> Result<T, TidalError> {
        self.reporter.begin(message, None);
        let result = call();
        self.reporter.finish();
        result
    }

    pub fn get_favorite_tracks(&self) -> Vec<Track> {
        match self.fetch("Fetching favorite tracks...", || {
            self.session.favorite_tracks()
        }) {
            Ok(raw) => normalize_tracks(&raw),
            Err(e) => {
                warn!(error = %e, "failed to fetch favorite tracks");
                Vec::new()
            }
        }
    }

    pub fn get_playlists(&self) -> Vec<Playlist> {
        match self.fetch("Fetching playlists...", || self.session.user_playlists()) {
            Ok(raw) => raw.iter().map(normalize_playlist).collect(),
            Err(e) => {
                warn!(error = %e, "failed to fetch playlists");
                Vec::new()
            }
        }
    }

    pub fn get_playlist_tracks(&self, playlist_id: &str) -> Vec<Track> {
        match self.fetch("Fetching playlist tracks...", || {
            self.session.playlist_tracks(playlist_id)
        }) {
            Ok(raw) => normalize_tracks(&raw),
            Err(e) => {
                warn!(playlist_id, error = %e, "failed to fetch playlist tracks");
                Vec::new()
            }
        }
    }

    /// Returns at most `limit` tracks in upstream order.
    pub fn search_tracks(&self, query: &str, limit: usize) -> Vec<Track> {
        if limit == 0 {
            return Vec::new();
        }

        match self.fetch(&format!("Searching for '{}'...", query), || {
            self.session.search_tracks(query, limit)
        }) {
            Ok(raw) => raw.iter().take(limit).map(normalize_track).collect(),
            Err(e) => {
                warn!(query, error = %e, "track search failed");
                Vec::new()
            }
        }
    }

    pub fn get_track_by_id(&self, track_id: &str) -> Option<Track> {
        let id = match track_id.trim().parse::<u64>() {
            Ok(id) => id,
            Err(_) => {
                warn!(track_id, "invalid track id");
                return None;
            }
        };

        match self.session.track(id) {
            Ok(raw) => Some(normalize_track(&raw)),
            Err(e) => {
                warn!(track_id = id, error = %e, "failed to fetch track");
                None
            }
        }
    }

    /// Resolves a playlist into its capability-bearing handle.
    pub fn get_playlist_by_id(&self, playlist_id: &str) -> Option<PlaylistHandle<'_>> {
        match self.session.playlist(playlist_id) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(playlist_id, error = %e, "failed to resolve playlist");
                None
            }
        }
    }

    pub fn create_playlist(&self, name: &str, description: &str) -> Option<Playlist> {
        match self.session.create_playlist(name, description) {
            Ok(raw) => Some(normalize_playlist(&raw)),
            Err(e) => {
                warn!(name, error = %e, "failed to create playlist");
                None
            }
        }
    }

    /// Coerces `track_ids` to integers, skipping and reporting the ones that
    /// do not parse.
    fn coerce_track_ids<S: AsRef<str>>(&self, track_ids: &[S]) -> Vec<u64> {
        let mut ids = Vec::with_capacity(track_ids.len());
        for raw in track_ids {
            let raw = raw.as_ref();
            match raw.trim().parse::<u64>() {
                Ok(id) => ids.push(id),
                Err(_) => {
                    warn!(track_id = raw, "skipping invalid track id");
                    self.reporter
                        .warning(&format!("Invalid track ID format: {}", raw));
                }
            }
        }
        ids
    }

    /// Adds all valid ids to the playlist in one batched upstream call.
    ///
    /// Returns `false` without touching the upstream when no id is valid,
    /// when the playlist cannot be resolved or is not owned by the user, and
    /// when the add itself fails.
    pub fn add_tracks_to_playlist<S: AsRef<str>>(&self, playlist_id: &str, track_ids: &[S]) -> bool {
        let ids = self.coerce_track_ids(track_ids);
        if ids.is_empty() {
            warn!(playlist_id, "no valid track ids to add");
            return false;
        }

        let Some(handle) = self.get_playlist_by_id(playlist_id) else {
            return false;
        };

        match handle {
            PlaylistHandle::ReadOnly(playlist) => {
                warn!(playlist_id = %playlist.uuid, "playlist is not owned by the current user");
                false
            }
            PlaylistHandle::Owned(owned) => match owned.add(&ids) {
                Ok(()) => true,
                Err(e) => {
                    warn!(playlist_id, count = ids.len(), error = %e, "failed to add tracks");
                    false
                }
            },
        }
    }

    pub fn remove_track_from_playlist(&self, playlist_id: &str, track_id: &str) -> bool {
        let ids = self.coerce_track_ids(&[track_id]);
        let Some(&id) = ids.first() else {
            return false;
        };

        let Some(handle) = self.get_playlist_by_id(playlist_id) else {
            return false;
        };

        match handle {
            PlaylistHandle::ReadOnly(playlist) => {
                warn!(playlist_id = %playlist.uuid, "playlist is not owned by the current user");
                false
            }
            PlaylistHandle::Owned(owned) => match owned.remove_by_id(id) {
                Ok(()) => true,
                Err(e) => {
                    warn!(playlist_id, track_id = id, error = %e, "failed to remove track");
                    false
                }
            },
        }
    }

    /// Removes every favorite track one at a time.
    ///
    /// A failed removal does not stop the loop. Returns `true` only if every
    /// removal succeeded; an empty favorites list counts as success.
    pub fn remove_all_favorite_tracks(&self) -> bool {
        let favorites = match self.session.favorite_tracks() {
            Ok(favorites) => favorites,
            Err(e) => {
                warn!(error = %e, "failed to fetch favorite tracks");
                return false;
            }
        };

        if favorites.is_empty() {
            return true;
        }

        let total = favorites.len();
        let mut removed = 0;

        self.reporter
            .begin("Removing favorite tracks...", Some(total as u64));
        for track in &favorites {
            match self.session.remove_favorite_track(track.id) {
                Ok(()) => removed += 1,
                Err(e) => warn!(track_id = track.id, error = %e, "failed to remove favorite"),
            }
            self.reporter.advance(1);
        }
        self.reporter.finish();

        if removed != total {
            self.reporter.warning(&format!(
                "Removed {} of {} favorite tracks",
                removed, total
            ));
        }

        removed == total
    }

    /// Removes all tracks from an owned playlist.
    ///
    /// An owned playlist that is already empty succeeds without calling the
    /// upstream clear.
    pub fn clear_playlist(&self, playlist_id: &str) -> bool {
        let Some(handle) = self.get_playlist_by_id(playlist_id) else {
            return false;
        };

        match handle {
            PlaylistHandle::ReadOnly(playlist) => {
                warn!(playlist_id = %playlist.uuid, "playlist is not owned by the current user");
                false
            }
            PlaylistHandle::Owned(owned) => {
                if owned.num_tracks() == 0 {
                    return true;
                }

                match owned.clear() {
                    Ok(cleared) => cleared,
                    Err(e) => {
                        warn!(playlist_id, error = %e, "failed to clear playlist");
                        false
                    }
                }
            }
        }
    }

    /// Clears the playlist, then adds `ordered_track_ids` in order.
    ///
    /// If the add fails after a successful clear the playlist stays empty.
    pub fn reorder_playlist<S: AsRef<str>>(&self, playlist_id: &str, ordered_track_ids: &[S]) -> bool {
        if !self.clear_playlist(playlist_id) {
            return false;
        }

        if ordered_track_ids.is_empty() {
            return true;
        }

        self.add_tracks_to_playlist(playlist_id, ordered_track_ids)
    }
}
