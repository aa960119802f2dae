//! # Tidal Integration Module
//!
//! This module is the upstream side of the extractor: the [`TidalApi`] trait
//! describes every call the collector makes against a Tidal account, and
//! [`client::TidalClient`] implements it over the Tidal v1 REST API.
//!
//! ## Architecture
//!
//! ```text
//! Collector
//!     ↓
//! TidalApi (trait, the session handle)
//!     ├── favorites (list / remove)
//!     ├── playlists (list / create / resolve / tracks)
//!     └── search, single track lookup
//!          ↓
//! TidalClient (reqwest::blocking, JSON)
//!          ↓
//! Tidal Web API
//! ```
//!
//! ## Playlist capabilities
//!
//! Resolving a playlist yields a [`PlaylistHandle`]. Playlists created by the
//! authenticated user come back as [`PlaylistHandle::Owned`] and expose the
//! mutating operations through [`OwnedPlaylist`]; every other playlist is
//! [`PlaylistHandle::ReadOnly`]. Callers match on the variant rather than
//! attempting a mutation and interpreting the failure.
//!
//! ## Authentication
//!
//! [`auth`] implements the OAuth device flow: the user opens a verification
//! URL, the client polls the token endpoint until the login completes, and the
//! resulting [`Session`] is kept for the lifetime of the process.
//!
//! ## Error Types
//!
//! All upstream calls return [`TidalError`]. The collector never lets these
//! escape; it logs them and degrades to an empty result or `false`.

pub mod auth;
pub mod client;
mod error;
pub mod playlist;

pub use error::TidalError;

use crate::types::{TidalPlaylist, TidalTrack};

/// An authenticated connection to Tidal.
pub type Session = Box<dyn TidalApi>;

/// Upstream surface consumed by the collector.
///
/// List operations return the complete collection; any paging happens inside
/// the implementation.
pub trait TidalApi {
    fn favorite_tracks(&self) -> Result<Vec<TidalTrack>, TidalError>;

    fn remove_favorite_track(&self, track_id: u64) -> Result<(), TidalError>;

    fn user_playlists(&self) -> Result<Vec<TidalPlaylist>, TidalError>;

    fn create_playlist(&self, name: &str, description: &str)
    -> Result<TidalPlaylist, TidalError>;

    /// Resolves a playlist by id into a capability-bearing handle.
    fn playlist(&self, playlist_id: &str) -> Result<PlaylistHandle<'_>, TidalError>;

    fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<TidalTrack>, TidalError>;

    /// Searches tracks. `limit` is a hint for the request size; callers must
    /// not rely on the upstream honoring it.
    fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<TidalTrack>, TidalError>;

    fn track(&self, track_id: u64) -> Result<TidalTrack, TidalError>;
}

/// Mutations available only on playlists owned by the authenticated user.
pub trait OwnedPlaylist {
    fn info(&self) -> &TidalPlaylist;

    fn num_tracks(&self) -> u32 {
        self.info().number_of_tracks
    }

    /// Appends all `track_ids` in one request.
    fn add(&self, track_ids: &[u64]) -> Result<(), TidalError>;

    /// Removes every track. Returns whether the upstream reported success.
    fn clear(&self) -> Result<bool, TidalError>;

    fn remove_by_id(&self, track_id: u64) -> Result<(), TidalError>;
}

pub enum PlaylistHandle<'a> {
    ReadOnly(TidalPlaylist),
    Owned(Box<dyn OwnedPlaylist + 'a>),
}

impl PlaylistHandle<'_> {
    pub fn info(&self) -> &TidalPlaylist {
        match self {
            PlaylistHandle::ReadOnly(playlist) => playlist,
            PlaylistHandle::Owned(owned) => owned.info(),
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, PlaylistHandle::Owned(_))
    }
}
