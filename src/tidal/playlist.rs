use reqwest::{Method, header::IF_NONE_MATCH};
use tracing::debug;

use crate::{
    tidal::{OwnedPlaylist, TidalApi, TidalError, client::TidalClient},
    types::TidalPlaylist,
};

/// Tidal rejects index deletions larger than this in a single request.
const CLEAR_CHUNK_SIZE: u32 = 50;

/// A playlist created by the authenticated user.
///
/// Every mutation re-reads the playlist's `ETag` first and sends it as
/// `If-None-Match`, so a concurrent modification makes the request fail
/// instead of applying to a different track order.
pub struct OwnedTidalPlaylist<'a> {
    client: &'a TidalClient,
    playlist: TidalPlaylist,
}

impl<'a> OwnedTidalPlaylist<'a> {
    pub fn new(client: &'a TidalClient, playlist: TidalPlaylist) -> Self {
        Self { client, playlist }
    }

    fn items_path(&self) -> String {
        format!("playlists/{}/items", self.playlist.uuid)
    }

    fn delete_indices(&self, indices: &[u32]) -> Result<(), TidalError> {
        let (_, etag) = self.client.playlist_with_etag(&self.playlist.uuid)?;
        let joined = indices
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");

        self.client.send(
            self.client
                .request(Method::DELETE, &format!("{}/{}", self.items_path(), joined))
                .header(IF_NONE_MATCH, etag),
        )?;
        Ok(())
    }
}

impl OwnedPlaylist for OwnedTidalPlaylist<'_> {
    fn info(&self) -> &TidalPlaylist {
        &self.playlist
    }

    fn add(&self, track_ids: &[u64]) -> Result<(), TidalError> {
        let (_, etag) = self.client.playlist_with_etag(&self.playlist.uuid)?;
        let joined = track_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");

        debug!(playlist = %self.playlist.uuid, count = track_ids.len(), "adding tracks");
        self.client.send(
            self.client
                .request(Method::POST, &self.items_path())
                .header(IF_NONE_MATCH, etag)
                .form(&[
                    ("trackIds", joined.as_str()),
                    ("onArtifactNotFound", "FAIL"),
                    ("onDupes", "FAIL"),
                ]),
        )?;
        Ok(())
    }

    fn clear(&self) -> Result<bool, TidalError> {
        let (current, _) = self.client.playlist_with_etag(&self.playlist.uuid)?;
        let mut remaining = current.number_of_tracks;

        // indices shift after each deletion, so every chunk starts at 0
        while remaining > 0 {
            let chunk = remaining.min(CLEAR_CHUNK_SIZE);
            let indices: Vec<u32> = (0..chunk).collect();
            self.delete_indices(&indices)?;
            remaining -= chunk;
        }

        Ok(true)
    }

    fn remove_by_id(&self, track_id: u64) -> Result<(), TidalError> {
        let tracks = self.client.playlist_tracks(&self.playlist.uuid)?;
        let index = tracks
            .iter()
            .position(|t| t.id == track_id)
            .ok_or_else(|| {
                TidalError::NotFound(format!(
                    "track {} in playlist {}",
                    track_id, self.playlist.uuid
                ))
            })?;

        self.delete_indices(&[index as u32])
    }
}
