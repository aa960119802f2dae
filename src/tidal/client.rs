use std::{thread, time::Duration};

use reqwest::{
    Method, StatusCode,
    blocking::{Client, RequestBuilder, Response},
    header::ETAG,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    tidal::{PlaylistHandle, TidalApi, TidalError, playlist::OwnedTidalPlaylist},
    types::{
        SessionInfo, TidalFavorite, TidalPage, TidalPlaylist, TidalSearchResponse, TidalTrack,
    },
};

const PAGE_SIZE: u64 = 100;
const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Blocking client for the Tidal v1 API, bound to one authenticated user.
pub struct TidalClient {
    http: Client,
    api_url: String,
    access_token: String,
    session: SessionInfo,
}

impl TidalClient {
    pub fn new(http: Client, api_url: String, access_token: String, session: SessionInfo) -> Self {
        Self {
            http,
            api_url,
            access_token,
            session,
        }
    }

    pub fn user_id(&self) -> u64 {
        self.session.user_id
    }

    pub fn country_code(&self) -> &str {
        &self.session.country_code
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        self.http
            .request(method, url)
            .bearer_auth(&self.access_token)
            .query(&[("countryCode", self.session.country_code.as_str())])
    }

    /// Sends the request, retrying a 502 Bad Gateway up to `MAX_RETRIES` times.
    pub(crate) fn send(&self, builder: RequestBuilder) -> Result<Response, TidalError> {
        let mut attempt = 0;

        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| TidalError::Api("request cannot be retried".to_string()))?;

            let response = request.send()?;
            debug!(status = %response.status(), url = %response.url(), "tidal response");

            if response.status() == StatusCode::BAD_GATEWAY && attempt < MAX_RETRIES {
                attempt += 1;
                thread::sleep(RETRY_DELAY);
                continue; // retry
            }

            return check_status(response);
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TidalError> {
        let response = self.send(self.request(Method::GET, path).query(query))?;
        decode(response)
    }

    /// Follows limit/offset paging until `totalNumberOfItems` items are collected.
    fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, TidalError> {
        let mut items = Vec::new();
        let mut offset: u64 = 0;

        loop {
            let page: TidalPage<T> = self.get_json(
                path,
                &[
                    ("limit", PAGE_SIZE.to_string()),
                    ("offset", offset.to_string()),
                ],
            )?;

            let received = page.items.len() as u64;
            items.extend(page.items);
            offset += received;

            if received == 0 || offset >= page.total {
                break;
            }
        }

        Ok(items)
    }

    /// Fetches playlist metadata together with the `ETag` required by mutations.
    pub(crate) fn playlist_with_etag(
        &self,
        playlist_id: &str,
    ) -> Result<(TidalPlaylist, String), TidalError> {
        let response = self.send(self.request(Method::GET, &format!("playlists/{}", playlist_id)))?;

        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                TidalError::Api(format!("playlist {} returned no ETag header", playlist_id))
            })?;

        Ok((decode(response)?, etag))
    }
}

impl TidalApi for TidalClient {
    fn favorite_tracks(&self) -> Result<Vec<TidalTrack>, TidalError> {
        let favorites: Vec<TidalFavorite> =
            self.get_all(&format!("users/{}/favorites/tracks", self.user_id()))?;
        Ok(favorites.into_iter().map(|f| f.item).collect())
    }

    fn remove_favorite_track(&self, track_id: u64) -> Result<(), TidalError> {
        let path = format!("users/{}/favorites/tracks/{}", self.user_id(), track_id);
        self.send(self.request(Method::DELETE, &path))?;
        Ok(())
    }

    fn user_playlists(&self) -> Result<Vec<TidalPlaylist>, TidalError> {
        self.get_all(&format!("users/{}/playlists", self.user_id()))
    }

    fn create_playlist(
        &self,
        name: &str,
        description: &str,
    ) -> Result<TidalPlaylist, TidalError> {
        let path = format!("users/{}/playlists", self.user_id());
        let response = self.send(
            self.request(Method::POST, &path)
                .form(&[("title", name), ("description", description)]),
        )?;
        decode(response)
    }

    fn playlist(&self, playlist_id: &str) -> Result<PlaylistHandle<'_>, TidalError> {
        let playlist: TidalPlaylist = self.get_json(&format!("playlists/{}", playlist_id), &[])?;

        let owned = playlist
            .creator
            .as_ref()
            .and_then(|c| c.id)
            .is_some_and(|id| id == self.user_id());

        if owned {
            Ok(PlaylistHandle::Owned(Box::new(OwnedTidalPlaylist::new(
                self, playlist,
            ))))
        } else {
            Ok(PlaylistHandle::ReadOnly(playlist))
        }
    }

    fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<TidalTrack>, TidalError> {
        self.get_all(&format!("playlists/{}/tracks", playlist_id))
    }

    fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<TidalTrack>, TidalError> {
        let response: TidalSearchResponse = self.get_json(
            "search",
            &[
                ("query", query.to_string()),
                ("types", "TRACKS".to_string()),
                ("limit", limit.to_string()),
                ("offset", "0".to_string()),
            ],
        )?;
        Ok(response.tracks.items)
    }

    fn track(&self, track_id: u64) -> Result<TidalTrack, TidalError> {
        self.get_json(&format!("tracks/{}", track_id), &[])
    }
}

pub(crate) fn check_status(response: Response) -> Result<Response, TidalError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let path = response.url().path().to_string();
    let body = response.text().unwrap_or_default();

    if status == StatusCode::NOT_FOUND {
        return Err(TidalError::NotFound(path));
    }

    Err(TidalError::Status {
        status: status.as_u16(),
        body,
    })
}

pub(crate) fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TidalError> {
    let body = response.text()?;
    Ok(serde_json::from_str(&body)?)
}
