use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: u64,
    pub title: String,
    pub artists: Vec<String>,
    pub album: String,
    pub duration: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// A column of the CSV interchange format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackField {
    Id,
    Title,
    Artists,
    Album,
    Duration,
}

impl TrackField {
    /// Default column set, in header order.
    pub const ALL: [TrackField; 5] = [
        TrackField::Id,
        TrackField::Title,
        TrackField::Artists,
        TrackField::Album,
        TrackField::Duration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackField::Id => "id",
            TrackField::Title => "title",
            TrackField::Artists => "artists",
            TrackField::Album => "album",
            TrackField::Duration => "duration",
        }
    }
}

impl fmt::Display for TrackField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(TrackField::Id),
            "title" => Ok(TrackField::Title),
            "artists" => Ok(TrackField::Artists),
            "album" => Ok(TrackField::Album),
            "duration" => Ok(TrackField::Duration),
            other => Err(format!(
                "Unknown field '{}'. Valid fields: id, title, artists, album, duration",
                other
            )),
        }
    }
}

/// Comma-separated field selection as given on the command line (`-f id,title`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection(pub Vec<TrackField>);

impl FieldSelection {
    pub fn fields(&self) -> &[TrackField] {
        &self.0
    }
}

impl FromStr for FieldSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        utils::parse_csv_fields(s).map(FieldSelection)
    }
}

/// File layout of an export (`--format`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    /// One numbered line per track: `1. [id] title - artists`
    Simple,
    /// A labelled block per track
    Detailed,
    /// One track id per line
    Ids,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Simple => "simple",
            ExportFormat::Detailed => "detailed",
            ExportFormat::Ids => "ids",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "simple" => Ok(ExportFormat::Simple),
            "detailed" => Ok(ExportFormat::Detailed),
            "ids" => Ok(ExportFormat::Ids),
            other => Err(format!(
                "Unknown format '{}'. Valid formats: csv, simple, detailed, ids",
                other
            )),
        }
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Artist(s)")]
    pub artists: String,
    #[tabled(rename = "Album")]
    pub album: String,
    #[tabled(rename = "Duration")]
    pub duration: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Description")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TidalTrack {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artists: Vec<TidalArtist>,
    #[serde(default)]
    pub album: Option<TidalAlbum>,
    #[serde(default)]
    pub duration: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TidalArtist {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TidalAlbum {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TidalPlaylist {
    pub uuid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "numberOfTracks", default)]
    pub number_of_tracks: u32,
    #[serde(default)]
    pub creator: Option<TidalCreator>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TidalCreator {
    #[serde(default)]
    pub id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalPage<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(rename = "totalNumberOfItems", default)]
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalFavorite {
    pub item: TidalTrack,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalSearchResponse {
    pub tracks: TidalPage<TidalTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceAuthorization {
    #[serde(rename = "deviceCode")]
    pub device_code: String,
    #[serde(rename = "userCode")]
    pub user_code: String,
    #[serde(rename = "verificationUri")]
    pub verification_uri: String,
    #[serde(rename = "verificationUriComplete", default)]
    pub verification_uri_complete: Option<String>,
    #[serde(rename = "expiresIn")]
    pub expires_in: u64,
    pub interval: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(rename = "userId")]
    pub user_id: u64,
    #[serde(rename = "countryCode")]
    pub country_code: String,
}
