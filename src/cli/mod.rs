//! # CLI Module
//!
//! Command handlers for the `tidal-extractor` binary. Each handler takes the
//! [`Extractor`] explicitly, talks to the user through the crate's console
//! macros or the extractor's silent-aware console reporter, and leaves all
//! upstream work to the extractor.
//!
//! ## Command Categories
//!
//! ### Favorites
//!
//! - [`favorites`] - Show or export the favorite tracks (optionally from a CSV file)
//! - [`print_all`] - Compact numbered listing of the favorite tracks
//! - [`empty_favorites`] - Remove every favorite track
//!
//! ### Playlists
//!
//! - [`playlists`] - Table of the user's playlists
//! - [`playlist_list`], [`playlist_create`], [`playlist_add`],
//!   [`playlist_clear`], [`playlist_reorder`], [`playlist_remove`]
//! - [`all_playlists`] - Export the tracks of every playlist into one CSV file
//!
//! ### Search
//!
//! - [`search`] - Local match over favorites and playlists, or upstream search
//!
//! ### Interactive
//!
//! - [`interactive`] - Menu-driven session over the same operations
//!
//! ## Exit codes
//!
//! Handlers return normally on success and when the user cancels. A failed
//! login and unrecoverable I/O errors go through [`error!`](crate::error!),
//! which exits with status 1.

mod favorites;
mod interactive;
mod playlist;
mod search;

pub use favorites::{empty_favorites, favorites, print_all};
pub use interactive::{InteractiveSession, MenuAction, dispatch, interactive};
pub use playlist::{
    all_playlists, playlist_add, playlist_clear, playlist_create, playlist_list, playlist_remove,
    playlist_reorder, playlists,
};
pub use search::search;

use std::{
    io::{self, BufRead, Write},
    path::Path,
};

use crate::{
    error,
    error::ExtractorError,
    extractor::Extractor,
    success,
    tidal::auth::AuthProvider,
    types::{ExportFormat, FieldSelection, Track},
};

/// Where and how a handler writes its tracks. Without `output` the tracks
/// are printed as a table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportTarget<'a> {
    pub output: Option<&'a Path>,
    pub fields: Option<&'a FieldSelection>,
    pub format: ExportFormat,
}

/// Connects the extractor or exits with status 1.
pub fn connect_or_exit<A: AuthProvider>(extractor: &mut Extractor<A>) {
    if let Err(e) = extractor.connect() {
        error!("Failed to connect to Tidal: {}", e);
    }
}

/// Loads tracks from `path` or exits with status 1.
pub fn load_or_exit<A: AuthProvider>(extractor: &Extractor<A>, path: &Path) -> Vec<Track> {
    match extractor.load_tracks(path) {
        Ok(tracks) => tracks,
        Err(e) => error!("Failed to load tracks from {}: {}", path.display(), e),
    }
}

/// Loads the track ids of a CSV file in file order.
///
/// # Errors
///
/// `NoTracks` when the file holds no track rows, otherwise whatever
/// [`Extractor::load_tracks`] reports.
pub fn load_track_ids<A: AuthProvider>(
    extractor: &Extractor<A>,
    path: &Path,
) -> Result<Vec<String>, ExtractorError> {
    let tracks = extractor.load_tracks(path)?;
    if tracks.is_empty() {
        return Err(ExtractorError::NoTracks(format!(
            "CSV file '{}'",
            path.display()
        )));
    }

    Ok(tracks.iter().map(|t| t.id.to_string()).collect())
}

/// Writes `tracks` to the target's output when given, otherwise prints them
/// as a table.
pub fn export_or_print<A: AuthProvider>(
    extractor: &Extractor<A>,
    tracks: &[Track],
    title: &str,
    target: &ExportTarget<'_>,
) {
    let Some(path) = target.output else {
        extractor.print_tracks(tracks, title);
        return;
    };

    let fields = target.fields.map(FieldSelection::fields);
    match extractor.export_tracks(tracks, path, fields, target.format) {
        Ok(()) => {
            if !extractor.is_silent() {
                success!("Saved {} tracks to {}", tracks.len(), path.display());
            }
        }
        Err(e) => error!("Failed to save tracks to {}: {}", path.display(), e),
    }
}

/// Prints `message` and reads one trimmed line from stdin.
///
/// Returns `None` on end of input.
pub fn prompt(message: &str) -> Option<String> {
    print!("{}", message);
    io::stdout().flush().ok()?;

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Asks a yes/no question; anything but `y`/`yes` counts as no.
pub fn confirm(message: &str) -> bool {
    prompt(&format!("{} [y/N]: ", message))
        .map(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes"))
        .unwrap_or(false)
}

/// Parses a 1-based menu choice into an index below `len`.
pub fn parse_choice(input: &str, len: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= len => Some(n - 1),
        _ => None,
    }
}
