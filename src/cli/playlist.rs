use std::path::Path;

use crate::{
    cli::{
        ExportTarget, confirm, connect_or_exit, export_or_print, load_or_exit, load_track_ids,
        parse_choice, prompt,
    },
    error,
    extractor::Extractor,
    success,
    tidal::auth::AuthProvider,
    types::{ExportFormat, FieldSelection},
};

/// Track count of a single search query when building a playlist.
pub const CREATE_SEARCH_LIMIT: usize = 50;

pub fn playlists<A: AuthProvider>(extractor: &mut Extractor<A>) {
    connect_or_exit(extractor);
    let playlists = extractor.get_playlists();
    extractor.print_playlists(&playlists);
}

/// Shows or exports the tracks of one playlist.
///
/// Without `playlist_id` the user's playlists are listed and the user picks
/// one by number.
pub fn playlist_list<A: AuthProvider>(
    extractor: &mut Extractor<A>,
    playlist_id: Option<&str>,
    target: &ExportTarget<'_>,
    from_csv: Option<&Path>,
) {
    if let Some(path) = from_csv {
        let tracks = load_or_exit(extractor, path);
        export_or_print(extractor, &tracks, "Playlist Tracks", target);
        return;
    }

    connect_or_exit(extractor);

    let (playlist_id, title) = match playlist_id {
        Some(id) => (id.to_string(), format!("Playlist {}", id)),
        None => {
            let playlists = extractor.get_playlists();
            if playlists.is_empty() {
                extractor.console().warning("No playlists found.");
                return;
            }

            extractor.print_playlists(&playlists);
            let choice = prompt("\nEnter playlist number: ")
                .and_then(|input| parse_choice(&input, playlists.len()));

            match choice {
                Some(index) => {
                    let playlist = &playlists[index];
                    (playlist.id.clone(), format!("Playlist: {}", playlist.name))
                }
                None => {
                    extractor.console().warning("Invalid playlist selection.");
                    return;
                }
            }
        }
    };

    let tracks = extractor.get_playlist_tracks(&playlist_id);
    if tracks.is_empty() {
        extractor
            .console()
            .warning("No tracks found in this playlist.");
        return;
    }

    export_or_print(extractor, &tracks, &title, target);
}

/// Creates a playlist and fills it from explicit ids and search queries.
pub fn playlist_create<A: AuthProvider>(
    extractor: &mut Extractor<A>,
    name: &str,
    description: &str,
    track_ids: &[String],
    searches: &[String],
) {
    connect_or_exit(extractor);

    let Some(playlist) = extractor.create_playlist(name, description) else {
        error!("Failed to create playlist '{}'", name);
    };

    if !extractor.is_silent() {
        success!("Created playlist '{}' (ID: {})", playlist.name, playlist.id);
    }

    let mut ids: Vec<String> = track_ids.to_vec();
    for query in searches {
        let found = extractor.search_tracks(query, CREATE_SEARCH_LIMIT);
        if found.is_empty() {
            extractor
                .console()
                .warning(&format!("No tracks found for '{}'", query));
            continue;
        }

        extractor
            .console()
            .info(&format!("Found {} tracks for '{}'", found.len(), query));
        ids.extend(found.iter().map(|t| t.id.to_string()));
    }

    if ids.is_empty() {
        return;
    }

    if extractor.add_tracks_to_playlist(&playlist.id, &ids) {
        extractor
            .console()
            .success(&format!("Added {} tracks to '{}'", ids.len(), playlist.name));
    } else {
        extractor
            .console()
            .warning(&format!("Failed to add tracks to '{}'", playlist.name));
    }
}

pub fn playlist_add<A: AuthProvider>(
    extractor: &mut Extractor<A>,
    playlist_id: &str,
    track_ids: &[String],
) {
    connect_or_exit(extractor);

    if extractor.add_tracks_to_playlist(playlist_id, track_ids) {
        extractor
            .console()
            .success(&format!("Added tracks to playlist {}", playlist_id));
    } else {
        extractor
            .console()
            .warning(&format!("Failed to add tracks to playlist {}", playlist_id));
    }
}

pub fn playlist_clear<A: AuthProvider>(
    extractor: &mut Extractor<A>,
    playlist_id: &str,
    force: bool,
) {
    if !force && !confirm(&format!("Remove ALL tracks from playlist {}?", playlist_id)) {
        extractor.console().info("Operation cancelled.");
        return;
    }

    connect_or_exit(extractor);
    if extractor.clear_playlist(playlist_id) {
        extractor
            .console()
            .success(&format!("Playlist {} cleared", playlist_id));
    } else {
        extractor
            .console()
            .warning(&format!("Failed to clear playlist {}", playlist_id));
    }
}

/// Rewrites a playlist in the order given by a CSV file.
///
/// The playlist is cleared before the tracks are added again; if adding
/// fails the playlist is left empty.
pub fn playlist_reorder<A: AuthProvider>(
    extractor: &mut Extractor<A>,
    playlist_id: &str,
    csv_path: &Path,
    force: bool,
) {
    let ordered = match load_track_ids(extractor, csv_path) {
        Ok(ids) => ids,
        Err(e) if e.is_no_tracks() => {
            extractor.console().warning(&e.to_string());
            return;
        }
        Err(e) => error!("Failed to load tracks from {}: {}", csv_path.display(), e),
    };

    extractor.console().info(&format!(
        "Reordering playlist {} with {} tracks from {}",
        playlist_id,
        ordered.len(),
        csv_path.display()
    ));

    if !force
        && !confirm("The playlist will be cleared and refilled. If refilling fails it stays empty. Continue?")
    {
        extractor.console().info("Operation cancelled.");
        return;
    }

    connect_or_exit(extractor);
    if extractor.reorder_playlist(playlist_id, &ordered) {
        extractor
            .console()
            .success(&format!("Playlist {} reordered", playlist_id));
    } else {
        extractor
            .console()
            .warning(&format!("Failed to reorder playlist {}", playlist_id));
    }
}

pub fn playlist_remove<A: AuthProvider>(
    extractor: &mut Extractor<A>,
    playlist_id: &str,
    track_id: &str,
) {
    connect_or_exit(extractor);

    if extractor.remove_track_from_playlist(playlist_id, track_id) {
        extractor.console().success(&format!(
            "Removed track {} from playlist {}",
            track_id, playlist_id
        ));
    } else {
        extractor.console().warning(&format!(
            "Failed to remove track {} from playlist {}",
            track_id, playlist_id
        ));
    }
}

/// Exports the tracks of every playlist into a single CSV file.
pub fn all_playlists<A: AuthProvider>(
    extractor: &mut Extractor<A>,
    output: &Path,
    fields: Option<&FieldSelection>,
    format: ExportFormat,
) {
    connect_or_exit(extractor);

    let playlists = extractor.get_playlists();
    if playlists.is_empty() {
        extractor.console().warning("No playlists found.");
        return;
    }

    let mut tracks = Vec::new();
    for playlist in &playlists {
        let playlist_tracks = extractor.get_playlist_tracks(&playlist.id);
        extractor.console().info(&format!(
            "{}: {} tracks",
            playlist.name,
            playlist_tracks.len()
        ));
        tracks.extend(playlist_tracks);
    }

    if tracks.is_empty() {
        extractor.console().warning("No tracks found in any playlist.");
        return;
    }

    let target = ExportTarget {
        output: Some(output),
        fields,
        format,
    };
    export_or_print(extractor, &tracks, "All Playlists", &target);
}
