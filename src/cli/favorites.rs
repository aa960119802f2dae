use std::path::Path;

use crate::{
    cli::{ExportTarget, confirm, connect_or_exit, export_or_print, load_or_exit},
    extractor::Extractor,
    tidal::auth::AuthProvider,
    utils,
};

pub fn favorites<A: AuthProvider>(
    extractor: &mut Extractor<A>,
    target: &ExportTarget<'_>,
    from_csv: Option<&Path>,
) {
    let tracks = match from_csv {
        Some(path) => load_or_exit(extractor, path),
        None => {
            connect_or_exit(extractor);
            extractor.get_favorite_tracks()
        }
    };

    if tracks.is_empty() {
        extractor.console().warning("No favorite tracks found.");
        return;
    }

    export_or_print(extractor, &tracks, "Your Favorite Tracks", target);
}

pub fn print_all<A: AuthProvider>(extractor: &mut Extractor<A>) {
    connect_or_exit(extractor);
    let tracks = extractor.get_favorite_tracks();

    if tracks.is_empty() {
        extractor.console().warning("No favorite tracks found.");
        return;
    }

    if extractor.is_silent() {
        return;
    }

    println!("\nAll Favorite Tracks ({}):", tracks.len());
    for (i, track) in tracks.iter().enumerate() {
        println!(
            "{:>4}. {} - {} [{}] ({})",
            i + 1,
            utils::join_artists(&track.artists),
            track.title,
            track.album,
            utils::format_duration(track.duration)
        );
    }
}

/// Removes every favorite track after showing how many there are.
///
/// Returns early, without asking, when the favorites are already empty.
pub fn empty_favorites<A: AuthProvider>(extractor: &mut Extractor<A>, force: bool) {
    connect_or_exit(extractor);

    let count = extractor.get_favorite_tracks().len();
    if count == 0 {
        extractor
            .console()
            .info("Your favorites list is already empty.");
        return;
    }

    extractor
        .console()
        .info(&format!("You currently have {} favorite tracks.", count));

    if !force
        && !confirm("This will remove ALL tracks from your favorites. This cannot be undone. Continue?")
    {
        extractor.console().info("Operation cancelled.");
        return;
    }

    if extractor.empty_favorites() {
        extractor
            .console()
            .success(&format!("Removed all {} favorite tracks.", count));
    } else {
        extractor
            .console()
            .warning("Some favorite tracks could not be removed.");
    }
}
