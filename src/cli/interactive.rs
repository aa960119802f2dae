use std::{path::PathBuf, str::FromStr};

use crate::{
    cli::{confirm, connect_or_exit, load_track_ids, parse_choice, prompt},
    extractor::Extractor,
    info, success,
    tidal::auth::AuthProvider,
    types::{FieldSelection, Playlist, Track},
    utils, warning,
};

/// State of a running interactive session, handed to every menu handler.
pub struct InteractiveSession<A: AuthProvider> {
    pub extractor: Extractor<A>,
    running: bool,
}

impl<A: AuthProvider> InteractiveSession<A> {
    pub fn new(extractor: Extractor<A>) -> Self {
        Self {
            extractor,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ViewFavorites,
    ViewPlaylists,
    Search,
    ExportFavorites,
    ExportPlaylist,
    ImportPlaylist,
    ReorderPlaylist,
    EmptyFavorites,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 9] = [
        MenuAction::ViewFavorites,
        MenuAction::ViewPlaylists,
        MenuAction::Search,
        MenuAction::ExportFavorites,
        MenuAction::ExportPlaylist,
        MenuAction::ImportPlaylist,
        MenuAction::ReorderPlaylist,
        MenuAction::EmptyFavorites,
        MenuAction::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::ViewFavorites => "View favorite tracks",
            MenuAction::ViewPlaylists => "View playlists",
            MenuAction::Search => "Search tracks",
            MenuAction::ExportFavorites => "Export favorites to CSV",
            MenuAction::ExportPlaylist => "Export playlist to CSV",
            MenuAction::ImportPlaylist => "Create playlist from CSV",
            MenuAction::ReorderPlaylist => "Reorder playlist from CSV",
            MenuAction::EmptyFavorites => "Empty favorites",
            MenuAction::Exit => "Exit",
        }
    }
}

impl FromStr for MenuAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s, MenuAction::ALL.len())
            .map(|i| MenuAction::ALL[i])
            .ok_or_else(|| format!("Invalid choice '{}'", s.trim()))
    }
}

/// Runs the menu loop. Exits with status 1 if the login fails.
pub fn interactive<A: AuthProvider>(extractor: Extractor<A>) {
    let mut session = InteractiveSession::new(extractor);
    connect_or_exit(&mut session.extractor);

    while session.is_running() {
        print_menu();

        let Some(input) = prompt("\nChoose an option: ") else {
            break; // stdin closed
        };

        match input.parse::<MenuAction>() {
            Ok(action) => dispatch(&mut session, action),
            Err(e) => warning!("{}", e),
        }
    }
}

fn print_menu() {
    println!("\n=== Tidal Extractor ===");
    for (i, action) in MenuAction::ALL.iter().enumerate() {
        println!("{}. {}", i + 1, action.label());
    }
}

pub fn dispatch<A: AuthProvider>(session: &mut InteractiveSession<A>, action: MenuAction) {
    match action {
        MenuAction::ViewFavorites => view_favorites(session),
        MenuAction::ViewPlaylists => view_playlists(session),
        MenuAction::Search => search(session),
        MenuAction::ExportFavorites => export_favorites(session),
        MenuAction::ExportPlaylist => export_playlist(session),
        MenuAction::ImportPlaylist => import_playlist(session),
        MenuAction::ReorderPlaylist => reorder_playlist(session),
        MenuAction::EmptyFavorites => empty_favorites(session),
        MenuAction::Exit => {
            if confirm("Are you sure you want to exit?") {
                session.stop();
            }
        }
    }
}

fn view_favorites<A: AuthProvider>(session: &mut InteractiveSession<A>) {
    let tracks = session.extractor.get_favorite_tracks();
    session.extractor.print_tracks(&tracks, "Your Favorite Tracks");
}

fn view_playlists<A: AuthProvider>(session: &mut InteractiveSession<A>) {
    let Some(playlist) = choose_playlist(session) else {
        return;
    };

    let tracks = session.extractor.get_playlist_tracks(&playlist.id);
    session
        .extractor
        .print_tracks(&tracks, &format!("Playlist: {}", playlist.name));
}

fn search<A: AuthProvider>(session: &mut InteractiveSession<A>) {
    let Some(query) = prompt("Enter search query: ").filter(|q| !q.is_empty()) else {
        return;
    };

    let mut pool = session.extractor.get_favorite_tracks();
    pool.extend(session.extractor.get_all_playlist_tracks());

    let results = utils::filter_tracks(&pool, &query);
    session
        .extractor
        .print_tracks(&results, &format!("Search Results for '{}'", query));
}

fn export_favorites<A: AuthProvider>(session: &mut InteractiveSession<A>) {
    let tracks = session.extractor.get_favorite_tracks();
    if tracks.is_empty() {
        warning!("No favorite tracks found.");
        return;
    }

    export(session, &tracks, "favorites");
}

fn export_playlist<A: AuthProvider>(session: &mut InteractiveSession<A>) {
    let Some(playlist) = choose_playlist(session) else {
        return;
    };

    let tracks = session.extractor.get_playlist_tracks(&playlist.id);
    if tracks.is_empty() {
        warning!("No tracks found in this playlist.");
        return;
    }

    export(session, &tracks, &playlist.name);
}

fn import_playlist<A: AuthProvider>(session: &mut InteractiveSession<A>) {
    let Some(path) = prompt_csv_path() else {
        return;
    };

    let ids = match load_track_ids(&session.extractor, &path) {
        Ok(ids) => ids,
        Err(e) => {
            warning!("Failed to load tracks: {}", e);
            return;
        }
    };

    let Some(name) = prompt("Enter playlist name: ").filter(|n| !n.is_empty()) else {
        warning!("A playlist name is required.");
        return;
    };
    let description = prompt("Enter playlist description (optional): ").unwrap_or_default();

    let Some(playlist) = session.extractor.create_playlist(&name, &description) else {
        warning!("Failed to create playlist '{}'", name);
        return;
    };
    success!("Created playlist '{}' (ID: {})", playlist.name, playlist.id);

    if session.extractor.add_tracks_to_playlist(&playlist.id, &ids) {
        success!("Added {} tracks to '{}'", ids.len(), playlist.name);
    } else {
        warning!("Failed to add tracks to '{}'", playlist.name);
    }
}

fn reorder_playlist<A: AuthProvider>(session: &mut InteractiveSession<A>) {
    let Some(playlist) = choose_playlist(session) else {
        return;
    };

    let Some(path) = prompt_csv_path() else {
        return;
    };

    let ordered = match load_track_ids(&session.extractor, &path) {
        Ok(ids) => ids,
        Err(e) => {
            warning!("Failed to load tracks: {}", e);
            return;
        }
    };

    if !confirm(&format!(
        "Replace the contents of '{}' with {} tracks from {}?",
        playlist.name,
        ordered.len(),
        path.display()
    )) {
        info!("Operation cancelled.");
        return;
    }

    if session.extractor.reorder_playlist(&playlist.id, &ordered) {
        success!("Playlist '{}' reordered", playlist.name);
    } else {
        warning!("Failed to reorder playlist '{}'", playlist.name);
    }
}

fn empty_favorites<A: AuthProvider>(session: &mut InteractiveSession<A>) {
    let count = session.extractor.get_favorite_tracks().len();
    if count == 0 {
        info!("Your favorites list is already empty.");
        return;
    }

    info!("You currently have {} favorite tracks.", count);
    if !confirm("This will remove ALL tracks from your favorites. This cannot be undone. Continue?")
    {
        info!("Operation cancelled.");
        return;
    }

    if session.extractor.empty_favorites() {
        success!("Removed all {} favorite tracks.", count);
    } else {
        warning!("Some favorite tracks could not be removed.");
    }
}

fn choose_playlist<A: AuthProvider>(session: &mut InteractiveSession<A>) -> Option<Playlist> {
    let mut playlists = session.extractor.get_playlists();
    if playlists.is_empty() {
        warning!("No playlists found.");
        return None;
    }

    session.extractor.print_playlists(&playlists);
    let choice = prompt("\nEnter playlist number: ")
        .and_then(|input| parse_choice(&input, playlists.len()));

    match choice {
        Some(index) => Some(playlists.swap_remove(index)),
        None => {
            warning!("Invalid playlist selection.");
            None
        }
    }
}

fn prompt_csv_path() -> Option<PathBuf> {
    prompt("Enter CSV file path: ")
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

fn export<A: AuthProvider>(
    session: &mut InteractiveSession<A>,
    tracks: &[Track],
    prefix: &str,
) {
    let default_name = utils::default_export_filename(prefix);
    let filename = match prompt(&format!("Enter filename (default: {}): ", default_name)) {
        Some(name) if !name.is_empty() => utils::ensure_csv_extension(&name),
        _ => default_name,
    };

    let fields = match prompt("Fields to export (comma-separated, blank for all): ") {
        Some(raw) if !raw.is_empty() => match raw.parse::<FieldSelection>() {
            Ok(selection) => Some(selection),
            Err(e) => {
                warning!("{}", e);
                return;
            }
        },
        _ => None,
    };

    match session.extractor.save_tracks(
        tracks,
        &filename,
        fields.as_ref().map(FieldSelection::fields),
    ) {
        Ok(()) => success!("Saved {} tracks to {}", tracks.len(), filename),
        Err(e) => warning!("Failed to save tracks: {}", e),
    }
}
