use std::path::Path;

use crate::{
    cli::{ExportTarget, connect_or_exit, export_or_print, load_or_exit},
    extractor::Extractor,
    tidal::auth::AuthProvider,
    utils,
};

/// Searches tracks by title, artist or album.
///
/// Without `remote` the query is matched locally (case-insensitive) against
/// the favorites plus every playlist, or against a CSV file when `from_csv`
/// is given. With `remote` the Tidal catalogue search is used, capped at
/// `limit` results.
pub fn search<A: AuthProvider>(
    extractor: &mut Extractor<A>,
    query: &str,
    target: &ExportTarget<'_>,
    from_csv: Option<&Path>,
    remote: bool,
    limit: usize,
) {
    let results = if remote {
        connect_or_exit(extractor);
        extractor.search_tracks(query, limit)
    } else {
        let pool = match from_csv {
            Some(path) => load_or_exit(extractor, path),
            None => {
                connect_or_exit(extractor);
                let mut pool = extractor.get_favorite_tracks();
                pool.extend(extractor.get_all_playlist_tracks());
                pool
            }
        };
        utils::filter_tracks(&pool, query)
    };

    if results.is_empty() {
        extractor
            .console()
            .warning(&format!("No tracks found matching '{}'.", query));
        return;
    }

    let title = format!("Search Results for '{}'", query);
    export_or_print(extractor, &results, &title, target);
}
