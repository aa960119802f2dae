use std::path::PathBuf;

use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tidal_extractor::{
    cli::{self, ExportTarget},
    config, error,
    extractor::Extractor,
    types::{ExportFormat, FieldSelection},
    warning,
};

/// Exit status after Ctrl-C, as a shell reports for SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Suppress progress output and tables
    #[clap(long, global = true)]
    silent: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show or export your favorite tracks
    Favorites(ExportOptions),

    /// List your playlists
    Playlists,

    /// Work with a single playlist
    Playlist(PlaylistOptions),

    /// Export the tracks of all playlists into one file
    AllPlaylists(AllPlaylistsOptions),

    /// Search tracks in your collection or on Tidal
    Search(SearchOptions),

    /// Print a compact list of all favorite tracks
    PrintAll,

    /// Remove every track from your favorites
    EmptyFavorites(ForceOption),

    /// Start an interactive session
    Interactive,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ExportOptions {
    /// Write the tracks to this file instead of printing them
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Comma-separated CSV columns (id,title,artists,album,duration)
    #[clap(short, long, value_parser = clap::value_parser!(FieldSelection))]
    pub fields: Option<FieldSelection>,

    /// Output file layout: csv, simple, detailed or ids
    #[clap(long, default_value = "csv", value_parser = clap::value_parser!(ExportFormat))]
    pub format: ExportFormat,

    /// Read the tracks from a CSV file instead of Tidal
    #[clap(long)]
    pub from_csv: Option<PathBuf>,
}

impl ExportOptions {
    fn target(&self) -> ExportTarget<'_> {
        ExportTarget {
            output: self.output.as_deref(),
            fields: self.fields.as_ref(),
            format: self.format,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    #[command(subcommand)]
    pub command: PlaylistSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistSubcommand {
    /// Show or export the tracks of a playlist
    List {
        /// Playlist id; prompts for a selection when omitted
        #[clap(long)]
        id: Option<String>,

        #[clap(flatten)]
        export: ExportOptions,
    },

    /// Create a playlist
    Create {
        name: String,

        #[clap(short, long, default_value = "")]
        description: String,

        /// Track id to add; can be repeated
        #[clap(short = 't', long = "track", action = ArgAction::Append)]
        track_ids: Vec<String>,

        /// Search query whose results are added; can be repeated
        #[clap(short, long = "search", action = ArgAction::Append)]
        searches: Vec<String>,
    },

    /// Add tracks to a playlist
    Add {
        playlist_id: String,

        #[clap(required = true)]
        track_ids: Vec<String>,
    },

    /// Remove all tracks from a playlist
    Clear {
        playlist_id: String,

        #[clap(flatten)]
        force: ForceOption,
    },

    /// Reorder a playlist to match a CSV file
    Reorder {
        playlist_id: String,

        #[clap(long)]
        from_csv: PathBuf,

        #[clap(flatten)]
        force: ForceOption,
    },

    /// Remove one track from a playlist
    Remove { playlist_id: String, track_id: String },
}

#[derive(Parser, Debug, Clone)]
pub struct AllPlaylistsOptions {
    #[clap(short, long)]
    pub output: PathBuf,

    #[clap(short, long, value_parser = clap::value_parser!(FieldSelection))]
    pub fields: Option<FieldSelection>,

    #[clap(long, default_value = "csv", value_parser = clap::value_parser!(ExportFormat))]
    pub format: ExportFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    pub query: String,

    #[clap(flatten)]
    pub export: ExportOptions,

    /// Use the Tidal catalogue search instead of your collection
    #[clap(long, conflicts_with = "from_csv")]
    pub remote: bool,

    /// Maximum number of remote results
    #[clap(long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct ForceOption {
    /// Skip the confirmation prompt
    #[clap(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .init();
}

fn run(args: Cli) {
    let mut extractor = Extractor::new(args.silent);

    match args.command {
        Command::Favorites(opt) => {
            cli::favorites(&mut extractor, &opt.target(), opt.from_csv.as_deref())
        }
        Command::Playlists => cli::playlists(&mut extractor),
        Command::Playlist(opt) => match opt.command {
            PlaylistSubcommand::List { id, export } => cli::playlist_list(
                &mut extractor,
                id.as_deref(),
                &export.target(),
                export.from_csv.as_deref(),
            ),
            PlaylistSubcommand::Create {
                name,
                description,
                track_ids,
                searches,
            } => cli::playlist_create(&mut extractor, &name, &description, &track_ids, &searches),
            PlaylistSubcommand::Add {
                playlist_id,
                track_ids,
            } => cli::playlist_add(&mut extractor, &playlist_id, &track_ids),
            PlaylistSubcommand::Clear { playlist_id, force } => {
                cli::playlist_clear(&mut extractor, &playlist_id, force.force)
            }
            PlaylistSubcommand::Reorder {
                playlist_id,
                from_csv,
                force,
            } => cli::playlist_reorder(&mut extractor, &playlist_id, &from_csv, force.force),
            PlaylistSubcommand::Remove {
                playlist_id,
                track_id,
            } => cli::playlist_remove(&mut extractor, &playlist_id, &track_id),
        },
        Command::AllPlaylists(opt) => {
            cli::all_playlists(&mut extractor, &opt.output, opt.fields.as_ref(), opt.format)
        }
        Command::Search(opt) => cli::search(
            &mut extractor,
            &opt.query,
            &opt.export.target(),
            opt.export.from_csv.as_deref(),
            opt.remote,
            opt.limit,
        ),
        Command::PrintAll => cli::print_all(&mut extractor),
        Command::EmptyFavorites(opt) => cli::empty_favorites(&mut extractor, opt.force),
        Command::Interactive => cli::interactive(extractor),
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = config::load_env() {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    // blocking HTTP must stay off the async workers
    let command = tokio::task::spawn_blocking(move || run(cli));

    tokio::select! {
        result = command => {
            if let Err(e) = result {
                error!("Command failed: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            warning!("Interrupted");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    }
}
