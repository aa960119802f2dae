//! Tidal Song Collection Extractor Library
//!
//! This library provides functionality for extracting track and playlist
//! metadata from a Tidal account, exporting it to CSV and performing a small
//! set of collection mutations (create playlist, add tracks, clear or reorder
//! a playlist, empty favorites).
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `codec` - CSV import/export of tracks
//! - `collector` - Upstream calls, normalization and bulk-operation bookkeeping
//! - `config` - Configuration management and environment variables
//! - `error` - Error types shared across the crate
//! - `extractor` - Lazily connecting facade over auth, collector and codec
//! - `normalize` - Upstream record to domain entity conversion
//! - `progress` - Progress reporting (console or silent)
//! - `tidal` - Tidal API client and device-flow authentication
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```no_run
//! use tidal_extractor::{config, extractor::Extractor};
//!
//! fn main() {
//!     config::load_env().ok();
//!     let mut extractor = Extractor::new(false);
//!     let tracks = extractor.get_favorite_tracks();
//!     extractor.print_tracks(&tracks, "Your Favorite Tracks");
//! }
//! ```

pub mod cli;
pub mod codec;
pub mod collector;
pub mod config;
pub mod error;
pub mod extractor;
pub mod normalize;
pub mod progress;
pub mod tidal;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Authenticating with Tidal...");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication successful!");
/// success!("Saved {} tracks to {}", count, path);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// such as a failed connection to Tidal.
///
/// # Example
///
/// ```
/// error!("Failed to connect to Tidal: {}", err);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as skipped track ids or an empty
/// result set that users should notice.
///
/// # Example
///
/// ```
/// warning!("Invalid track ID format: {}", raw);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
