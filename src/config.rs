//! Configuration management for the Tidal Extractor.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and a `.env` file. Values are read on demand; the
//! only configuration source besides the process environment is the `.env`
//! file in the local data directory.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::error::ExtractorError;

pub const DEFAULT_API_URL: &str = "https://api.tidal.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://auth.tidal.com/v1/oauth2";
pub const DEFAULT_SCOPE: &str = "r_usr w_usr w_sub";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory if it doesn't exist and loads variables from
/// `tidal-extractor/.env` inside the platform-specific local data directory.
/// Variables already present in the environment are not overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/tidal-extractor/.env`
/// - macOS: `~/Library/Application Support/tidal-extractor/.env`
/// - Windows: `%LOCALAPPDATA%/tidal-extractor/.env`
///
/// # Errors
///
/// Returns an error string if the directory cannot be created. A missing
/// `.env` file is not an error.
pub fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    Ok(())
}

pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tidal-extractor/.env");
    path
}

/// Returns the Tidal API client ID used for the device login.
///
/// # Errors
///
/// Returns `ExtractorError::Config` if `TIDAL_CLIENT_ID` is not set.
pub fn tidal_client_id() -> Result<String, ExtractorError> {
    required("TIDAL_CLIENT_ID")
}

/// Returns the Tidal API client secret used for the device login.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
///
/// # Errors
///
/// Returns `ExtractorError::Config` if `TIDAL_CLIENT_SECRET` is not set.
pub fn tidal_client_secret() -> Result<String, ExtractorError> {
    required("TIDAL_CLIENT_SECRET")
}

/// Returns the Tidal Web API base URL (`TIDAL_API_URL`).
pub fn tidal_api_url() -> String {
    env::var("TIDAL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the Tidal OAuth base URL (`TIDAL_AUTH_URL`).
pub fn tidal_auth_url() -> String {
    env::var("TIDAL_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string())
}

pub fn tidal_scope() -> String {
    env::var("TIDAL_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.to_string())
}

pub fn request_timeout() -> Duration {
    let secs = env::var("TIDAL_REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

fn required(name: &str) -> Result<String, ExtractorError> {
    env::var(name).map_err(|_| {
        ExtractorError::Config(format!(
            "{} must be set (environment or {})",
            name,
            env_file_path().display()
        ))
    })
}
