//! Environment Loading
//!
//! `.env` discovery and typed parsing helpers shared by the config loaders.
//! Loaders take a lookup function so tests can feed a map instead of
//! mutating the process environment. Unset, empty, or unparseable values
//! fall back to the given default.

use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Load `.env` from the current directory or the nearest ancestor that has one.
///
/// Variables already present in the process environment win.
pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        load_dotenv_from_ancestors(&cwd);
    }
}

/// Load the first `.env` found walking up from `start` (exclusive).
///
/// Returns the path that was loaded, if any.
pub fn load_dotenv_from_ancestors(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    while let Some(parent) = dir.parent() {
        let env_path = parent.join(".env");
        if env_path.exists() {
            return dotenvy::from_path(&env_path).ok().map(|()| env_path);
        }
        dir = parent;
    }
    None
}

/// Process environment lookup, treating empty values as unset.
#[must_use]
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// String value or default.
#[must_use]
pub fn string_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parsed value or default.
#[must_use]
pub fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
