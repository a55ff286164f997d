//! Helpers for fstation.
//!
//! This module defines the bounds for the network timeout and a few small utilities:
//! - Lower-casing short strings without a heap allocation
//! - Locating and expanding the home directory
//! - Clamping the configured timeout to safe values
//! - Telling URLs apart from file paths
//!
//! These helpers are used throughout fstation.

use std::path::PathBuf;

/// Lowest accepted request timeout in seconds.
pub const MIN_TIMEOUT_SECS: u64 = 1;
/// Timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Highest accepted request timeout in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Stack buffer size for [with_lowered_stack]. Extensions are almost always shorter.
const LOWER_STACK_LEN: usize = 32;

/// Calls `f` with an ASCII-lowercased copy of `s`.
///
/// Short inputs are lowered into a stack buffer, longer or non-ASCII ones fall back to a heap
/// `String`.
pub fn with_lowered_stack<R>(s: &str, f: impl FnOnce(&str) -> R) -> R {
    if s.len() <= LOWER_STACK_LEN && s.is_ascii() {
        let mut buf = [0u8; LOWER_STACK_LEN];
        let bytes = &mut buf[..s.len()];
        bytes.copy_from_slice(s.as_bytes());
        bytes.make_ascii_lowercase();
        // ASCII in, ASCII out
        match std::str::from_utf8(bytes) {
            Ok(lowered) => f(lowered),
            Err(_) => f(&s.to_lowercase()),
        }
    } else {
        f(&s.to_lowercase())
    }
}

/// Returns the current user's home directory, if there is one.
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Expands a leading `~` to the home directory.
pub fn expand_home_path(path: &str) -> PathBuf {
    if path == "~" {
        return get_home().unwrap_or_else(|| PathBuf::from(path));
    }
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = get_home()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Safely clamp the request timeout.
///
/// Values outside [MIN_TIMEOUT_SECS]..=[MAX_TIMEOUT_SECS] are clamped and a warning is logged.
pub fn clamp_timeout_secs(value: u64) -> u64 {
    let clamped = value.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS);
    if clamped != value {
        tracing::warn!(
            "timeout_secs={} out of range ({}..={}), clamped to {}",
            value,
            MIN_TIMEOUT_SECS,
            MAX_TIMEOUT_SECS,
            clamped
        );
    }
    clamped
}

/// True for `http://` and `https://` sources.
pub fn is_remote_source(source: &str) -> bool {
    let lower = source.trim_start();
    ["http://", "https://"].iter().any(|scheme| {
        lower
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
