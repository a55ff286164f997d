//! Miscellaneous utility functions for fstation.
//!
//! This module holds the [helpers] submodule with small, commonly used utilities, and the [cli]
//! submodule with command line parsing for the `fst` binary.

pub mod cli;
pub mod helpers;

pub use helpers::{
    DEFAULT_TIMEOUT_SECS, clamp_timeout_secs, expand_home_path, get_home, is_remote_source,
    with_lowered_stack,
};
