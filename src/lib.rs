//! Library crate for fstation.
//!
//! Turns web server directory listings (nginx `autoindex` and friends) into a sortable,
//! searchable, previewable file browser model. The shipped front end is the `fst` binary
//! (`src/main.rs`); everything it does goes through the modules below.
//!
//! - [core]: listing parsing, decoding, preview classification and the fetch worker.
//! - [app]: view state, debounced search and preview sessions.
//! - [config]: `station.toml` loading.
//! - [ui]: plain-text table and preview rendering.
//! - [utils]: CLI parsing and small helpers.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
pub mod utils;
