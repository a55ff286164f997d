//! Core logic for fstation.
//!
//! This module contains the non-UI "engine" pieces:
//! - [listing]: parsing an autoindex document into [Entry] records (see [parse]).
//! - [decode]: size, date and HTML entity decoding for listing columns.
//! - [classify]: mapping filenames to a [PreviewCategory].
//! - [fetch]: the outbound I/O boundary ([Fetch], [HttpFetcher]).
//! - [worker]: the background fetch thread and its message protocol.
//! - [formatter]: helpers for turning entries and byte counts into display text.
//!
//! Most callers will import [parse], [Entry] and [classify] from this module.

pub mod classify;
pub mod decode;
pub mod fetch;
pub mod formatter;
pub mod listing;
pub mod worker;

pub use classify::{PreviewCategory, classify, classify_entry};
pub use decode::{
    UNKNOWN_SIZE, UNKNOWN_TIMESTAMP, decode_entities, parse_date_to_timestamp,
    parse_size_to_bytes,
};
pub use fetch::{Fetch, FetchError, FetchedBody, HttpFetcher};
pub use formatter::{format_byte_count, sanitize_to_exact_width};
pub use listing::{DateInfo, Entry, SizeInfo, parse};
