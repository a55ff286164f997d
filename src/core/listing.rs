//! Listing parsing for fstation.
//!
//! Provides the [Entry] struct which is used throughout fstation, and [parse] which scans an
//! autoindex document line by line and produces entries in document order.
//!
//! Parsing is tolerant: headers, separators and any line that doesn't look like
//! `<a href="...">name</a>  date time  size` are skipped, never reported.

use crate::core::decode::{
    UNKNOWN_SIZE, decode_entities, parse_date_to_timestamp, parse_size_to_bytes,
};

use regex::Regex;

use std::collections::HashSet;
use std::sync::LazyLock;

/// Link, visible name, two-word date token, size token.
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+href="([^"]+)"[^>]*>([^<]+)</a>\s+(\S+\s+\S+)\s+(\S+)"#)
        .expect("listing line pattern is valid")
});

const PARENT_HREF: &str = "../";
const PARENT_NAMES: [&str; 2] = ["../", ".."];

/// Raw size column together with its decoded byte count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeInfo {
    raw: String,
    bytes: i64,
}

impl SizeInfo {
    pub fn new(raw: impl Into<String>, bytes: i64) -> Self {
        Self {
            raw: raw.into(),
            bytes,
        }
    }

    /// Size of a directory or of anything whose size isn't known.
    pub fn unknown() -> Self {
        Self::new("-", UNKNOWN_SIZE)
    }

    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Decoded size, `-1` when unknown.
    #[inline]
    pub fn bytes(&self) -> i64 {
        self.bytes
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        self.bytes != UNKNOWN_SIZE
    }
}

/// Raw date column together with its decoded timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInfo {
    raw: String,
    timestamp: i64,
}

impl DateInfo {
    pub fn new(raw: impl Into<String>, timestamp: i64) -> Self {
        Self {
            raw: raw.into(),
            timestamp,
        }
    }

    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Epoch milliseconds, `0` when the date couldn't be decoded.
    #[inline]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

/// Represents a single row of a directory listing.
///
/// Holds the link target, display name, the kind flags and the size/date columns.
/// Created by [parse]; owned by the sort/filter engine once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    href: String,
    name: String,
    flags: u8,
    size: SizeInfo,
    date: DateInfo,
}

impl Entry {
    // Flag bit definitions
    pub(crate) const IS_DIR: u8 = 1 << 0;
    pub(crate) const IS_PARENT: u8 = 1 << 1;

    /// Builds a file entry.
    pub fn file(
        href: impl Into<String>,
        name: impl Into<String>,
        size: SizeInfo,
        date: DateInfo,
    ) -> Self {
        Self {
            href: href.into(),
            name: name.into(),
            flags: 0,
            size,
            date,
        }
    }

    /// Builds a directory entry. Directories never carry a size.
    pub fn dir(href: impl Into<String>, name: impl Into<String>, date: DateInfo) -> Self {
        Self {
            href: href.into(),
            name: name.into(),
            flags: Self::IS_DIR,
            size: SizeInfo::unknown(),
            date,
        }
    }

    /// Builds the "go up" entry.
    pub fn parent(date: DateInfo) -> Self {
        Self {
            href: PARENT_HREF.to_string(),
            name: "..".to_string(),
            flags: Self::IS_DIR | Self::IS_PARENT,
            size: SizeInfo::unknown(),
            date,
        }
    }

    // Accessors

    #[inline]
    pub fn href(&self) -> &str {
        &self.href
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn size(&self) -> &SizeInfo {
        &self.size
    }

    #[inline]
    pub fn date(&self) -> &DateInfo {
        &self.date
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    #[inline]
    pub fn is_parent(&self) -> bool {
        self.flags & Self::IS_PARENT != 0
    }
}

/// Parses an autoindex document into entries, in document order.
///
/// Lines are matched independently; anything that isn't a listing row is dropped.
/// Duplicate hrefs and any parent link after the first are dropped too, so the result always
/// has unique hrefs and at most one parent entry.
///
/// # Returns
/// The parsed entries. Empty or link-free input gives an empty vector.
pub fn parse(markup: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut has_parent = false;
    let mut skipped = 0usize;

    for line in markup.lines() {
        let Some(caps) = LINE_RE.captures(line) else {
            continue;
        };
        let (Some(href), Some(name), Some(date), Some(size)) =
            (caps.get(1), caps.get(2), caps.get(3), caps.get(4))
        else {
            continue;
        };
        let href = href.as_str();

        if !seen.insert(href) {
            skipped += 1;
            continue;
        }

        let entry = parse_row(href, name.as_str(), date.as_str(), size.as_str());
        if entry.is_parent() {
            if has_parent {
                skipped += 1;
                continue;
            }
            has_parent = true;
        }
        entries.push(entry);
    }

    tracing::debug!(
        entries = entries.len(),
        skipped,
        has_parent,
        "parsed listing"
    );
    entries
}

fn parse_row(href: &str, visible: &str, date: &str, size: &str) -> Entry {
    let is_dir = href.ends_with('/');
    let is_parent = href == PARENT_HREF || PARENT_NAMES.contains(&visible.trim());
    let date = DateInfo::new(date, parse_date_to_timestamp(date));

    let name = decode_entities(visible.trim());
    let name = if is_dir {
        name.strip_suffix('/').unwrap_or(&*name).to_string()
    } else {
        name.into_owned()
    };

    let mut flags = 0u8;
    if is_dir {
        flags |= Entry::IS_DIR;
    }
    if is_parent {
        flags |= Entry::IS_PARENT;
    }

    let size = if is_dir {
        SizeInfo::unknown()
    } else {
        SizeInfo::new(size.trim(), parse_size_to_bytes(size))
    };

    Entry {
        href: href.to_string(),
        name,
        flags,
        size,
        date,
    }
}
