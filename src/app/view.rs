//! Sorting and filtering of the loaded listing.
//!
//! [SortFilterEngine] owns the entries of the current listing together with the sort key,
//! direction and search query, and turns them into the ordering the front end renders.
//!
//! A projection is always laid out as `parent ++ dirs ++ files`. The parent link keeps its slot
//! at the top, directories stay grouped ahead of files, and each group is sorted on its own.

use crate::core::Entry;

use serde::Deserialize;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Column the listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Size,
    #[serde(alias = "time", alias = "modified")]
    Date,
}

/// Sort direction. Descending reverses the comparator of every group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Arrow shown next to the active column header.
    pub fn arrow(self) -> char {
        match self {
            Self::Ascending => '▲',
            Self::Descending => '▼',
        }
    }

    #[inline]
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Self::Ascending => ord,
            Self::Descending => ord.reverse(),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "size" => Ok(Self::Size),
            "date" | "time" | "modified" => Ok(Self::Date),
            other => Err(format!(
                "unknown sort key '{other}' (expected name, size or date)"
            )),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!(
                "unknown sort direction '{other}' (expected asc or desc)"
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Size => "size",
            Self::Date => "date",
        })
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        })
    }
}

/// View state of one listing: entries, sort settings and the active query.
///
/// Mutated only through [load](Self::load), [set_sort](Self::set_sort) and
/// [set_query](Self::set_query); [project](Self::project) never changes anything.
#[derive(Debug, Clone, Default)]
pub struct SortFilterEngine {
    entries: Vec<Entry>,
    sort_key: SortKey,
    sort_direction: SortDirection,
    query: String,
}

impl SortFilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a starting sort order, as read from the configuration.
    pub fn with_sort(sort_key: SortKey, sort_direction: SortDirection) -> Self {
        Self {
            sort_key,
            sort_direction,
            ..Self::default()
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    #[inline]
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    // Setters / mutators

    /// Replaces the entry set. Sort settings and query are kept.
    pub fn load(&mut self, entries: Vec<Entry>) {
        tracing::debug!(count = entries.len(), "listing loaded");
        self.entries = entries;
    }

    /// Selecting the active key flips the direction; any other key starts ascending.
    pub fn set_sort(&mut self, key: SortKey) {
        if key == self.sort_key {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_key = key;
            self.sort_direction = SortDirection::Ascending;
        }
    }

    /// Replaces the query verbatim. Callers pass it trimmed and lower-cased.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Computes the rendered ordering.
    ///
    /// With a non-empty query only non-parent entries whose name contains the query
    /// (ignoring case) survive, and the parent link is left out. The survivors are split into
    /// parent, directories and files, directories and files are sorted separately with a
    /// stable sort, and the groups are concatenated in that order.
    pub fn project(&self) -> Vec<&Entry> {
        let query = self.query.to_lowercase();
        let filtering = !query.is_empty();

        let mut parent: Option<&Entry> = None;
        let mut dirs: Vec<&Entry> = Vec::new();
        let mut files: Vec<&Entry> = Vec::new();

        for entry in &self.entries {
            if entry.is_parent() {
                if !filtering && parent.is_none() {
                    parent = Some(entry);
                }
                continue;
            }
            if filtering && !entry.name().to_lowercase().contains(&query) {
                continue;
            }
            if entry.is_dir() {
                dirs.push(entry);
            } else {
                files.push(entry);
            }
        }

        let key = self.sort_key;
        let direction = self.sort_direction;
        let compare = |a: &&Entry, b: &&Entry| direction.apply(compare_by(key, a, b));
        dirs.sort_by(compare);
        files.sort_by(compare);

        let mut out = Vec::with_capacity(dirs.len() + files.len() + 1);
        out.extend(parent);
        out.extend(dirs);
        out.extend(files);
        out
    }
}

fn compare_by(key: SortKey, a: &Entry, b: &Entry) -> Ordering {
    match key {
        SortKey::Name => cmp_ignore_case(a.name(), b.name()),
        SortKey::Size => a.size().bytes().cmp(&b.size().bytes()),
        SortKey::Date => a.date().timestamp().cmp(&b.date().timestamp()),
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
