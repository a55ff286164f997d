//! Table and preview rendering.
//!
//! Every cell is sanitized to an exact column width so rows line up regardless of control
//! characters, tabs or wide glyphs in listing names.

use crate::app::{
    PreviewContent, PreviewSession, PreviewStatus, SortFilterEngine, SortKey,
    TEXT_PREVIEW_MAX_BYTES,
};
use crate::core::{Entry, classify_entry, format_byte_count, sanitize_to_exact_width};

use std::fmt;

const SIZE_WIDTH: usize = 10;
const DATE_WIDTH: usize = 20;
const KIND_WIDTH: usize = 7;
const MIN_NAME_WIDTH: usize = 12;
const GAP: &str = "  ";

/// Why a projection has no regular rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The listing has no rows at all, not even a parent link.
    NoEntries,
    /// The listing only holds the parent link.
    DirectoryEmpty,
    /// The active query matched nothing.
    NoMatches,
}

impl fmt::Display for EmptyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoEntries => "No entries in this listing",
            Self::DirectoryEmpty => "This directory is empty",
            Self::NoMatches => "No matching files",
        })
    }
}

/// Classifies a projection that has nothing but (at most) the parent link.
///
/// `query` is the query the projection was made with. An empty projection is a failed search
/// while a query is active, and an empty listing otherwise.
///
/// # Returns
/// `None` when there is at least one regular row to show.
pub fn empty_state(rows: &[&Entry], query: &str) -> Option<EmptyState> {
    match rows {
        [] if !query.is_empty() => Some(EmptyState::NoMatches),
        [] => Some(EmptyState::NoEntries),
        [only] if only.is_parent() => Some(EmptyState::DirectoryEmpty),
        _ => None,
    }
}

/// Renders the engine's current projection as a table `width` columns wide.
///
/// The active sort column carries the direction arrow. An empty projection renders the header,
/// the parent row if there is one, and the matching [EmptyState] message.
pub fn render_listing(engine: &SortFilterEngine, width: usize) -> String {
    let rows = engine.project();
    let sort_key = engine.sort_key();
    let direction = engine.sort_direction();
    let fixed = SIZE_WIDTH + DATE_WIDTH + KIND_WIDTH + GAP.len() * 3;
    let name_width = width.saturating_sub(fixed).max(MIN_NAME_WIDTH);

    let header = |label: &str, key: SortKey| {
        if key == sort_key {
            format!("{label} {}", direction.arrow())
        } else {
            label.to_string()
        }
    };

    let mut out = String::new();
    push_row(
        &mut out,
        name_width,
        [
            &header("Name", SortKey::Name),
            &header("Size", SortKey::Size),
            &header("Modified", SortKey::Date),
            "Preview",
        ],
    );
    out.push_str(&"-".repeat(name_width + fixed));
    out.push('\n');

    for entry in &rows {
        let name = if entry.is_parent() {
            "..".to_string()
        } else if entry.is_dir() {
            format!("{}/", entry.name())
        } else {
            entry.name().to_string()
        };
        let kind = classify_entry(entry);
        let kind = if kind.is_previewable() { kind.as_str() } else { "" };

        push_row(
            &mut out,
            name_width,
            [&name, entry.size().raw(), entry.date().raw(), kind],
        );
    }

    if let Some(state) = empty_state(&rows, engine.query()) {
        out.push('\n');
        out.push_str(&state.to_string());
        out.push('\n');
    }
    out
}

fn push_row(out: &mut String, name_width: usize, cells: [&str; 4]) {
    let [name, size, date, kind] = cells;
    let line = [
        sanitize_to_exact_width(name, name_width),
        sanitize_to_exact_width(size, SIZE_WIDTH),
        sanitize_to_exact_width(date, DATE_WIDTH),
        sanitize_to_exact_width(kind, KIND_WIDTH),
    ]
    .join(GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Renders the state of a preview session.
pub fn render_preview(session: &PreviewSession) -> String {
    let entry = session.entry();
    let mut out = format!("== {} [{}] ==\n", entry.name(), session.category());

    match session.status() {
        PreviewStatus::Idle => out.push_str("(idle)\n"),
        PreviewStatus::Loading => out.push_str("Loading...\n"),
        PreviewStatus::Failed(reason) => {
            out.push_str(&format!("Preview failed: {reason}\n"));
        }
        PreviewStatus::Loaded {
            content: PreviewContent::Reference(href),
            ..
        } => {
            out.push_str(&format!("{} preview: {href}\n", session.category()));
        }
        PreviewStatus::Loaded {
            content: PreviewContent::Text { text, total_bytes },
            truncated,
        } => {
            out.push_str(text);
            if !text.ends_with('\n') {
                out.push('\n');
            }
            if *truncated {
                out.push_str(&truncation_notice(*total_bytes));
                out.push('\n');
            }
        }
    }
    out
}

fn truncation_notice(total_bytes: Option<u64>) -> String {
    let shown = format_byte_count(TEXT_PREVIEW_MAX_BYTES as u64);
    match total_bytes {
        Some(total) => format!(
            "[File is large: showing the first {shown} of {}. Download it to see the rest.]",
            format_byte_count(total)
        ),
        None => format!("[File is large: showing the first {shown}. Download it to see the rest.]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SortDirection;
    use crate::core::{DateInfo, SizeInfo, parse};

    fn sample() -> Vec<Entry> {
        vec![
            Entry::parent(DateInfo::new("", 0)),
            Entry::dir("docs/", "docs", DateInfo::new("01-Jan-2024 10:00", 1)),
            Entry::file(
                "notes.md",
                "notes.md",
                SizeInfo::new("1.2K", 1228),
                DateInfo::new("02-Jan-2024 11:00", 2),
            ),
        ]
    }

    fn engine_with(entries: Vec<Entry>) -> SortFilterEngine {
        let mut engine = SortFilterEngine::new();
        engine.load(entries);
        engine
    }

    #[test]
    fn empty_states() {
        let entries = sample();
        assert_eq!(empty_state(&[], ""), Some(EmptyState::NoEntries));
        assert_eq!(empty_state(&[], "zzz"), Some(EmptyState::NoMatches));
        assert_eq!(
            empty_state(&[&entries[0]], ""),
            Some(EmptyState::DirectoryEmpty)
        );
        assert_eq!(empty_state(&[&entries[0], &entries[1]], ""), None);
    }

    #[test]
    fn table_marks_sort_column_and_dirs() {
        let mut engine = SortFilterEngine::with_sort(SortKey::Size, SortDirection::Descending);
        engine.load(sample());
        let table = render_listing(&engine, 80);

        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].contains("Size ▼"));
        assert!(!lines[0].contains("Name ▼"));
        assert!(lines[2].starts_with(".."));
        assert!(lines[3].starts_with("docs/"));
        assert!(lines[4].starts_with("notes.md"));
        assert!(lines[4].contains("1.2K"));
        assert!(lines[4].contains("text"));
        assert!(empty_state(&engine.project(), engine.query()).is_none());
    }

    #[test]
    fn table_reports_empty_listing() {
        // nginx prints the parent link without columns, so an empty directory parses to nothing
        let engine = engine_with(parse("<pre><a href=\"../\">../</a>\n</pre>"));
        let table = render_listing(&engine, 80);
        assert!(table.trim_end().ends_with("No entries in this listing"));
        assert!(!table.contains("No matching files"));
    }

    #[test]
    fn table_reports_empty_directory() {
        let engine = engine_with(vec![Entry::parent(DateInfo::new("", 0))]);
        let table = render_listing(&engine, 80);
        assert!(table.contains(".."));
        assert!(table.trim_end().ends_with("This directory is empty"));
    }

    #[test]
    fn table_reports_failed_search() {
        let mut engine = engine_with(sample());
        engine.set_query("zzz");
        let table = render_listing(&engine, 80);
        assert!(table.trim_end().ends_with("No matching files"));
    }

    #[test]
    fn notice_mentions_limit() {
        assert!(truncation_notice(None).contains("100 KiB"));
        assert!(truncation_notice(Some(2 * 1024 * 1024)).contains("2 MiB"));
    }
}
