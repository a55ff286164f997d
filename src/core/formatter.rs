//! Display formatting for fstation.
//!
//! Cell sanitizing for the plain-text table, and human readable byte counts for notices.

use humansize::{BINARY, format_size};
use unicode_width::UnicodeWidthChar;

/// Formats a byte count like `100 KiB`.
pub fn format_byte_count(bytes: u64) -> String {
    format_size(bytes, BINARY)
}

/// Cleans a string to exactly `width` columns
/// by removing control characters, expanding tabs to 4 spaces,
/// and truncating or padding the string to fit exactly.
///
/// Truncated text ends in `…` when there's room for it.
///
/// # Returns
/// A sanitized string that is exactly `width` columns wide.
pub fn sanitize_to_exact_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut current_w = 0;
    let mut cut = false;

    for char in line.chars() {
        if char == '\t' {
            let space_count = 4 - (current_w % 4);
            if current_w + space_count > width {
                cut = true;
                break;
            }
            out.push_str(&" ".repeat(space_count));
            current_w += space_count;
            continue;
        }

        if char.is_control() {
            continue;
        }

        let w = char.width().unwrap_or(0);
        if current_w + w > width {
            cut = true;
            break;
        }

        out.push(char);
        current_w += w;
    }

    if cut && width > 0 {
        // make room for the ellipsis
        while current_w + 1 > width {
            let Some(last) = out.pop() else { break };
            current_w -= last.width().unwrap_or(0);
        }
        out.push('…');
        current_w += 1;
    }

    if current_w < width {
        out.push_str(&" ".repeat(width - current_w));
    }

    out
}
