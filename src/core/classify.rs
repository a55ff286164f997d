//! Preview classification for listing entries.
//!
//! Maps a filename to the kind of inline viewer that can show it. The decision only looks at the
//! extension; the tables below are checked in a fixed order and the first hit wins.

use crate::core::Entry;
use crate::utils::with_lowered_stack;

use phf::phf_set;

use std::fmt;

/// The kind of inline preview applicable to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewCategory {
    Image,
    Video,
    Audio,
    Pdf,
    Text,
    None,
}

impl PreviewCategory {
    /// Media categories are shown by reference to the entry's href, without fetching anything.
    #[inline]
    pub fn is_media(self) -> bool {
        matches!(self, Self::Image | Self::Video | Self::Audio | Self::Pdf)
    }

    #[inline]
    pub fn is_previewable(self) -> bool {
        self != Self::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Pdf => "pdf",
            Self::Text => "text",
            Self::None => "none",
        }
    }
}

impl fmt::Display for PreviewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static IMAGE_EXT: phf::Set<&'static str> = phf_set! {
    "jpg", "jpeg", "png", "gif", "bmp", "svg", "webp", "ico", "avif",
};

static VIDEO_EXT: phf::Set<&'static str> = phf_set! {
    "mp4", "webm", "ogg",
};

static AUDIO_EXT: phf::Set<&'static str> = phf_set! {
    "mp3", "wav", "ogg", "aac", "flac", "m4a", "opus",
};

static PDF_EXT: phf::Set<&'static str> = phf_set! {
    "pdf",
};

static TEXT_EXT: phf::Set<&'static str> = phf_set! {
    "txt", "log", "md", "json", "xml", "yml", "yaml", "csv", "ini", "cfg", "conf", "toml",
    "py", "js", "ts", "jsx", "tsx", "css", "html", "htm", "java", "c", "cpp", "h", "hpp",
    "cs", "go", "rs", "rb", "php", "sh", "bash", "bat", "ps1", "sql", "vue", "svelte",
    "lua", "r", "swift", "kt", "scala", "dart", "rtf",
};

/// Lookup order. Media tables come before text.
static CATEGORY_TABLES: [(PreviewCategory, &phf::Set<&'static str>); 5] = [
    (PreviewCategory::Image, &IMAGE_EXT),
    (PreviewCategory::Video, &VIDEO_EXT),
    (PreviewCategory::Audio, &AUDIO_EXT),
    (PreviewCategory::Pdf, &PDF_EXT),
    (PreviewCategory::Text, &TEXT_EXT),
];

/// Classifies a filename.
///
/// Directories and the parent entry are never previewable. A name without a `.` has no
/// extension and is never previewable either.
pub fn classify(filename: &str, is_dir: bool, is_parent: bool) -> PreviewCategory {
    if is_dir || is_parent {
        return PreviewCategory::None;
    }
    let Some((_, ext)) = filename.rsplit_once('.') else {
        return PreviewCategory::None;
    };
    if ext.is_empty() {
        return PreviewCategory::None;
    }

    with_lowered_stack(ext, |lowered| {
        CATEGORY_TABLES
            .iter()
            .find(|(_, table)| table.contains(lowered))
            .map(|(category, _)| *category)
            .unwrap_or(PreviewCategory::None)
    })
}

/// Classifies a listing entry.
#[inline]
pub fn classify_entry(entry: &Entry) -> PreviewCategory {
    classify(entry.name(), entry.is_dir(), entry.is_parent())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_by_extension() {
        let cases = [
            ("photo.JPG", PreviewCategory::Image),
            ("clip.webm", PreviewCategory::Video),
            ("song.flac", PreviewCategory::Audio),
            ("paper.PDF", PreviewCategory::Pdf),
            ("main.rs", PreviewCategory::Text),
            ("README.md", PreviewCategory::Text),
            ("archive.tar.gz", PreviewCategory::None),
            ("Makefile", PreviewCategory::None),
            ("trailing.", PreviewCategory::None),
        ];
        for (name, expected) in cases {
            assert_eq!(classify(name, false, false), expected, "{name}");
        }
    }

    #[test]
    fn video_wins_over_audio_for_ogg() {
        assert_eq!(classify("track.ogg", false, false), PreviewCategory::Video);
    }

    #[test]
    fn dirs_and_parent_are_never_previewable() {
        assert_eq!(classify("pics.png", true, false), PreviewCategory::None);
        assert_eq!(classify("notes.txt", false, true), PreviewCategory::None);
        assert_eq!(classify("..", true, true), PreviewCategory::None);
    }

    #[test]
    fn hidden_file_uses_text_after_dot() {
        // ".bashrc" has extension "bashrc", which isn't in any table
        assert_eq!(classify(".bashrc", false, false), PreviewCategory::None);
        assert_eq!(classify(".config.json", false, false), PreviewCategory::Text);
    }
}
