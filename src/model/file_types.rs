use std::fmt::{Display, Formatter};

/// the kinds of media the tagger manages. Anything that maps to [`FileTypes::Unknown`] is rejected on import
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Copy, Clone, Default)]
pub enum FileTypes {
    Audio,
    Comic,
    Document,
    Image,
    Video,
    #[default]
    Unknown,
}

impl FileTypes {
    /// determines the media type from the extension of `file_name`, case-insensitively
    pub fn from_file_name(file_name: &str) -> Self {
        let extension = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
            _ => return Self::Unknown,
        };
        match extension.as_str() {
            "aac" | "flac" | "m4a" | "mp3" | "ogg" | "opus" | "wav" => Self::Audio,
            "cb7" | "cbr" | "cbz" => Self::Comic,
            "djvu" | "epub" | "pdf" => Self::Document,
            "avif" | "bmp" | "gif" | "heic" | "jpeg" | "jpg" | "png" | "svg" | "tif" | "tiff"
            | "webp" => Self::Image,
            "avi" | "m4v" | "mkv" | "mov" | "mp4" | "mpeg" | "mpg" | "webm" | "wmv" => Self::Video,
            _ => Self::Unknown,
        }
    }

    pub fn is_supported(&self) -> bool {
        *self != Self::Unknown
    }
}

impl Display for FileTypes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Audio => "audio",
            Self::Comic => "comic",
            Self::Document => "document",
            Self::Image => "image",
            Self::Video => "video",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
