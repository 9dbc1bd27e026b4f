//! src/util/icons.rs
//! ============================================================================
//! # File Type Icons (Material Design identifiers)
//!
//! Maps file extensions to the icon identifiers consumed by UI surfaces.

pub const FOLDER_ICON: &str = "mdi-folder";
pub const FILE_ICON: &str = "mdi-file";

/// Icon identifier for a file extension (with leading dot, case-insensitive).
#[must_use]
pub fn icon_for_ext(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        ".pdf" => "mdi-file-pdf-box",
        ".doc" | ".docx" => "mdi-file-word",
        ".xls" | ".xlsx" => "mdi-file-excel",
        ".ppt" | ".pptx" => "mdi-file-powerpoint",
        ".txt" => "mdi-file-document",
        ".jpg" | ".jpeg" | ".png" | ".gif" => "mdi-file-image",
        ".mp4" | ".avi" | ".mkv" => "mdi-file-video",
        ".mp3" | ".wav" | ".flac" => "mdi-file-music",
        ".zip" | ".rar" | ".7z" => "mdi-folder-zip",
        _ => FILE_ICON,
    }
}
