//! Content-type classification by file extension.
//!
//! Classification trusts the stored filename; no content sniffing is
//! performed. Unknown extensions fall back to a generic binary type.

use std::path::Path;

/// Fallback type for unrecognized extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Maps a file extension (without dot, any case) to a content type.
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension.trim_start_matches('.').to_lowercase().as_str() {
        // Video containers
        "mp4" => "video/mp4",
        "m4v" => "video/x-m4v",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        "ogv" => "video/ogg",
        // Audio containers
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "wma" => "audio/x-ms-wma",
        _ => OCTET_STREAM,
    }
}

/// Maps a path to a content type via its extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(OCTET_STREAM, mime_for_extension)
}
