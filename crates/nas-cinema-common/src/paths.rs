//! Path utilities for recognizing video files in remote listings.
//!
//! Remote listings hand us raw strings (hrefs, link text, form values) rather
//! than filesystem paths, so these helpers work on `&str` and always treat `/`
//! as the separator.

/// Video file extensions recognized in remote listings.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v"];

/// Check if a name ends with a recognized video extension (case-insensitive).
///
/// # Examples
///
/// ```
/// use nas_cinema_common::paths::is_video_filename;
///
/// assert!(is_video_filename("movie.mkv"));
/// assert!(is_video_filename("/share/Films/movie.MP4"));
/// assert!(!is_video_filename("subtitle.srt"));
/// ```
pub fn is_video_filename(name: &str) -> bool {
    let lower = name.to_lowercase();
    VIDEO_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// Return the trailing component of a `/`-separated string.
///
/// # Examples
///
/// ```
/// use nas_cinema_common::paths::file_name;
///
/// assert_eq!(file_name("/share/Films/Heat.mkv"), "Heat.mkv");
/// assert_eq!(file_name("Heat.mkv"), "Heat.mkv");
/// ```
pub fn file_name(raw: &str) -> &str {
    raw.rsplit('/').next().unwrap_or(raw)
}

/// Lowercased text after the final `.` of a filename.
///
/// A name without a dot yields the whole name, lowercased.
pub fn format_of(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or(file_name)
        .to_lowercase()
}

/// Get the list of recognized video file extensions.
#[must_use]
pub fn video_extensions() -> &'static [&'static str] {
    VIDEO_EXTENSIONS
}
