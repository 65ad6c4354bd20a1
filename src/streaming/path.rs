//! Containment of caller-supplied media paths.
//!
//! Paths arrive already percent-decoded from the route, so `%2e%2e` has become
//! `..` by the time it reaches [`normalize_movie_path`].

use nas_cinema_common::{Error, Result};

/// Normalize `raw` into path segments below the share root.
///
/// Empty and `.` segments are dropped and `..` pops the previous segment.
/// A `..` that would climb above the share root, a segment containing a
/// backslash or NUL, or a path with no segments left is rejected.
pub fn normalize_movie_path(raw: &str) -> Result<Vec<String>> {
    let mut segments: Vec<String> = Vec::new();

    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(invalid_path(raw));
                }
            }
            s if s.contains('\\') || s.contains('\0') => return Err(invalid_path(raw)),
            s => segments.push(s.to_string()),
        }
    }

    if segments.is_empty() {
        return Err(invalid_path(raw));
    }

    Ok(segments)
}

fn invalid_path(raw: &str) -> Error {
    tracing::warn!(path = raw, "Rejected movie path outside the share root");
    Error::invalid_input("Invalid movie path")
}
