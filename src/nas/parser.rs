//! Extraction of video entries from directory listing payloads.

use nas_cinema_common::paths::{is_video_filename, video_extensions};
use nas_cinema_common::Movie;
use regex::Regex;
use std::sync::LazyLock;

/// Strategy for turning a listing payload into catalog entries.
///
/// The resolver only decides *which* endpoint answered; how its body is read
/// is up to the parser, so a NAS with a structured listing API can plug in its
/// own implementation.
pub trait ListingParser: Send + Sync {
    /// Extract the media entries in `body`, rooted at `folder`.
    fn parse(&self, body: &str, folder: &str) -> Vec<Movie>;
}

/// Attribute and text patterns, applied in this order.
static LISTING_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    let exts = video_extensions().join("|");
    [
        format!(r#"(?i)href="([^"]*\.(?:{exts}))""#),
        format!(r#"(?i)>([^<]*\.(?:{exts}))<"#),
        format!(r#"(?i)name="([^"]*\.(?:{exts}))""#),
    ]
    .map(|pattern| Regex::new(&pattern).expect("listing pattern is a valid regex"))
});

/// Scrapes video filenames out of HTML (or HTML-like) listings.
///
/// Every pattern contributes its own matches, so a file linked as
/// `<a href="x.mp4">x.mp4</a>` shows up twice. Callers get the entries in
/// pattern order: all `href` matches, then inner text, then `name` attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlScrapeParser;

impl HtmlScrapeParser {
    pub fn new() -> Self {
        Self
    }
}

impl ListingParser for HtmlScrapeParser {
    fn parse(&self, body: &str, folder: &str) -> Vec<Movie> {
        LISTING_PATTERNS
            .iter()
            .flat_map(|pattern| pattern.captures_iter(body))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|raw| is_video_filename(raw))
            .map(|raw| Movie::from_filename(folder, raw))
            .collect()
    }
}
