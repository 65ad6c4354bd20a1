//! Folder discovery through the NAS web interface.
//!
//! The NAS exposes no documented listing API, so a folder is resolved by
//! walking a fixed fallback chain:
//!
//! 1. The candidate listing endpoints, in order. The first one answering 200
//!    wins, even if its body yields no entries.
//! 2. A web login followed by a directory browse of the fallback folder.
//! 3. The placeholder catalog.
//!
//! Resolution never fails; the chain always ends in one of these states.

use super::client::NasClient;
use super::parser::{HtmlScrapeParser, ListingParser};
use nas_cinema_common::{Movie, ResolutionSource};
use reqwest::{Client, StatusCode};
use std::sync::Arc;

/// Folder the placeholder catalog claims to live in.
const PLACEHOLDER_FOLDER: &str = "Films";

/// Filenames of the placeholder catalog.
const PLACEHOLDER_FILES: [&str; 3] = [
    "Example Movie 1.mp4",
    "Example Movie 2.mkv",
    "Example Movie 3.avi",
];

/// A catalog together with the step of the chain that produced it.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub source: ResolutionSource,
    pub movies: Vec<Movie>,
}

pub struct DirectoryResolver {
    nas: Arc<NasClient>,
    parser: Arc<dyn ListingParser>,
    fallback_folder: String,
}

impl DirectoryResolver {
    /// Create a resolver scraping HTML listings.
    pub fn new(nas: Arc<NasClient>, fallback_folder: impl Into<String>) -> Self {
        Self {
            nas,
            parser: Arc::new(HtmlScrapeParser::new()),
            fallback_folder: fallback_folder.into(),
        }
    }

    /// Replace the listing parser.
    pub fn with_parser(mut self, parser: Arc<dyn ListingParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Listing endpoints tried for `folder`, in order.
    pub fn candidate_urls(&self, folder: &str) -> Vec<String> {
        vec![
            self.nas
                .url(&format!("/cgi-bin/func.cgi?FUNC=dir&PATH=/{}", folder)),
            self.nas.url(&format!("/share/{}", folder)),
            self.nas.url(&format!("/files/{}", folder)),
            self.nas
                .url(&format!("/cgi-bin/browse.cgi?path=/{}", folder)),
        ]
    }

    /// Resolve the movies in `folder`.
    pub async fn list_folder(&self, folder: &str) -> Resolution {
        let session = match self.nas.session() {
            Some(client) => Some(client),
            None => {
                self.nas.ensure_session().await;
                self.nas.session()
            }
        };

        match session {
            Some(client) => {
                if let Some(movies) = self.try_candidates(&client, folder).await {
                    return Resolution {
                        source: ResolutionSource::Listing,
                        movies,
                    };
                }

                match self.try_web_interface(&client).await {
                    Ok(Some(movies)) => {
                        return Resolution {
                            source: ResolutionSource::WebInterface,
                            movies,
                        };
                    }
                    Ok(None) => {}
                    Err(e) => tracing::error!("Web interface access failed: {}", e),
                }
            }
            None => tracing::warn!("No NAS session available, skipping directory listing"),
        }

        tracing::warn!(folder, "Falling back to placeholder catalog");
        Resolution {
            source: ResolutionSource::Placeholder,
            movies: placeholder_catalog(),
        }
    }

    async fn try_candidates(&self, client: &Client, folder: &str) -> Option<Vec<Movie>> {
        for url in self.candidate_urls(folder) {
            let response = client
                .get(&url)
                .basic_auth(self.nas.username(), Some(self.nas.password()))
                .timeout(self.nas.listing_timeout())
                .send()
                .await;

            match response {
                Ok(response) if response.status() == StatusCode::OK => {
                    match response.text().await {
                        Ok(body) => {
                            let movies = self.parser.parse(&body, folder);
                            tracing::debug!(url = %url, count = movies.len(), "Listing resolved");
                            return Some(movies);
                        }
                        Err(e) => tracing::warn!("Failed to read {}: {}", url, e),
                    }
                }
                Ok(response) => {
                    tracing::debug!(url = %url, status = %response.status(), "Listing endpoint refused");
                }
                Err(e) => tracing::warn!("Failed to access {}: {}", url, e),
            }
        }

        None
    }

    /// Log in through the web UI, then browse the fallback folder.
    ///
    /// `Ok(None)` means one of the two steps answered with a non-200 status.
    async fn try_web_interface(&self, client: &Client) -> reqwest::Result<Option<Vec<Movie>>> {
        let login = client
            .post(self.nas.url("/cgi-bin/login.cgi"))
            .form(&[
                ("USER", self.nas.username()),
                ("PASS", self.nas.password()),
                ("LANGUAGE", "en"),
            ])
            .timeout(self.nas.listing_timeout())
            .send()
            .await?;

        if login.status() != StatusCode::OK {
            tracing::debug!(status = %login.status(), "Web interface login refused");
            return Ok(None);
        }

        let browse_path = format!("/{}", self.fallback_folder);
        let browse = client
            .get(self.nas.url("/cgi-bin/func.cgi"))
            .query(&[("FUNC", "dir"), ("PATH", browse_path.as_str())])
            .timeout(self.nas.listing_timeout())
            .send()
            .await?;

        if browse.status() != StatusCode::OK {
            tracing::debug!(status = %browse.status(), "Web interface browse refused");
            return Ok(None);
        }

        let body = browse.text().await?;
        Ok(Some(self.parser.parse(&body, &self.fallback_folder)))
    }
}

/// Sample catalog returned when the NAS cannot be listed at all.
pub fn placeholder_catalog() -> Vec<Movie> {
    PLACEHOLDER_FILES
        .iter()
        .map(|name| Movie::from_filename(PLACEHOLDER_FOLDER, name))
        .collect()
}
