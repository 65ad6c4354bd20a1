//! Core type definitions for catalog entries and API payloads.
//!
//! Field names match the JSON contract of the HTTP API.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::MovieId;
use crate::paths::{file_name, format_of};

/// A video file discovered on the backing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Identifier generated at discovery time; not stable across requests.
    pub id: MovieId,
    /// Display name, the remote filename.
    pub name: String,
    /// Store-relative path, `/{folder}/{filename}`.
    pub path: String,
    pub size: Option<u64>,
    /// Lowercased filename extension.
    pub format: Option<String>,
    pub thumbnail: Option<String>,
}

impl Movie {
    /// Build an entry for `raw` found in `folder`.
    ///
    /// Any leading path in `raw` is discarded; only the trailing filename is kept.
    pub fn from_filename(folder: &str, raw: &str) -> Self {
        let name = file_name(raw);
        Self {
            id: MovieId::new(),
            name: name.to_string(),
            path: format!("/{}/{}", folder, name),
            size: None,
            format: Some(format_of(name)),
            thumbnail: None,
        }
    }
}

/// Result of probing the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub message: String,
}

impl ConnectionStatus {
    pub fn from_probe(connected: bool) -> Self {
        let message = if connected {
            "Connected to NAS"
        } else {
            "Failed to connect to NAS"
        };
        Self {
            connected,
            message: message.to_string(),
        }
    }
}

/// Which step of the discovery fallback chain produced a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// One of the candidate listing endpoints answered.
    Listing,
    /// The web login followed by a directory browse answered.
    WebInterface,
    /// Nothing answered; the fixed sample catalog was returned.
    Placeholder,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listing => write!(f, "listing"),
            Self::WebInterface => write!(f, "web_interface"),
            Self::Placeholder => write!(f, "placeholder"),
        }
    }
}

/// Body of `GET /api/movies`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviesResponse {
    pub movies: Vec<Movie>,
    pub total: usize,
    pub source: ResolutionSource,
}

/// Body of `GET /api/folders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldersResponse {
    pub folders: Vec<String>,
}

/// Body of `GET /api/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    pub message: String,
    pub version: String,
}
