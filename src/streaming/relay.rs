//! Range-aware relay of media from the NAS share.
//!
//! The NAS serves shared folders under its share root; a movie is fetched with
//! a plain authenticated GET and its body copied to the caller chunk by chunk.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
};
use futures::TryStreamExt;
use nas_cinema_common::{Error, Result};
use std::sync::Arc;
use tokio_util::io::{ReaderStream, StreamReader};
use url::Url;

use super::path::normalize_movie_path;
use crate::nas::NasClient;
use crate::server::{error::ApiError, AppContext};

/// Size of the chunks relayed to the caller.
pub const RELAY_CHUNK_SIZE: usize = 8 * 1024;

/// Content type used when the NAS does not send one.
const DEFAULT_CONTENT_TYPE: &str = "video/mp4";

pub struct StreamRelay {
    nas: Arc<NasClient>,
}

impl StreamRelay {
    pub fn new(nas: Arc<NasClient>) -> Self {
        Self { nas }
    }

    /// URL of `movie_path` on the NAS share.
    pub fn share_url(&self, movie_path: &str) -> Result<Url> {
        let segments = normalize_movie_path(movie_path)?;

        let mut url = Url::parse(self.nas.base_url())
            .map_err(|e| Error::internal(format!("Invalid NAS base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::internal("NAS base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(self.nas.share_root().split('/').filter(|s| !s.is_empty()))
            .extend(&segments);

        Ok(url)
    }

    /// Open `movie_path` on the NAS and relay it.
    ///
    /// `range` is forwarded untouched. The response is 206 with `Content-Range`
    /// only when the caller asked for a range and the NAS honoured it; any
    /// other 200/206 answer is relayed as a plain 200.
    pub async fn stream(&self, movie_path: &str, range: Option<&HeaderValue>) -> Result<Response> {
        let url = self.share_url(movie_path)?;

        let mut request = self
            .nas
            .transfer_client()
            .get(url.clone())
            .basic_auth(self.nas.username(), Some(self.nas.password()));
        if let Some(range) = range {
            request = request.header(header::RANGE, range.clone());
        }

        let setup_timeout = self.nas.stream_setup_timeout();
        let upstream = match tokio::time::timeout(setup_timeout, request.send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::error!("Error streaming movie {}: {}", url, e);
                return Err(Error::upstream(format!("Streaming error: {}", e)));
            }
            Err(_) => {
                tracing::error!("Timed out opening {} after {:?}", url, setup_timeout);
                return Err(Error::upstream(format!(
                    "Streaming error: NAS did not respond within {} seconds",
                    setup_timeout.as_secs()
                )));
            }
        };

        let upstream_status = upstream.status();
        if upstream_status != StatusCode::OK && upstream_status != StatusCode::PARTIAL_CONTENT {
            tracing::debug!(url = %url, status = %upstream_status, "NAS refused movie");
            return Err(Error::not_found("Movie not found"));
        }

        let partial = range.is_some() && upstream_status == StatusCode::PARTIAL_CONTENT;
        let upstream_headers = upstream.headers().clone();

        let content_type = upstream_headers
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

        let mut builder = Response::builder()
            .status(if partial {
                StatusCode::PARTIAL_CONTENT
            } else {
                StatusCode::OK
            })
            .header(header::CONTENT_TYPE, content_type)
            .header(header::ACCEPT_RANGES, "bytes");

        if let Some(length) = upstream_headers.get(header::CONTENT_LENGTH) {
            builder = builder.header(header::CONTENT_LENGTH, length.clone());
        }
        if partial {
            if let Some(content_range) = upstream_headers.get(header::CONTENT_RANGE) {
                builder = builder.header(header::CONTENT_RANGE, content_range.clone());
            }
        }

        let relay_url = url.to_string();
        let bytes = upstream
            .bytes_stream()
            .map_err(std::io::Error::other)
            .inspect_err(move |e| tracing::warn!("Stream from {} interrupted: {}", relay_url, e));
        let chunks = ReaderStream::with_capacity(StreamReader::new(bytes), RELAY_CHUNK_SIZE);

        tracing::debug!(url = %url, status = %upstream_status, partial, "Relaying movie");

        builder
            .body(Body::from_stream(chunks))
            .map_err(|e| Error::internal(format!("Streaming error: {}", e)))
    }
}

/// `GET /api/stream/*movie_path`
pub async fn stream_movie(
    State(ctx): State<AppContext>,
    Path(movie_path): Path<String>,
    headers: HeaderMap,
) -> std::result::Result<Response, ApiError> {
    // An empty Range header is treated as absent.
    let range = headers.get(header::RANGE).filter(|v| !v.is_empty());
    Ok(ctx.relay.stream(&movie_path, range).await?)
}
