//! Media streaming module.
//!
//! Relays movies from the NAS share with HTTP range support.
//!
//! # Routes
//!
//! - `GET /api/stream/*movie_path` - Relay a movie, forwarding the `Range` header

mod path;
mod relay;

pub use path::normalize_movie_path;
pub use relay::{stream_movie, StreamRelay, RELAY_CHUNK_SIZE};

use axum::{routing::get, Router};

use crate::server::AppContext;

/// Create the streaming router.
pub fn stream_router() -> Router<AppContext> {
    Router::new().route("/api/stream/*movie_path", get(stream_movie))
}
