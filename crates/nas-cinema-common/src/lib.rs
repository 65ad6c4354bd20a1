//! NAS-Cinema-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across nas-cinema:
//!
//! - **Typed IDs**: A UUID wrapper for catalog entries
//! - **Core Types**: Catalog entries, connection status and API payloads
//! - **Path Utilities**: Video extension detection and filename helpers
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use nas_cinema_common::{Movie, Error, Result};
//! use nas_cinema_common::paths::is_video_filename;
//!
//! let movie = Movie::from_filename("Films", "Heat.mkv");
//! assert_eq!(movie.path, "/Films/Heat.mkv");
//! assert_eq!(movie.format.as_deref(), Some("mkv"));
//!
//! assert!(is_video_filename("trailer.MP4"));
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("Movie not found"))
//! }
//! ```

pub mod error;
pub mod ids;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
