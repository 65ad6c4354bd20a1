//! Discovery of media on the NAS web interface.
//!
//! - [`NasClient`] owns the shared session to the NAS and probes reachability.
//! - [`DirectoryResolver`] walks the listing fallback chain for a folder.
//! - [`ListingParser`] turns a listing payload into catalog entries.

mod client;
mod parser;
mod resolver;

pub use client::NasClient;
pub use parser::{HtmlScrapeParser, ListingParser};
pub use resolver::{placeholder_catalog, DirectoryResolver, Resolution};
