use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub nas: NasConfig,

    #[serde(default)]
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Built frontend to serve for any non-API route
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

/// Connection settings for the NAS web interface.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NasConfig {
    /// Base URL of the NAS web interface, e.g. `http://192.168.1.152`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Path segment under which shared folders are served for direct GETs
    #[serde(default = "default_share_root")]
    pub share_root: String,

    /// Timeout for the connectivity probe (default: 10)
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Timeout for each directory listing request (default: 15)
    #[serde(default = "default_listing_timeout")]
    pub listing_timeout_secs: u64,

    /// Timeout for opening a stream, up to the response headers (default: 30)
    #[serde(default = "default_stream_setup_timeout")]
    pub stream_setup_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://192.168.1.152".to_string()
}
fn default_username() -> String {
    "admin".to_string()
}
fn default_share_root() -> String {
    "share".to_string()
}
fn default_probe_timeout() -> u64 {
    10
}
fn default_listing_timeout() -> u64 {
    15
}
fn default_stream_setup_timeout() -> u64 {
    30
}

impl Default for NasConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: default_username(),
            password: String::new(),
            share_root: default_share_root(),
            probe_timeout_secs: default_probe_timeout(),
            listing_timeout_secs: default_listing_timeout(),
            stream_setup_timeout_secs: default_stream_setup_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Folders advertised by `GET /api/folders`
    #[serde(default = "default_folders")]
    pub folders: Vec<String>,

    /// Folder listed when `/api/movies` is called without `folder`
    #[serde(default = "default_folder")]
    pub default_folder: String,

    /// Folder browsed by the web-login fallback, whatever folder was requested
    #[serde(default = "default_folder")]
    pub fallback_folder: String,
}

fn default_folders() -> Vec<String> {
    vec!["Films".to_string(), "Movies".to_string(), "Videos".to_string()]
}
fn default_folder() -> String {
    "Films".to_string()
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            folders: default_folders(),
            default_folder: default_folder(),
            fallback_folder: default_folder(),
        }
    }
}
