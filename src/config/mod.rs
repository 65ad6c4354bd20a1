mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variables that override NAS connection settings
const ENV_NAS_URL: &str = "NAS_CINEMA_NAS_URL";
const ENV_NAS_USERNAME: &str = "NAS_CINEMA_NAS_USERNAME";
const ENV_NAS_PASSWORD: &str = "NAS_CINEMA_NAS_PASSWORD";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./nas-cinema.toml",
        "~/.config/nas-cinema/config.toml",
        "/etc/nas-cinema/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    let mut config = Config::default();
    apply_env_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Let credentials come from the environment instead of the config file
fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = std::env::var(ENV_NAS_URL) {
        config.nas.base_url = url;
    }
    if let Ok(username) = std::env::var(ENV_NAS_USERNAME) {
        config.nas.username = username;
    }
    if let Ok(password) = std::env::var(ENV_NAS_PASSWORD) {
        config.nas.password = password;
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    let base_url = url::Url::parse(&config.nas.base_url)
        .with_context(|| format!("Invalid NAS base URL: {}", config.nas.base_url))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        anyhow::bail!(
            "NAS base URL must use http or https, got '{}'",
            base_url.scheme()
        );
    }
    if base_url.cannot_be_a_base() {
        anyhow::bail!("NAS base URL cannot be used as a base: {}", base_url);
    }

    if config.nas.share_root.trim_matches('/').is_empty() {
        anyhow::bail!("NAS share root cannot be empty");
    }

    let timeouts = [
        ("probe_timeout_secs", config.nas.probe_timeout_secs),
        ("listing_timeout_secs", config.nas.listing_timeout_secs),
        ("stream_setup_timeout_secs", config.nas.stream_setup_timeout_secs),
    ];
    for (name, secs) in timeouts {
        if secs == 0 {
            anyhow::bail!("NAS {} must be greater than 0", name);
        }
    }

    if config.library.folders.is_empty() {
        anyhow::bail!("At least one library folder must be configured");
    }

    if let Some(dir) = &config.server.static_dir {
        if !dir.exists() {
            tracing::warn!("Static directory does not exist: {:?}", dir);
        }
    }

    Ok(())
}
