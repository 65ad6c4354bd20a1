use crate::config::NasConfig;
use parking_lot::Mutex;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Shared connection context for the NAS web interface.
///
/// Holds at most one session client. The session carries a cookie store so the
/// web-login fallback can reuse whatever the login endpoint sets. Streams use a
/// separate transfer client that is never torn down by a failed probe.
pub struct NasClient {
    config: NasConfig,
    base_url: String,
    session: Mutex<Option<Client>>,
    transfer: Client,
}

impl NasClient {
    pub fn new(config: &NasConfig) -> Self {
        let transfer = Client::builder().build().unwrap_or_else(|e| {
            tracing::warn!("Failed to build NAS transfer client: {}", e);
            Client::new()
        });

        Self {
            config: config.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session: Mutex::new(None),
            transfer,
        }
    }

    /// Probe the NAS, creating the session if none exists.
    ///
    /// Returns `true` when the base URL answers 200. Any other outcome drops the
    /// session so the next caller starts from a clean slate.
    pub async fn ensure_session(&self) -> bool {
        let client = self
            .session
            .lock()
            .get_or_insert_with(build_session)
            .clone();

        let probe = client
            .get(&self.base_url)
            .timeout(self.probe_timeout())
            .send()
            .await;

        match probe {
            Ok(response) if response.status() == StatusCode::OK => {
                tracing::info!("Successfully connected to NAS at {}", self.base_url);
                // A concurrent failed probe may have cleared the slot meanwhile.
                self.session.lock().get_or_insert(client);
                true
            }
            Ok(response) => {
                tracing::warn!(
                    status = %response.status(),
                    "NAS probe returned unexpected status"
                );
                self.close();
                false
            }
            Err(e) => {
                tracing::error!("Failed to connect to NAS: {}", e);
                self.close();
                false
            }
        }
    }

    /// Current session, if one has been established.
    pub fn session(&self) -> Option<Client> {
        self.session.lock().clone()
    }

    /// Drop the session.
    pub fn close(&self) {
        if self.session.lock().take().is_some() {
            tracing::debug!("NAS session closed");
        }
    }

    /// Client used for media transfers.
    pub fn transfer_client(&self) -> &Client {
        &self.transfer
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path on the NAS, e.g. `/cgi-bin/login.cgi`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn username(&self) -> &str {
        &self.config.username
    }

    pub fn password(&self) -> &str {
        &self.config.password
    }

    pub fn share_root(&self) -> &str {
        &self.config.share_root
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.config.probe_timeout_secs)
    }

    pub fn listing_timeout(&self) -> Duration {
        Duration::from_secs(self.config.listing_timeout_secs)
    }

    pub fn stream_setup_timeout(&self) -> Duration {
        Duration::from_secs(self.config.stream_setup_timeout_secs)
    }
}

fn build_session() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to build NAS session client with cookies: {}", e);
            Client::new()
        })
}
