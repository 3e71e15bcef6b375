use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::Result;

const USER_AGENT: &str = concat!("cp-live/", env!("CARGO_PKG_VERSION"));

pub fn install_rustls_provider() {
    static PROVIDER_INSTALLED: OnceLock<()> = OnceLock::new();
    PROVIDER_INSTALLED.get_or_init(|| {
        if let Err(e) = rustls::crypto::aws_lc_rs::default_provider().install_default() {
            // Safe to ignore: can happen if another crate installed it first.
            debug!(existing_provider = ?e, "rustls CryptoProvider already installed");
        }
    });
}

/// Build the shared `reqwest::Client` used for API polling.
///
/// A zero `request_timeout` leaves reqwest's default (no timeout).
pub fn build_client(request_timeout: Duration) -> Result<reqwest::Client> {
    install_rustls_provider();

    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if request_timeout > Duration::ZERO {
        builder = builder.timeout(request_timeout);
    }

    Ok(builder.build()?)
}

/// Fetches a URL and returns the raw response body.
///
/// An `Ok` body may be empty; callers decide what an empty body means.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// `HttpFetch` over reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            // The body of an API error is still returned; it decodes without items.
            warn!(status = %status, "Non-success response from remote API");
        }
        let body = response.text().await?;
        debug!(status = %status, body_len = body.len(), "Fetched remote body");
        Ok(body)
    }
}
