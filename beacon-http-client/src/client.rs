//! HTTP client factory.

use tracing::debug;
use url::Url;

use crate::{HttpClientConfig, HttpClientError, Result};

/// Build a client with default settings, routed through `proxy` when it is
/// non-empty.
///
/// Fails with a proxy error when `proxy` is set but is not an `http` or
/// `https` URL.
pub fn build_client_with_proxy(proxy: &str) -> Result<reqwest::Client> {
    HttpClientConfig::builder().proxy(proxy).build().build_client()
}

/// Build a client from a full configuration.
pub fn build_client(config: &HttpClientConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .pool_idle_timeout(config.pool_idle_timeout)
        .user_agent(&config.user_agent);

    if config.uses_proxy() {
        let proxy_url = parse_proxy(&config.proxy)?;
        debug!(proxy = %proxy_url, "Routing HTTP client through proxy");
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    } else {
        // Environment proxy variables are ignored: only an explicit proxy routes traffic.
        builder = builder.no_proxy();
    }

    Ok(builder.build()?)
}

/// Parse and check a proxy address.
pub fn parse_proxy(address: &str) -> Result<Url> {
    let address = address.trim();
    let url = Url::parse(address).map_err(|e| HttpClientError::InvalidProxy {
        address: address.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(HttpClientError::UnsupportedProxyScheme(other.to_string())),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(HttpClientError::InvalidProxy {
            address: address.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(url)
}
