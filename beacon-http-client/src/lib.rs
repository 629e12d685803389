//! # Beacon HTTP Client
//!
//! Builds the `reqwest` client a notifier uses to reach its webhook,
//! optionally routed through an HTTP(S) proxy.
//!
//! ```rust,no_run
//! use beacon_http_client::{build_client_with_proxy, HttpClientConfig};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), beacon_http_client::HttpClientError> {
//! // Direct connection
//! let direct = build_client_with_proxy("")?;
//!
//! // Through a corporate proxy, with a shorter timeout
//! let proxied = HttpClientConfig::builder()
//!     .proxy("http://proxy.internal:3128")
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .build_client()?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;

pub use client::{build_client, build_client_with_proxy, parse_proxy};
pub use config::{HttpClientConfig, HttpClientConfigBuilder};
pub use error::{HttpClientError, Result};

pub use reqwest::Client;
