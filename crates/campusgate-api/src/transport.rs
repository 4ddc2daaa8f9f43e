// Transport configuration for building the underlying reqwest::Client.
//
// The filtering service usually runs on the campus LAN, either over plain
// HTTP or behind a self-signed certificate, so TLS verification is
// toggleable rather than tiered.

use std::time::Duration;

use crate::error::Error;

const USER_AGENT: &str = concat!("campusgate/", env!("CARGO_PKG_VERSION"));

/// Transport settings shared by every request.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Accept self-signed certificates (common for on-prem appliances).
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(Error::Transport)
    }
}
