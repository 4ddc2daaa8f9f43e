// ── Runtime connection configuration ──
//
// Describes *how* to reach the filtering service. The TUI constructs a
// `ServiceConfig` from its config file and hands it in -- core never
// touches disk.

use std::time::Duration;

use campusgate_api::{ApiClient, TransportConfig};

use crate::error::CoreError;

/// Configuration for connecting to a single filtering service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Service base URL (e.g., `http://10.0.4.2:8000`).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Accept self-signed certificates (on-prem appliances).
    pub accept_invalid_certs: bool,
    /// How often the dashboard refreshes its data (seconds). 0 = manual only.
    pub refresh_interval_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
            refresh_interval_secs: 30,
        }
    }
}

impl ServiceConfig {
    /// Build an `ApiClient` for this service.
    pub fn build_client(&self) -> Result<ApiClient, CoreError> {
        let transport = TransportConfig {
            timeout: self.timeout,
            accept_invalid_certs: self.accept_invalid_certs,
        };
        ApiClient::new(&self.base_url, &transport).map_err(CoreError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_localhost() {
        let config = ServiceConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert!(config.build_client().is_ok());
    }

    #[test]
    fn bad_url_is_config_error() {
        let config = ServiceConfig {
            base_url: "not a url".into(),
            ..ServiceConfig::default()
        };
        let err = config.build_client().unwrap_err();
        assert!(matches!(err, CoreError::Config { .. }));
    }
}
