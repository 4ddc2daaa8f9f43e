// Hand-crafted async HTTP client for the campusgate filtering service.
//
// Base path: /api/
// Auth: none (the service is reachable only from the admin VLAN)

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types::{
    Alert, DashboardStats, NetworkDevice, Policy, PolicyCreate, PolicyUpdate,
};

// ── Error response shape from the service ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the campusgate REST API.
///
/// All endpoints are JSON under `/api/`. Construction validates the base
/// URL once; request methods only deal in relative paths.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a service base URL (e.g. `http://10.0.4.2:8000`).
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages transport).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Append `/api/` to the base URL unless the caller already did.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        // Strip trailing slash for uniform handling
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }

        Ok(url)
    }

    /// Base URL this client talks to (ends with `/api/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"policies"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        // base_url always ends with `/api/`, so joining `policies/…` works.
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).send().await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).send().await?;
        self.handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    /// Build an `Error::Api` from a non-2xx response.
    ///
    /// The service reports failures as `{"detail": "…"}`; fall back to
    /// the raw body or the status line when that shape is absent.
    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(ErrorResponse {
                detail: Some(detail),
            }) => detail,
            _ if !raw.is_empty() => raw,
            _ => status.to_string(),
        };

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Dashboard ────────────────────────────────────────────────────

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, Error> {
        self.get("dashboard/stats").await
    }

    // ── Policies ─────────────────────────────────────────────────────

    pub async fn list_policies(&self) -> Result<Vec<Policy>, Error> {
        self.get("policies").await
    }

    pub async fn get_policy(&self, policy_id: &str) -> Result<Policy, Error> {
        self.get(&format!("policies/{policy_id}")).await
    }

    pub async fn create_policy(&self, body: &PolicyCreate) -> Result<Policy, Error> {
        self.post("policies", body).await
    }

    pub async fn update_policy(
        &self,
        policy_id: &str,
        body: &PolicyUpdate,
    ) -> Result<Policy, Error> {
        self.put(&format!("policies/{policy_id}"), body).await
    }

    pub async fn delete_policy(&self, policy_id: &str) -> Result<(), Error> {
        self.delete(&format!("policies/{policy_id}")).await
    }

    // ── Devices ──────────────────────────────────────────────────────

    pub async fn list_devices(&self) -> Result<Vec<NetworkDevice>, Error> {
        self.get("network/devices").await
    }

    // ── Alerts ───────────────────────────────────────────────────────

    pub async fn list_alerts(&self) -> Result<Vec<Alert>, Error> {
        self.get("alerts").await
    }

    /// Mark an alert resolved. Idempotent on the service side.
    pub async fn resolve_alert(&self, alert_id: &str) -> Result<Alert, Error> {
        self.put_empty(&format!("alerts/{alert_id}/resolve")).await
    }

    // ── Demo data ────────────────────────────────────────────────────

    /// Ask the service to seed its demo dataset. Returns the service's
    /// status message.
    pub async fn initialize_demo_data(&self) -> Result<serde_json::Value, Error> {
        self.post_empty("demo/initialize").await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_api_suffix() {
        let client =
            ApiClient::from_reqwest("http://10.0.4.2:8000", reqwest::Client::new()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://10.0.4.2:8000/api/");
    }

    #[test]
    fn base_url_with_api_suffix_is_kept() {
        let client =
            ApiClient::from_reqwest("http://10.0.4.2:8000/api", reqwest::Client::new()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://10.0.4.2:8000/api/");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client =
            ApiClient::from_reqwest("http://filter.campus.edu/", reqwest::Client::new()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://filter.campus.edu/api/");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ApiClient::from_reqwest("not a url", reqwest::Client::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
