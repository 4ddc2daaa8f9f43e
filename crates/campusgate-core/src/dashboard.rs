// ── Dashboard aggregator ──
//
// Owns the client and the latest snapshot of everything the admin UI
// shows: statistics, policies, alerts, devices. Collections refresh
// together but fail independently -- a dead alerts endpoint must not
// blank out the policy list.

use campusgate_api::ApiClient;
use campusgate_api::types::{Alert, DashboardStats, NetworkDevice, Policy, PolicyUpdate};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::CoreError;

/// Snapshot of service data for rendering.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub stats: DashboardStats,
    pub policies: Vec<Policy>,
    pub alerts: Vec<Alert>,
    pub devices: Vec<NetworkDevice>,
    /// Whether a refresh is in flight.
    pub loading: bool,
    /// When the last refresh attempt finished.
    pub last_refresh: Option<DateTime<Utc>>,
    /// Error from the most recent refresh, if any collection failed.
    pub last_error: Option<String>,
}

impl DashboardState {
    /// The first `count` policies, in the order the service returned
    /// them. List order is service-determined and never re-sorted here.
    pub fn recent_policies(&self, count: usize) -> Vec<&Policy> {
        self.policies.iter().take(count).collect()
    }

    /// Unresolved alerts, in service order.
    pub fn open_alerts(&self) -> Vec<&Alert> {
        self.alerts.iter().filter(|a| !a.resolved).collect()
    }

    pub fn policy_by_id(&self, id: &str) -> Option<&Policy> {
        self.policies.iter().find(|p| p.id == id)
    }
}

/// Aggregates service data and applies admin mutations.
///
/// Every mutation follows write-then-reconcile: the change is sent to
/// the service and, on success, all collections are re-fetched so the
/// snapshot never drifts from server truth.
pub struct Dashboard {
    client: ApiClient,
    state: DashboardState,
}

impl Dashboard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: DashboardState::default(),
        }
    }

    /// Latest snapshot. Cheap to clone for handing across tasks.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Re-fetch all four collections concurrently.
    ///
    /// Each collection fails independently: a failed fetch is logged,
    /// recorded in `last_error`, and the previous data is kept. Always
    /// returns the refreshed snapshot.
    pub async fn refresh_all(&mut self) -> &DashboardState {
        debug!("refreshing dashboard data");
        self.state.loading = true;

        let (stats, policies, alerts, devices) = tokio::join!(
            self.client.dashboard_stats(),
            self.client.list_policies(),
            self.client.list_alerts(),
            self.client.list_devices(),
        );

        self.state.last_error = None;

        match stats {
            Ok(stats) => self.state.stats = stats,
            Err(e) => self.record_failure("stats", &e),
        }
        match policies {
            Ok(policies) => self.state.policies = policies,
            Err(e) => self.record_failure("policies", &e),
        }
        match alerts {
            Ok(alerts) => self.state.alerts = alerts,
            Err(e) => self.record_failure("alerts", &e),
        }
        match devices {
            Ok(devices) => self.state.devices = devices,
            Err(e) => self.record_failure("devices", &e),
        }

        // Loading clears even when every fetch failed; partial data is
        // better than a stuck spinner.
        self.state.loading = false;
        self.state.last_refresh = Some(Utc::now());
        &self.state
    }

    fn record_failure(&mut self, collection: &str, err: &campusgate_api::Error) {
        warn!("failed to refresh {collection}: {err}");
        self.state.last_error = Some(format!("{collection}: {err}"));
    }

    // ── Policy mutations ─────────────────────────────────────────────

    /// Flip a policy's enabled flag, then reconcile.
    pub async fn toggle_policy(&mut self, policy_id: &str) -> Result<Policy, CoreError> {
        let current = self
            .state
            .policy_by_id(policy_id)
            .ok_or_else(|| CoreError::not_found("policy", policy_id))?;

        let update = PolicyUpdate::enabled(!current.enabled);
        let updated = self
            .client
            .update_policy(policy_id, &update)
            .await
            .map_err(|e| tag_not_found(e, "policy", policy_id))?;

        self.refresh_all().await;
        Ok(updated)
    }

    /// Delete a policy, then reconcile.
    pub async fn delete_policy(&mut self, policy_id: &str) -> Result<(), CoreError> {
        self.client
            .delete_policy(policy_id)
            .await
            .map_err(|e| tag_not_found(e, "policy", policy_id))?;

        self.refresh_all().await;
        Ok(())
    }

    /// Record a policy the editor just created.
    ///
    /// The new policy is appended immediately so it shows up without
    /// waiting for the round trip, then a full reconcile replaces the
    /// snapshot with server truth.
    pub async fn policy_created(&mut self, policy: Policy) {
        self.state.policies.push(policy);
        self.refresh_all().await;
    }

    // ── Alert mutations ──────────────────────────────────────────────

    /// Mark an alert resolved, then reconcile.
    pub async fn resolve_alert(&mut self, alert_id: &str) -> Result<Alert, CoreError> {
        let resolved = self
            .client
            .resolve_alert(alert_id)
            .await
            .map_err(|e| tag_not_found(e, "alert", alert_id))?;

        self.refresh_all().await;
        Ok(resolved)
    }
}

/// Convert an API error, turning a bare 404 into the entity-specific
/// not-found variant.
fn tag_not_found(err: campusgate_api::Error, entity_type: &str, id: &str) -> CoreError {
    if err.is_not_found() {
        CoreError::not_found(entity_type, id)
    } else {
        CoreError::from(err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use campusgate_api::types::{AlertSeverity, PolicyAction, PolicyCategory};
    use chrono::TimeZone;

    fn policy(id: &str, created_day: u32) -> Policy {
        Policy {
            id: id.into(),
            name: format!("Policy {id}"),
            description: String::new(),
            category: PolicyCategory::Custom,
            action: PolicyAction::Block,
            domains: vec![],
            keywords: vec![],
            enabled: true,
            priority: 1,
            created_at: Utc.with_ymd_and_hms(2024, 3, created_day, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 3, created_day, 0, 0, 0).unwrap(),
        }
    }

    fn alert(id: &str, resolved: bool, created_day: u32) -> Alert {
        Alert {
            id: id.into(),
            title: format!("Alert {id}"),
            description: String::new(),
            severity: AlertSeverity::Medium,
            source_ip: "10.0.0.1".into(),
            destination: "example.com".into(),
            policy_triggered: None,
            device_id: None,
            resolved,
            created_at: Utc.with_ymd_and_hms(2024, 3, created_day, 0, 0, 0).unwrap(),
            resolved_at: None,
        }
    }

    #[test]
    fn recent_policies_keep_service_order() {
        // "a" is older than "b"; the service order still wins.
        let state = DashboardState {
            policies: vec![policy("a", 1), policy("b", 5), policy("c", 3)],
            ..DashboardState::default()
        };

        let recent = state.recent_policies(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, "a");
        assert_eq!(recent[1].id, "b");
    }

    #[test]
    fn open_alerts_excludes_resolved_and_keeps_service_order() {
        let state = DashboardState {
            alerts: vec![alert("a", true, 1), alert("b", false, 5), alert("c", false, 2)],
            ..DashboardState::default()
        };

        let open = state.open_alerts();
        assert_eq!(open.len(), 2);
        assert_eq!(open[0].id, "b");
        assert_eq!(open[1].id, "c");
    }
}
