// Wire types for the campusgate filtering service.
//
// Field names and enum values mirror the service's JSON exactly. Every
// enum-like string field is a closed Rust enum: an unknown category,
// action, status, or severity fails deserialization at the service
// boundary instead of flowing into the UI as a blank widget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Policy ──────────────────────────────────────────────────────────

/// Content category a filtering policy applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyCategory {
    SocialMedia,
    Streaming,
    Gaming,
    Education,
    Research,
    Malware,
    AdultContent,
    Custom,
}

/// What the filter does with matching traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyAction {
    Allow,
    Block,
    Warn,
}

/// A web-filtering policy as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: PolicyCategory,
    pub action: PolicyAction,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub enabled: bool,
    /// 1 (highest) .. 5 (lowest).
    pub priority: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /policies` — the service assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyCreate {
    pub name: String,
    pub description: String,
    pub category: PolicyCategory,
    pub action: PolicyAction,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub enabled: bool,
    pub priority: u8,
}

/// Partial update body for `PUT /policies/{id}`.
///
/// Every field is optional; absent fields are left untouched by the
/// service. The dashboard's enable/disable toggle only ever sends
/// `enabled`, but the service accepts the full shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<PolicyCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<PolicyAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

impl PolicyUpdate {
    /// Update that flips only the enabled flag.
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Self::default()
        }
    }
}

// ── Alert ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Critical,
    High,
    Medium,
    Low,
}

/// A detected security event.
///
/// Created by the service (detection is external); the only client-driven
/// transition is `resolved: false → true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: AlertSeverity,
    pub source_ip: String,
    pub destination: String,
    /// Name of the policy that fired, when the service knows it.
    #[serde(default)]
    pub policy_triggered: Option<String>,
    /// Device that reported the event, when known.
    #[serde(default)]
    pub device_id: Option<String>,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
}

// ── Network device ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Router,
    Firewall,
    Switch,
    Utm,
    StudentDevice,
    Server,
}

impl DeviceType {
    /// Firewalls and UTM appliances count as security appliances in the
    /// topology statistics panel.
    pub fn is_security_appliance(self) -> bool {
        matches!(self, Self::Firewall | Self::Utm)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    Active,
    Inactive,
    Warning,
}

impl DeviceStatus {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// 2D coordinate in UI space (pixels). Layout data, not geography.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A node in the administrator-facing topology view.
///
/// `connections` entries reference other devices either by id or by a
/// slug derived from the device name — both forms occur in service data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDevice {
    pub id: String,
    pub name: String,
    pub device_type: DeviceType,
    pub ip_address: String,
    pub location: String,
    pub description: String,
    pub status: DeviceStatus,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub connections: Vec<String>,
    pub created_at: DateTime<Utc>,
}

// ── Dashboard statistics ────────────────────────────────────────────

/// Read-only snapshot aggregate computed server-side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_policies: u64,
    pub active_policies: u64,
    pub total_devices: u64,
    pub active_devices: u64,
    pub total_alerts: u64,
    pub unresolved_alerts: u64,
    pub blocked_requests_today: u64,
    pub allowed_requests_today: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn policy_category_round_trips_snake_case() {
        let json = "\"adult_content\"";
        let cat: PolicyCategory = serde_json::from_str(json).unwrap();
        assert_eq!(cat, PolicyCategory::AdultContent);
        assert_eq!(serde_json::to_string(&cat).unwrap(), json);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let result = serde_json::from_str::<PolicyCategory>("\"cryptomining\"");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_device_status_is_rejected() {
        let result = serde_json::from_str::<DeviceStatus>("\"degraded\"");
        assert!(result.is_err());
    }

    #[test]
    fn policy_update_serializes_only_set_fields() {
        let update = PolicyUpdate::enabled(false);
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "enabled": false }));
    }

    #[test]
    fn device_position_defaults_to_origin() {
        let json = serde_json::json!({
            "id": "r1",
            "name": "Edge Router",
            "device_type": "router",
            "ip_address": "192.168.1.1",
            "location": "Network Edge",
            "description": "",
            "status": "active",
            "created_at": "2024-01-01T00:00:00Z"
        });
        let device: NetworkDevice = serde_json::from_value(json).unwrap();
        assert_eq!(device.position.x, 0.0);
        assert_eq!(device.position.y, 0.0);
        assert!(device.connections.is_empty());
    }

    #[test]
    fn security_appliance_classification() {
        assert!(DeviceType::Firewall.is_security_appliance());
        assert!(DeviceType::Utm.is_security_appliance());
        assert!(!DeviceType::Switch.is_security_appliance());
        assert!(!DeviceType::StudentDevice.is_security_appliance());
    }
}
