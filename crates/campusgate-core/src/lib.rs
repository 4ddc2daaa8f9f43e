// campusgate-core: View-model layer between campusgate-api and consumers (TUI).

pub mod config;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod topology;

// ── Primary re-exports ──────────────────────────────────────────────
pub use campusgate_api::ApiClient;
pub use config::ServiceConfig;
pub use dashboard::{Dashboard, DashboardState};
pub use editor::PolicyDraft;
pub use error::CoreError;
pub use topology::{TopologyLink, TopologyStats, TopologyView, name_slug};

// Re-export wire types at the crate root for ergonomics.
pub use campusgate_api::types::{
    Alert, AlertSeverity, DashboardStats, DeviceStatus, DeviceType, NetworkDevice, Policy,
    PolicyAction, PolicyCategory, PolicyCreate, PolicyUpdate, Position,
};
