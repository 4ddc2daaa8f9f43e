//! All possible UI actions. Actions are the sole mechanism for state mutation.

use campusgate_core::{DashboardState, Policy, PolicyDraft};

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A transient status-bar notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Data flow (to/from the bridge worker) ─────────────────────
    Refresh,
    StateRefreshed(Box<DashboardState>),

    // ── Policy operations ─────────────────────────────────────────
    RequestTogglePolicy(String),
    RequestDeletePolicy(String),
    SubmitDraft(Box<PolicyDraft>),
    PolicyCreated(Box<Policy>),
    PolicyCreateFailed(String),

    // ── Alert operations ──────────────────────────────────────────
    RequestResolveAlert(String),

    // ── Modals ────────────────────────────────────────────────────
    OpenEditor,
    OpenTopology,
    CloseModal,
    ShowConfirmDelete { policy_id: String, name: String },
    ConfirmYes,
    ConfirmNo,

    // ── Help / notifications ──────────────────────────────────────
    ToggleHelp,
    Notify(Notification),
    DismissNotification,
}
