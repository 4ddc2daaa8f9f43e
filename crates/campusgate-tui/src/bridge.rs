//! Bridge worker — owns the [`Dashboard`] aggregator so the UI loop
//! never awaits a network call.
//!
//! Runs as a background task: receives commands over an mpsc channel,
//! performs the operation plus reconcile, and posts the refreshed state
//! back to the UI loop as an [`Action`]. Late responses are harmless —
//! the action simply lands on whatever view is current.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use campusgate_core::{Dashboard, PolicyDraft, ServiceConfig};

use crate::action::{Action, Notification};

/// Commands the UI loop sends to the bridge worker.
#[derive(Debug)]
pub enum BridgeCommand {
    Refresh,
    TogglePolicy(String),
    DeletePolicy(String),
    ResolveAlert(String),
    CreatePolicy(Box<PolicyDraft>),
}

/// Spawn the bridge worker for a configured service.
///
/// Returns the command sender. The worker refreshes once at startup and
/// then on its own interval (if configured), shutting down on
/// cancellation or when the command channel closes.
pub fn spawn_bridge(
    service: &ServiceConfig,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) -> Result<mpsc::UnboundedSender<BridgeCommand>, campusgate_core::CoreError> {
    let dashboard = Dashboard::new(service.build_client()?);
    // The editor submits through its own client; the aggregator keeps
    // ownership of the other one across awaits.
    let submit_client = service.build_client()?;

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let refresh_secs = service.refresh_interval_secs;

    tokio::spawn(run_bridge(
        dashboard,
        submit_client,
        cmd_rx,
        action_tx,
        cancel,
        refresh_secs,
    ));

    Ok(cmd_tx)
}

async fn run_bridge(
    mut dashboard: Dashboard,
    submit_client: campusgate_core::ApiClient,
    mut cmd_rx: mpsc::UnboundedReceiver<BridgeCommand>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
    refresh_secs: u64,
) {
    // Initial snapshot so the dashboard has data immediately
    dashboard.refresh_all().await;
    push_state(&action_tx, &dashboard);

    let auto_refresh = refresh_secs > 0;
    let mut ticker = tokio::time::interval(Duration::from_secs(refresh_secs.max(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    ticker.reset(); // the initial refresh above counts as tick zero

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,

            _ = ticker.tick(), if auto_refresh => {
                dashboard.refresh_all().await;
                push_state(&action_tx, &dashboard);
            }

            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else { break };
                handle_command(&mut dashboard, &submit_client, &action_tx, cmd).await;
            }
        }
    }

    debug!("bridge worker shut down");
}

async fn handle_command(
    dashboard: &mut Dashboard,
    submit_client: &campusgate_core::ApiClient,
    action_tx: &mpsc::UnboundedSender<Action>,
    cmd: BridgeCommand,
) {
    match cmd {
        BridgeCommand::Refresh => {
            dashboard.refresh_all().await;
            push_state(action_tx, dashboard);
            notify(action_tx, Notification::info("Refreshed"));
        }

        BridgeCommand::TogglePolicy(id) => {
            match dashboard.toggle_policy(&id).await {
                Ok(policy) => {
                    let verb = if policy.enabled { "enabled" } else { "disabled" };
                    notify(action_tx, Notification::success(format!(
                        "{} {verb}",
                        policy.name
                    )));
                }
                Err(e) => {
                    warn!("toggle policy {id} failed: {e}");
                    notify(action_tx, Notification::error(format!("Toggle failed: {e}")));
                }
            }
            push_state(action_tx, dashboard);
        }

        BridgeCommand::DeletePolicy(id) => {
            match dashboard.delete_policy(&id).await {
                Ok(()) => notify(action_tx, Notification::success("Policy deleted")),
                Err(e) => {
                    warn!("delete policy {id} failed: {e}");
                    notify(action_tx, Notification::error(format!("Delete failed: {e}")));
                }
            }
            push_state(action_tx, dashboard);
        }

        BridgeCommand::ResolveAlert(id) => {
            match dashboard.resolve_alert(&id).await {
                Ok(alert) => {
                    notify(action_tx, Notification::success(format!(
                        "Resolved: {}",
                        alert.title
                    )));
                }
                Err(e) => {
                    warn!("resolve alert {id} failed: {e}");
                    notify(action_tx, Notification::error(format!("Resolve failed: {e}")));
                }
            }
            push_state(action_tx, dashboard);
        }

        BridgeCommand::CreatePolicy(draft) => match draft.submit(submit_client).await {
            Ok(policy) => {
                dashboard.policy_created(policy.clone()).await;
                let _ = action_tx.send(Action::PolicyCreated(Box::new(policy)));
                push_state(action_tx, dashboard);
            }
            Err(e) => {
                // The editor stays open with the draft intact.
                warn!("create policy failed: {e}");
                let _ = action_tx.send(Action::PolicyCreateFailed(e.to_string()));
            }
        },
    }
}

fn push_state(action_tx: &mpsc::UnboundedSender<Action>, dashboard: &Dashboard) {
    let _ = action_tx.send(Action::StateRefreshed(Box::new(dashboard.state().clone())));
}

fn notify(action_tx: &mpsc::UnboundedSender<Action>, notification: Notification) {
    let _ = action_tx.send(Action::Notify(notification));
}
