//! Application loop — event handling, action dispatch, and the modal stack.
//!
//! The dashboard is the root view; the editor, topology map, and delete
//! confirmation are modals layered on top of it. All mutation flows
//! through [`Action`] values so every transition is visible in one place.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use campusgate_core::{NetworkDevice, ServiceConfig};

use crate::action::{Action, Notification, NotificationLevel};
use crate::bridge::{BridgeCommand, spawn_bridge};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::{DashboardScreen, PolicyEditor, TopologyScreen};
use crate::theme;
use crate::tui::Tui;

/// Housekeeping tick interval (4 Hz).
const TICK_RATE: Duration = Duration::from_millis(250);
/// Render interval (~30 FPS).
const RENDER_RATE: Duration = Duration::from_millis(33);
/// How long a status-bar notification stays up.
const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// The modal currently layered over the dashboard, if any.
enum Modal {
    None,
    Editor(PolicyEditor),
    Topology(TopologyScreen),
    ConfirmDelete { policy_id: String, name: String },
}

/// Top-level application state.
pub struct App {
    service: ServiceConfig,
    dashboard: DashboardScreen,
    modal: Modal,
    /// Snapshot of the device list for opening the topology map.
    devices: Vec<NetworkDevice>,
    notification: Option<(Notification, Instant)>,
    show_help: bool,
    should_quit: bool,
}

impl App {
    pub fn new(service: ServiceConfig) -> Self {
        Self {
            service,
            dashboard: DashboardScreen::new(),
            modal: Modal::None,
            devices: Vec::new(),
            notification: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// Run until quit. Restores the terminal on exit.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let bridge_tx = spawn_bridge(&self.service, action_tx.clone(), cancel.clone())?;

        let mut events = EventReader::new(TICK_RATE, RENDER_RATE);

        loop {
            tokio::select! {
                Some(event) = events.next() => match event {
                    Event::Key(key) => {
                        if let Some(action) = self.handle_key(key)? {
                            let _ = action_tx.send(action);
                        }
                    }
                    Event::Resize(w, h) => {
                        let _ = action_tx.send(Action::Resize(w, h));
                    }
                    Event::Tick => {
                        let _ = action_tx.send(Action::Tick);
                    }
                    Event::Render => {
                        let _ = action_tx.send(Action::Render);
                    }
                },

                Some(action) = action_rx.recv() => {
                    if matches!(action, Action::Render) {
                        tui.draw(|frame| self.render(frame))?;
                    } else {
                        let mut next = Some(action);
                        while let Some(action) = next.take() {
                            next = self.process_action(&action, &bridge_tx)?;
                        }
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        cancel.cancel();
        events.stop();
        tui.exit()?;
        Ok(())
    }

    // ── Key routing ──────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Ctrl-C quits from anywhere, even mid-edit.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::Quit));
        }

        if self.show_help {
            self.show_help = false;
            return Ok(None);
        }

        match &mut self.modal {
            Modal::Editor(editor) => editor.handle_key_event(key),
            Modal::Topology(topology) => topology.handle_key_event(key),
            Modal::ConfirmDelete { .. } => Ok(match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Some(Action::ConfirmYes),
                KeyCode::Char('n') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            }),
            Modal::None => match key.code {
                KeyCode::Esc if self.notification.is_some() => {
                    Ok(Some(Action::DismissNotification))
                }
                KeyCode::Char('q') => Ok(Some(Action::Quit)),
                KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                KeyCode::Char('r') => Ok(Some(Action::Refresh)),
                KeyCode::Char('n') => Ok(Some(Action::OpenEditor)),
                KeyCode::Char('t') => Ok(Some(Action::OpenTopology)),
                _ => self.dashboard.handle_key_event(key),
            },
        }
    }

    // ── Action dispatch ──────────────────────────────────────────────

    fn process_action(
        &mut self,
        action: &Action,
        bridge_tx: &mpsc::UnboundedSender<BridgeCommand>,
    ) -> Result<Option<Action>> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Tick => self.expire_notification(),
            Action::Render | Action::Resize(..) => {}

            // ── Bridge-bound requests ─────────────────────────────
            Action::Refresh => {
                let _ = bridge_tx.send(BridgeCommand::Refresh);
            }
            Action::RequestTogglePolicy(id) => {
                let _ = bridge_tx.send(BridgeCommand::TogglePolicy(id.clone()));
            }
            Action::RequestDeletePolicy(id) => {
                let _ = bridge_tx.send(BridgeCommand::DeletePolicy(id.clone()));
            }
            Action::RequestResolveAlert(id) => {
                let _ = bridge_tx.send(BridgeCommand::ResolveAlert(id.clone()));
            }
            Action::SubmitDraft(draft) => {
                let _ = bridge_tx.send(BridgeCommand::CreatePolicy(draft.clone()));
            }

            // ── Bridge responses ──────────────────────────────────
            Action::StateRefreshed(state) => {
                // An open topology map keeps the snapshot it was opened
                // with; only the next open sees the refreshed list.
                self.devices = state.devices.clone();
                return self.dashboard.update(action);
            }
            Action::PolicyCreated(policy) => {
                debug!("policy {} created, closing editor", policy.id);
                if matches!(self.modal, Modal::Editor(_)) {
                    self.modal = Modal::None;
                }
                self.notification = Some((
                    Notification::success(format!("Created {}", policy.name)),
                    Instant::now(),
                ));
            }
            Action::PolicyCreateFailed(message) => {
                // Keep the form up with the draft intact.
                if let Modal::Editor(editor) = &mut self.modal {
                    editor.show_error(message.clone());
                }
            }

            // ── Modal management ──────────────────────────────────
            Action::OpenEditor => self.modal = Modal::Editor(PolicyEditor::new()),
            Action::OpenTopology => {
                self.modal = Modal::Topology(TopologyScreen::new(self.devices.clone()));
            }
            Action::CloseModal => self.modal = Modal::None,
            Action::ShowConfirmDelete { policy_id, name } => {
                self.modal = Modal::ConfirmDelete {
                    policy_id: policy_id.clone(),
                    name: name.clone(),
                };
            }
            Action::ConfirmYes => {
                if let Modal::ConfirmDelete { policy_id, .. } = &self.modal {
                    let id = policy_id.clone();
                    self.modal = Modal::None;
                    return Ok(Some(Action::RequestDeletePolicy(id)));
                }
            }
            Action::ConfirmNo => self.modal = Modal::None,

            // ── Help / notifications ──────────────────────────────
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }
            Action::DismissNotification => self.notification = None,
        }
        Ok(None)
    }

    fn expire_notification(&mut self) {
        if let Some((_, shown_at)) = &self.notification
            && shown_at.elapsed() > NOTIFICATION_TTL
        {
            self.notification = None;
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Length(1), // title bar
            Constraint::Min(10),   // body
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

        self.render_title(frame, layout[0]);
        self.dashboard.render(frame, layout[1]);

        match &self.modal {
            Modal::None => {}
            Modal::Editor(editor) => editor.render(frame, centered(layout[1], 70, 80)),
            Modal::Topology(topology) => topology.render(frame, centered(layout[1], 90, 90)),
            Modal::ConfirmDelete { name, .. } => {
                self.render_confirm_delete(frame, layout[1], name);
            }
        }

        if self.show_help {
            self.render_help(frame, layout[1]);
        }

        self.render_status(frame, layout[2]);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" CampusGate ", theme::title_style()),
            Span::styled("─ web filtering console", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if let Some((notification, _)) = &self.notification {
            let color = match notification.level {
                NotificationLevel::Info => theme::SKY,
                NotificationLevel::Success => theme::GREEN,
                NotificationLevel::Error => theme::RED,
            };
            let line = Line::from(Span::styled(
                format!(" {}", notification.message),
                Style::default().fg(color),
            ));
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let line = Line::from(vec![
            Span::styled(" q", theme::key_hint_key()),
            Span::styled(" quit  ", theme::key_hint()),
            Span::styled("r", theme::key_hint_key()),
            Span::styled(" refresh  ", theme::key_hint()),
            Span::styled("n", theme::key_hint_key()),
            Span::styled(" new policy  ", theme::key_hint()),
            Span::styled("t", theme::key_hint_key()),
            Span::styled(" topology  ", theme::key_hint()),
            Span::styled("?", theme::key_hint_key()),
            Span::styled(" help", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_confirm_delete(&self, frame: &mut Frame, area: Rect, name: &str) {
        let width = area.width.min(50);
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(7)) / 2,
            width,
            height: 7,
        };

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" Delete Policy ")
            .title_style(Style::default().fg(theme::RED))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::RED));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let lines = vec![
            Line::from(Span::styled(
                format!(" Delete \"{name}\"? This cannot be undone."),
                theme::table_row(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(" y", theme::key_hint_key()),
                Span::styled(" delete  ", theme::key_hint()),
                Span::styled("n", theme::key_hint_key()),
                Span::styled(" cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let popup = centered(area, 50, 70);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Keys ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let entry = |k: &str, desc: &str| {
            Line::from(vec![
                Span::styled(format!(" {k:<10}"), theme::key_hint_key()),
                Span::styled(desc.to_owned(), theme::table_row()),
            ])
        };

        let lines = vec![
            entry("q / Ctrl-C", "quit"),
            entry("r", "refresh all data"),
            entry("n", "new policy"),
            entry("t", "topology map"),
            entry("Tab", "switch panel"),
            entry("j/k ↑/↓", "move selection"),
            entry("Enter", "toggle policy / resolve alert"),
            entry("d", "delete selected policy"),
            Line::from(""),
            Line::from(Span::styled(" any key to close", theme::key_hint())),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// A rect centered in `area` at the given percentage of its size.
fn centered(area: Rect, pct_x: u16, pct_y: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - pct_y) / 2),
        Constraint::Percentage(pct_y),
        Constraint::Percentage((100 - pct_y) / 2),
    ])
    .split(area);
    let horizontal = Layout::horizontal([
        Constraint::Percentage((100 - pct_x) / 2),
        Constraint::Percentage(pct_x),
        Constraint::Percentage((100 - pct_x) / 2),
    ])
    .split(vertical[1]);
    horizontal[1]
}
