//! Dashboard screen — the home view.
//!
//! Layout:
//! ┌─ stat cards (2 rows of 4) ──────────────────────────┐
//! ┌─ Recent Policies ───────┐  ┌─ Security Alerts ──────┐
//! │ first five, toggleable  │  │ unresolved, resolvable │
//! └─────────────────────────┘  └────────────────────────┘

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use campusgate_core::DashboardState;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::labels;

/// How many recent policies the home view lists.
const RECENT_POLICY_COUNT: usize = 5;

/// Which list currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Panel {
    #[default]
    Policies,
    Alerts,
}

/// Dashboard screen state.
pub struct DashboardScreen {
    state: DashboardState,
    panel: Panel,
    policy_idx: usize,
    alert_idx: usize,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            state: DashboardState::default(),
            panel: Panel::default(),
            policy_idx: 0,
            alert_idx: 0,
        }
    }

    fn visible_policy_ids(&self) -> Vec<String> {
        self.state
            .recent_policies(RECENT_POLICY_COUNT)
            .iter()
            .map(|p| p.id.clone())
            .collect()
    }

    fn visible_alert_ids(&self) -> Vec<String> {
        self.state
            .open_alerts()
            .iter()
            .map(|a| a.id.clone())
            .collect()
    }

    fn clamp_indices(&mut self) {
        let policies = self.visible_policy_ids().len();
        let alerts = self.visible_alert_ids().len();
        self.policy_idx = self.policy_idx.min(policies.saturating_sub(1));
        self.alert_idx = self.alert_idx.min(alerts.saturating_sub(1));
    }

    fn move_selection(&mut self, delta: i64) {
        let len = match self.panel {
            Panel::Policies => self.visible_policy_ids().len(),
            Panel::Alerts => self.visible_alert_ids().len(),
        };
        if len == 0 {
            return;
        }
        let idx = match self.panel {
            Panel::Policies => &mut self.policy_idx,
            Panel::Alerts => &mut self.alert_idx,
        };
        let next = i64::try_from(*idx).unwrap_or(0) + delta;
        *idx = usize::try_from(next.clamp(0, i64::try_from(len - 1).unwrap_or(0))).unwrap_or(0);
    }

    fn selected_policy_id(&self) -> Option<String> {
        self.visible_policy_ids().get(self.policy_idx).cloned()
    }

    fn selected_alert_id(&self) -> Option<String> {
        self.visible_alert_ids().get(self.alert_idx).cloned()
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_stat_cards(&self, frame: &mut Frame, area: Rect) {
        let stats = &self.state.stats;
        let cards: [(&str, u64); 8] = [
            ("Policies", stats.total_policies),
            ("Active Policies", stats.active_policies),
            ("Devices", stats.total_devices),
            ("Active Devices", stats.active_devices),
            ("Alerts", stats.total_alerts),
            ("Unresolved", stats.unresolved_alerts),
            ("Blocked Today", stats.blocked_requests_today),
            ("Allowed Today", stats.allowed_requests_today),
        ];

        let rows = Layout::vertical([Constraint::Length(3), Constraint::Length(3)]).split(area);

        for (row_idx, row_area) in rows.iter().enumerate() {
            let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(*row_area);
            for (col_idx, card_area) in columns.iter().enumerate() {
                let (label, value) = cards[row_idx * 4 + col_idx];
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme::border_default());
                let inner = block.inner(*card_area);
                frame.render_widget(block, *card_area);

                let line = Line::from(vec![
                    Span::styled(format!(" {value}"), theme::stat_value()),
                    Span::styled(format!("  {label}"), theme::stat_label()),
                ]);
                frame.render_widget(Paragraph::new(line), inner);
            }
        }
    }

    fn render_policies(&self, frame: &mut Frame, area: Rect) {
        let focused = self.panel == Panel::Policies;
        let block = Block::default()
            .title(" Recent Policies ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let recent = self.state.recent_policies(RECENT_POLICY_COUNT);
        let mut lines = Vec::new();
        for (i, policy) in recent.iter().enumerate() {
            let selected = focused && i == self.policy_idx;
            let marker = if policy.enabled { "▣" } else { "▢" };
            let marker_color = if policy.enabled {
                theme::GREEN
            } else {
                theme::SLATE
            };

            let name: String = policy.name.chars().take(24).collect();
            let row_style = if selected {
                theme::table_selected()
            } else {
                theme::table_row()
            };

            lines.push(Line::from(vec![
                Span::styled(format!(" {marker} "), Style::default().fg(marker_color)),
                Span::styled(format!("{name:<24} "), row_style),
                labels::action_span(policy.action),
                Span::styled(
                    format!("  {}", labels::category_label(policy.category)),
                    theme::key_hint(),
                ),
            ]));
        }

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(" No policies", theme::key_hint())));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Enter", theme::key_hint_key()),
            Span::styled(" toggle  ", theme::key_hint()),
            Span::styled("d", theme::key_hint_key()),
            Span::styled(" delete  ", theme::key_hint()),
            Span::styled("n", theme::key_hint_key()),
            Span::styled(" new", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_alerts(&self, frame: &mut Frame, area: Rect) {
        let focused = self.panel == Panel::Alerts;
        let block = Block::default()
            .title(" Security Alerts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let open = self.state.open_alerts();
        let max_rows = inner.height.saturating_sub(2) as usize;

        let mut lines = Vec::new();
        for (i, alert) in open.iter().take(max_rows).enumerate() {
            let selected = focused && i == self.alert_idx;
            let time_str = alert.created_at.format("%H:%M").to_string();
            let title: String = alert
                .title
                .chars()
                .take(inner.width.saturating_sub(16) as usize)
                .collect();

            let row_style = if selected {
                theme::table_selected()
            } else {
                theme::table_row()
            };

            lines.push(Line::from(vec![
                Span::styled(format!(" {time_str} "), Style::default().fg(theme::AMBER)),
                labels::severity_span(alert.severity),
                Span::styled(format!(" {title}"), row_style),
            ]));
        }

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                " No unresolved alerts",
                theme::key_hint(),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Enter", theme::key_hint_key()),
            Span::styled(" resolve", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for DashboardScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.panel = match self.panel {
                    Panel::Policies => Panel::Alerts,
                    Panel::Alerts => Panel::Policies,
                };
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Enter => match self.panel {
                Panel::Policies => self.selected_policy_id().map(Action::RequestTogglePolicy),
                Panel::Alerts => self.selected_alert_id().map(Action::RequestResolveAlert),
            },
            KeyCode::Char('d') if self.panel == Panel::Policies => {
                self.selected_policy_id().and_then(|id| {
                    self.state.policy_by_id(&id).map(|p| Action::ShowConfirmDelete {
                        policy_id: id.clone(),
                        name: p.name.clone(),
                    })
                })
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::StateRefreshed(state) = action {
            self.state = (**state).clone();
            self.clamp_indices();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if area.width < 50 || area.height < 14 {
            // Minimal mode — just show a summary line
            let summary = format!(
                " Policies: {} │ Open alerts: {} │ Devices: {}",
                self.state.policies.len(),
                self.state.open_alerts().len(),
                self.state.devices.len(),
            );
            frame.render_widget(Paragraph::new(summary).style(theme::table_row()), area);
            return;
        }

        let layout = Layout::vertical([
            Constraint::Length(6), // stat cards
            Constraint::Min(8),    // lists
        ])
        .split(area);

        self.render_stat_cards(frame, layout[0]);

        let lists =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(layout[1]);
        self.render_policies(frame, lists[0]);
        self.render_alerts(frame, lists[1]);
    }
}
