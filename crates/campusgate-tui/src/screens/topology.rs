//! Topology viewer modal — the campus network map.
//!
//! Left pane lists devices; the right pane shows the selected device's
//! details and resolved connections, with summary counters below.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use campusgate_core::{NetworkDevice, TopologyView};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::labels;

/// Network map over the device snapshot taken when the map opened.
pub struct TopologyScreen {
    view: TopologyView,
    cursor: usize,
}

impl TopologyScreen {
    pub fn new(devices: Vec<NetworkDevice>) -> Self {
        let mut screen = Self {
            view: TopologyView::new(devices),
            cursor: 0,
        };
        screen.select_under_cursor();
        screen
    }

    /// Devices in the snapshot this screen was opened with.
    pub fn devices(&self) -> &[NetworkDevice] {
        self.view.devices()
    }

    fn move_cursor(&mut self, delta: i64) {
        let len = self.view.devices().len();
        if len == 0 {
            return;
        }
        let next = i64::try_from(self.cursor).unwrap_or(0) + delta;
        self.cursor =
            usize::try_from(next.clamp(0, i64::try_from(len - 1).unwrap_or(0))).unwrap_or(0);
        self.select_under_cursor();
    }

    fn select_under_cursor(&mut self) {
        if let Some(device) = self.view.devices().get(self.cursor) {
            let id = device.id.clone();
            self.view.select(&id);
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_device_list(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Devices ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let selected_id = self.view.selected_device().map(|d| d.id.clone());
        let mut lines = Vec::new();
        for device in self.view.devices() {
            let selected = selected_id.as_deref() == Some(device.id.as_str());
            let row_style = if selected {
                theme::table_selected()
            } else {
                theme::table_row()
            };

            let name: String = device.name.chars().take(22).collect();
            lines.push(Line::from(vec![
                Span::raw(" "),
                labels::status_span(device.status),
                Span::styled(format!(" {name:<22} "), row_style),
                Span::styled(
                    labels::device_type_label(device.device_type),
                    theme::key_hint(),
                ),
            ]));
        }

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(" No devices", theme::key_hint())));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Details ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(device) = self.view.selected_device() else {
            frame.render_widget(
                Paragraph::new(Span::styled(" No device selected", theme::key_hint())),
                inner,
            );
            return;
        };

        let field = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!(" {label:<10}"), theme::stat_label()),
                Span::styled(value, theme::table_row()),
            ])
        };

        let mut lines = vec![
            Line::from(vec![
                Span::raw(" "),
                labels::status_span(device.status),
                Span::styled(
                    format!(" {}", device.name),
                    theme::title_style(),
                ),
            ]),
            Line::from(""),
            field("Type", labels::device_type_label(device.device_type).into()),
            field("IP", device.ip_address.clone()),
            field("Location", device.location.clone()),
        ];

        if !device.description.is_empty() {
            lines.push(field("Notes", device.description.clone()));
        }

        // Connections for the selected device only, already resolved to
        // real devices; dangling references never make it here.
        let links = self.view.links();
        let neighbors: Vec<&str> = links
            .iter()
            .filter(|l| l.from_id == device.id)
            .filter_map(|l| {
                self.view
                    .devices()
                    .iter()
                    .find(|d| d.id == l.to_id)
                    .map(|d| d.name.as_str())
            })
            .collect();

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Connections", theme::table_header())));
        if neighbors.is_empty() {
            lines.push(Line::from(Span::styled("  none", theme::key_hint())));
        } else {
            for name in neighbors {
                lines.push(Line::from(vec![
                    Span::styled("  ─ ", Style::default().fg(theme::SLATE)),
                    Span::styled(name.to_owned(), theme::table_row()),
                ]));
            }
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let stats = self.view.stats();
        let line = Line::from(vec![
            Span::styled(" Devices ", theme::stat_label()),
            Span::styled(stats.total_devices.to_string(), theme::stat_value()),
            Span::styled("  Active ", theme::stat_label()),
            Span::styled(stats.active_devices.to_string(), theme::stat_value()),
            Span::styled("  Security ", theme::stat_label()),
            Span::styled(stats.security_appliances.to_string(), theme::stat_value()),
            Span::styled("  Segments ", theme::stat_label()),
            Span::styled(stats.network_segments.to_string(), theme::stat_value()),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

impl Component for TopologyScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('t') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_cursor(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_cursor(-1);
                None
            }
            KeyCode::Char('c') => {
                self.view.clear_selection();
                None
            }
            KeyCode::Enter => {
                self.select_under_cursor();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let layout = Layout::vertical([
            Constraint::Min(8),    // map panes
            Constraint::Length(3), // stats strip
            Constraint::Length(1), // hints
        ])
        .split(area);

        let panes =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(layout[0]);
        self.render_device_list(frame, panes[0]);
        self.render_detail(frame, panes[1]);
        self.render_stats(frame, layout[1]);

        let hints = Line::from(vec![
            Span::styled(" j/k", theme::key_hint_key()),
            Span::styled(" navigate  ", theme::key_hint()),
            Span::styled("c", theme::key_hint_key()),
            Span::styled(" clear selection  ", theme::key_hint()),
            Span::styled("Esc", theme::key_hint_key()),
            Span::styled(" back", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }
}
