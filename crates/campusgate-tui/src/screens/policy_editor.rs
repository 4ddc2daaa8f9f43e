//! Policy editor modal — form for creating a new filtering policy.
//!
//! The draft lives client-side until Ctrl-S submits it. A failed submit
//! pops a blocking error alert and keeps the draft intact so the admin
//! can fix and retry; Esc anywhere discards the draft.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use campusgate_core::{PolicyAction, PolicyCategory, PolicyDraft};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::labels;

const CATEGORIES: [PolicyCategory; 8] = [
    PolicyCategory::SocialMedia,
    PolicyCategory::Streaming,
    PolicyCategory::Gaming,
    PolicyCategory::Education,
    PolicyCategory::Research,
    PolicyCategory::Malware,
    PolicyCategory::AdultContent,
    PolicyCategory::Custom,
];

const ACTIONS: [PolicyAction; 3] = [PolicyAction::Block, PolicyAction::Allow, PolicyAction::Warn];

/// Form fields in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Description,
    Category,
    Action,
    Priority,
    Enabled,
    Domains,
    Keywords,
}

impl Field {
    const ORDER: [Self; 8] = [
        Self::Name,
        Self::Description,
        Self::Category,
        Self::Action,
        Self::Priority,
        Self::Enabled,
        Self::Domains,
        Self::Keywords,
    ];

    fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|&f| f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|&f| f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn is_text(self) -> bool {
        matches!(
            self,
            Self::Name | Self::Description | Self::Domains | Self::Keywords
        )
    }
}

/// Policy creation form.
pub struct PolicyEditor {
    draft: PolicyDraft,
    field: Field,
    // Pending (uncommitted) text for the list fields
    domain_input: String,
    keyword_input: String,
    /// Blocking error from a failed submit; dismissed with Enter/Esc.
    error: Option<String>,
}

impl PolicyEditor {
    pub fn new() -> Self {
        Self {
            draft: PolicyDraft::default(),
            field: Field::Name,
            domain_input: String::new(),
            keyword_input: String::new(),
            error: None,
        }
    }

    /// Surface a submit failure without touching the draft.
    pub fn show_error(&mut self, message: String) {
        self.error = Some(message);
    }

    /// The string the focused text field edits.
    fn active_input(&mut self) -> Option<&mut String> {
        match self.field {
            Field::Name => Some(&mut self.draft.name),
            Field::Description => Some(&mut self.draft.description),
            Field::Domains => Some(&mut self.domain_input),
            Field::Keywords => Some(&mut self.keyword_input),
            _ => None,
        }
    }

    fn cycle_choice(&mut self, forward: bool) {
        match self.field {
            Field::Category => {
                let i = CATEGORIES
                    .iter()
                    .position(|&c| c == self.draft.category)
                    .unwrap_or(0);
                let n = CATEGORIES.len();
                self.draft.category = CATEGORIES[if forward { (i + 1) % n } else { (i + n - 1) % n }];
            }
            Field::Action => {
                let i = ACTIONS
                    .iter()
                    .position(|&a| a == self.draft.action)
                    .unwrap_or(0);
                let n = ACTIONS.len();
                self.draft.action = ACTIONS[if forward { (i + 1) % n } else { (i + n - 1) % n }];
            }
            Field::Priority => {
                if forward {
                    self.draft.priority = (self.draft.priority % 5) + 1;
                } else {
                    self.draft.priority = if self.draft.priority <= 1 {
                        5
                    } else {
                        self.draft.priority - 1
                    };
                }
            }
            Field::Enabled => self.draft.enabled = !self.draft.enabled,
            _ => {}
        }
    }

    /// List-field entry commits: Enter adds the pending text, Backspace
    /// on an empty input pops the last committed entry.
    fn handle_entry_key(&mut self, key: KeyEvent) -> bool {
        match (self.field, key.code) {
            (Field::Domains, KeyCode::Enter) => {
                let value = self.domain_input.clone();
                if self.draft.add_domain(&value) {
                    self.domain_input.clear();
                }
                true
            }
            (Field::Keywords, KeyCode::Enter) => {
                let value = self.keyword_input.clone();
                if self.draft.add_keyword(&value) {
                    self.keyword_input.clear();
                }
                true
            }
            (Field::Domains, KeyCode::Backspace) if self.domain_input.is_empty() => {
                if let Some(last) = self.draft.domains.last().cloned() {
                    self.draft.remove_domain(&last);
                }
                true
            }
            (Field::Keywords, KeyCode::Backspace) if self.keyword_input.is_empty() => {
                if let Some(last) = self.draft.keywords.last().cloned() {
                    self.draft.remove_keyword(&last);
                }
                true
            }
            _ => false,
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn field_line<'a>(&self, field: Field, label: &'a str, value: Vec<Span<'a>>) -> Line<'a> {
        let marker = if self.field == field { "▸ " } else { "  " };
        let label_style = if self.field == field {
            theme::table_selected()
        } else {
            theme::stat_label()
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(theme::VIOLET)),
            Span::styled(format!("{label:<12}"), label_style),
        ];
        spans.extend(value);
        Line::from(spans)
    }

    fn text_value<'a>(&self, field: Field, text: &'a str) -> Vec<Span<'a>> {
        let mut spans = vec![Span::styled(text, theme::table_row())];
        if self.field == field {
            spans.push(Span::styled("▏", Style::default().fg(theme::SKY)));
        }
        spans
    }

    fn list_value<'a>(&self, field: Field, entries: &'a [String], pending: &'a str) -> Vec<Span<'a>> {
        let mut spans = Vec::new();
        for entry in entries {
            spans.push(Span::styled(
                format!("[{entry}] "),
                Style::default().fg(theme::SKY),
            ));
        }
        spans.push(Span::styled(pending, theme::table_row()));
        if self.field == field {
            spans.push(Span::styled("▏", Style::default().fg(theme::SKY)));
        }
        spans
    }

    fn render_error(&self, frame: &mut Frame, area: Rect) {
        let Some(message) = &self.error else { return };

        let width = area.width.min(60);
        let height = 7;
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" Create Failed ")
            .title_style(Style::default().fg(theme::RED))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::RED));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let lines = vec![
            Line::from(Span::styled(message.clone(), theme::table_row())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", theme::key_hint_key()),
                Span::styled(" dismiss and keep editing", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}

impl Component for PolicyEditor {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // A submit error blocks the form until acknowledged.
        if self.error.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.error = None;
            }
            return Ok(None);
        }

        if key.code == KeyCode::Esc {
            return Ok(Some(Action::CloseModal));
        }

        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::SubmitDraft(Box::new(self.draft.clone()))));
        }

        match key.code {
            KeyCode::Tab => {
                self.field = self.field.next();
                return Ok(None);
            }
            KeyCode::BackTab => {
                self.field = self.field.prev();
                return Ok(None);
            }
            _ => {}
        }

        if !self.field.is_text() {
            match key.code {
                KeyCode::Left | KeyCode::Char('h') => self.cycle_choice(false),
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter | KeyCode::Char(' ') => {
                    self.cycle_choice(true);
                }
                _ => {}
            }
            return Ok(None);
        }

        if self.handle_entry_key(key) {
            return Ok(None);
        }

        if let Some(input) = self.active_input() {
            match key.code {
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    input.push(c);
                }
                _ => {}
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let block = Block::default()
            .title(" New Policy ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([Constraint::Min(10), Constraint::Length(1)]).split(inner);

        let enabled_span = if self.draft.enabled {
            Span::styled("enabled", Style::default().fg(theme::GREEN))
        } else {
            Span::styled("disabled", Style::default().fg(theme::SLATE))
        };

        let lines = vec![
            self.field_line(Field::Name, "Name", self.text_value(Field::Name, &self.draft.name)),
            self.field_line(
                Field::Description,
                "Description",
                self.text_value(Field::Description, &self.draft.description),
            ),
            Line::from(""),
            self.field_line(
                Field::Category,
                "Category",
                vec![Span::styled(
                    labels::category_label(self.draft.category),
                    theme::table_row(),
                )],
            ),
            self.field_line(Field::Action, "Action", vec![labels::action_span(self.draft.action)]),
            self.field_line(
                Field::Priority,
                "Priority",
                vec![Span::styled(
                    self.draft.priority.to_string(),
                    theme::stat_value(),
                )],
            ),
            self.field_line(Field::Enabled, "Status", vec![enabled_span]),
            Line::from(""),
            self.field_line(
                Field::Domains,
                "Domains",
                self.list_value(Field::Domains, &self.draft.domains, &self.domain_input),
            ),
            self.field_line(
                Field::Keywords,
                "Keywords",
                self.list_value(Field::Keywords, &self.draft.keywords, &self.keyword_input),
            ),
        ];
        frame.render_widget(Paragraph::new(lines), layout[0]);

        let hints = Line::from(vec![
            Span::styled(" Tab", theme::key_hint_key()),
            Span::styled(" next field  ", theme::key_hint()),
            Span::styled("←/→", theme::key_hint_key()),
            Span::styled(" change  ", theme::key_hint()),
            Span::styled("Enter", theme::key_hint_key()),
            Span::styled(" add entry  ", theme::key_hint()),
            Span::styled("Ctrl-S", theme::key_hint_key()),
            Span::styled(" save  ", theme::key_hint()),
            Span::styled("Esc", theme::key_hint_key()),
            Span::styled(" discard", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);

        self.render_error(frame, area);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn type_str(editor: &mut PolicyEditor, s: &str) {
        for c in s.chars() {
            editor.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn typing_fills_the_focused_field() {
        let mut editor = PolicyEditor::new();
        type_str(&mut editor, "Block TikTok");
        assert_eq!(editor.draft.name, "Block TikTok");

        editor.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_str(&mut editor, "No TikTok in class");
        assert_eq!(editor.draft.description, "No TikTok in class");
    }

    #[test]
    fn backspace_edits_the_focused_field() {
        let mut editor = PolicyEditor::new();
        type_str(&mut editor, "Blocky");
        editor.handle_key_event(key(KeyCode::Backspace)).unwrap();
        assert_eq!(editor.draft.name, "Block");
    }

    #[test]
    fn tab_cycles_through_all_fields() {
        let mut editor = PolicyEditor::new();
        for _ in 0..Field::ORDER.len() {
            editor.handle_key_event(key(KeyCode::Tab)).unwrap();
        }
        assert_eq!(editor.field, Field::Name);

        editor.handle_key_event(key(KeyCode::BackTab)).unwrap();
        assert_eq!(editor.field, Field::Keywords);
    }

    #[test]
    fn arrows_cycle_category_and_wrap() {
        let mut editor = PolicyEditor::new();
        editor.field = Field::Category;

        editor.handle_key_event(key(KeyCode::Right)).unwrap();
        assert_eq!(editor.draft.category, PolicyCategory::Streaming);

        editor.handle_key_event(key(KeyCode::Left)).unwrap();
        editor.handle_key_event(key(KeyCode::Left)).unwrap();
        assert_eq!(editor.draft.category, PolicyCategory::Custom);
    }

    #[test]
    fn priority_wraps_within_one_to_five() {
        let mut editor = PolicyEditor::new();
        editor.field = Field::Priority;

        editor.handle_key_event(key(KeyCode::Left)).unwrap();
        assert_eq!(editor.draft.priority, 5);

        editor.handle_key_event(key(KeyCode::Right)).unwrap();
        assert_eq!(editor.draft.priority, 1);
    }

    #[test]
    fn enter_commits_domain_entries() {
        let mut editor = PolicyEditor::new();
        editor.field = Field::Domains;

        type_str(&mut editor, "tiktok.com");
        editor.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(editor.draft.domains, vec!["tiktok.com"]);
        assert!(editor.domain_input.is_empty());
    }

    #[test]
    fn duplicate_domain_entry_keeps_the_input() {
        let mut editor = PolicyEditor::new();
        editor.field = Field::Domains;

        type_str(&mut editor, "tiktok.com");
        editor.handle_key_event(key(KeyCode::Enter)).unwrap();
        type_str(&mut editor, "tiktok.com");
        editor.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(editor.draft.domains.len(), 1);
        assert_eq!(editor.domain_input, "tiktok.com");
    }

    #[test]
    fn backspace_on_empty_input_pops_last_entry() {
        let mut editor = PolicyEditor::new();
        editor.field = Field::Keywords;

        type_str(&mut editor, "games");
        editor.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(editor.draft.keywords, vec!["games"]);

        editor.handle_key_event(key(KeyCode::Backspace)).unwrap();
        assert!(editor.draft.keywords.is_empty());
    }

    #[test]
    fn ctrl_s_submits_the_current_draft() {
        let mut editor = PolicyEditor::new();
        type_str(&mut editor, "Block Gaming");

        let action = editor.handle_key_event(ctrl('s')).unwrap();
        match action {
            Some(Action::SubmitDraft(draft)) => assert_eq!(draft.name, "Block Gaming"),
            other => panic!("expected SubmitDraft, got {other:?}"),
        }
    }

    #[test]
    fn esc_discards_via_close_modal() {
        let mut editor = PolicyEditor::new();
        let action = editor.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(matches!(action, Some(Action::CloseModal)));
    }

    #[test]
    fn error_blocks_input_until_dismissed() {
        let mut editor = PolicyEditor::new();
        type_str(&mut editor, "Block Gaming");
        editor.show_error("Policy name is required".into());

        // Keystrokes are swallowed while the alert is up.
        let action = editor.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(action.is_none());
        assert!(editor.error.is_none());

        // The draft survived the failed submit.
        assert_eq!(editor.draft.name, "Block Gaming");
    }
}
