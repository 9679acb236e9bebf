use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use navkit_types::Effect;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use super::TextFieldState;
use crate::app::App;
use crate::ui::components::{Component, rect_contains};
use crate::ui::theme::{Theme, theme_helpers as th};

/// Label row, bordered input and help line.
const FIELD_HEIGHT: u16 = 5;
const STEPPER_WIDTH: u16 = 3;

/// Renders the field at `index` in `App::fields`.
#[derive(Debug)]
pub struct TextFieldComponent {
    pub index: usize,
}

impl TextFieldComponent {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    pub fn preferred_height() -> u16 {
        FIELD_HEIGHT
    }
}

impl Component for TextFieldComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let Some(state) = app.fields.get_mut(self.index) else {
            return Vec::new();
        };
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return Vec::new();
        }
        match key.code {
            KeyCode::Char(c) => state.insert_char(c),
            KeyCode::Backspace => state.backspace(),
            KeyCode::Delete => state.delete(),
            KeyCode::Up => state.increment(),
            KeyCode::Down => state.decrement(),
            KeyCode::Left => {
                state.move_left();
                Vec::new()
            }
            KeyCode::Right => {
                state.move_right();
                Vec::new()
            }
            KeyCode::Home => {
                state.move_home();
                Vec::new()
            }
            KeyCode::End => {
                state.move_end();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let App { fields, focus, .. } = app;
        let Some(state) = fields.get_mut(self.index) else {
            return Vec::new();
        };
        if !rect_contains(&state.last_area, mouse.column, mouse.row) {
            return Vec::new();
        }
        if state.props().disabled {
            return Vec::new();
        }
        focus.focus(&*state);
        match state.stepper_areas {
            Some((up, _)) if rect_contains(&up, mouse.column, mouse.row) => state.increment(),
            Some((_, down)) if rect_contains(&down, mouse.column, mouse.row) => state.decrement(),
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let App { fields, theme, .. } = app;
        let Some(state) = fields.get_mut(self.index) else {
            return;
        };
        let theme = &**theme;
        state.last_area = area;
        let [label_area, input_area, help_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(3), Constraint::Length(1)]).areas(area);

        let props = state.props();
        let mut label = vec![Span::styled(
            props.label.as_str(),
            theme.text_secondary_style().add_modifier(Modifier::BOLD),
        )];
        if props.read_only {
            label.push(Span::styled(" (read only)", theme.text_muted_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(label)), label_area);

        let violations = state.validate();
        let focused = state.is_focused();
        let block = th::block(theme, None, focused);
        let inner = block.inner(input_area);
        frame.render_widget(block, input_area);

        let (text_area, stepper_area) = if state.is_numeric() && inner.width > STEPPER_WIDTH * 2 {
            let [text, stepper] =
                Layout::horizontal([Constraint::Min(1), Constraint::Length(STEPPER_WIDTH * 2)]).areas(inner);
            (text, Some(stepper))
        } else {
            (inner, None)
        };

        let prefix = props.prefix.as_deref().map(|prefix| format!("{prefix} ")).unwrap_or_default();
        let suffix = props.suffix.as_deref().map(|suffix| format!(" {suffix}")).unwrap_or_default();
        let value_style = th::input_style(theme, violations.is_empty(), !props.disabled);
        let mut spans = vec![Span::styled(prefix.clone(), theme.text_muted_style())];
        match props.placeholder.as_deref() {
            Some(placeholder) if state.value().is_empty() => {
                spans.push(Span::styled(placeholder, theme.text_muted_style()));
            }
            _ => spans.push(Span::styled(state.value(), value_style)),
        }
        spans.push(Span::styled(suffix, theme.text_muted_style()));
        frame.render_widget(Paragraph::new(Line::from(spans)), text_area);

        let enabled = state.is_editable();
        state.stepper_areas = stepper_area.map(|stepper| {
            let [up, down] =
                Layout::horizontal([Constraint::Length(STEPPER_WIDTH), Constraint::Length(STEPPER_WIDTH)]).areas(stepper);
            th::render_button(frame, up, "▲", enabled, theme);
            th::render_button(frame, down, "▼", enabled, theme);
            (up, down)
        });

        let help = match violations.first() {
            Some(violation) => Span::styled(violation.message(), theme.status_error()),
            None => Span::styled(
                state.props().help_text.clone().unwrap_or_default(),
                theme.text_muted_style(),
            ),
        };
        frame.render_widget(Paragraph::new(help), help_area);

        if focused && enabled {
            let offset = u16::try_from(prefix.width()).unwrap_or(u16::MAX).saturating_add(state.input().cursor_column());
            let x = text_area.x.saturating_add(offset).min(text_area.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(x, text_area.y));
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let numeric = app.fields.get(self.index).is_some_and(TextFieldState::is_numeric);
        let hints: &[(&str, &str)] = if numeric {
            &[(" ↑/↓", " Step"), (" ←/→", " Move cursor")]
        } else {
            &[(" ←/→", " Move cursor"), (" Home/End", " Jump")]
        };
        th::build_hint_spans(&*app.theme, hints)
    }
}
