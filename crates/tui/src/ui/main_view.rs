use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use navkit_types::{Effect, Msg};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::components::{Component, SectionComponent, TextFieldComponent};
use super::theme::{Theme, theme_helpers as th};
use crate::app::App;

/// Width of the navigation column.
const NAV_WIDTH: u16 = 34;

/// Root view: navigation sections on the left, fields in the middle and the
/// activity log on the right, with a status line on top and key hints below.
#[derive(Debug, Default)]
pub struct MainView {
    sections: Vec<SectionComponent>,
    fields: Vec<TextFieldComponent>,
}

enum Focused {
    Section(usize),
    Field(usize),
}

impl MainView {
    pub fn new(app: &App) -> Self {
        Self {
            sections: (0..app.sections.len()).map(SectionComponent::new).collect(),
            fields: (0..app.fields.len()).map(TextFieldComponent::new).collect(),
        }
    }

    /// Focuses the first widget when nothing holds focus.
    pub fn restore_focus(&self, app: &mut App) {
        app.focus.first();
    }

    fn focused(&self, app: &App) -> Option<Focused> {
        if let Some(index) = app.sections.iter().position(|section| section.is_focused()) {
            return Some(Focused::Section(index));
        }
        app.fields.iter().position(|field| field.is_focused()).map(Focused::Field)
    }

    fn focused_component(&mut self, app: &App) -> Option<&mut dyn Component> {
        match self.focused(app)? {
            Focused::Section(index) => self.sections.get_mut(index).map(|c| c as &mut dyn Component),
            Focused::Field(index) => self.fields.get_mut(index).map(|c| c as &mut dyn Component),
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.theme;
        let line = Line::from(vec![
            Span::styled(" navkit ", theme.accent_emphasis_style()),
            Span::styled(" path ", theme.text_muted_style()),
            Span::styled(app.active_path.as_str(), theme.text_primary_style()),
            Span::styled("  matching ", theme.text_muted_style()),
            Span::styled(format!("{:?}", app.match_mode), theme.text_primary_style()),
            Span::styled("  theme ", theme.text_muted_style()),
            Span::styled(app.theme_id, theme.text_primary_style()),
        ]);
        frame.render_widget(Paragraph::new(line).style(th::panel_style(theme)), area);
    }

    fn render_activity(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.theme;
        let block = th::block(theme, Some("Activity"), false);
        let capacity = usize::from(block.inner(area).height);
        let skip = app.activity.len().saturating_sub(capacity);
        let lines: Vec<Line> = app
            .activity
            .iter()
            .skip(skip)
            .map(|entry| Line::from(Span::styled(entry.as_str(), theme.text_secondary_style())))
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        app.update(msg)
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Tab => {
                app.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                app.focus.prev();
                return Vec::new();
            }
            KeyCode::Esc => return vec![Effect::Quit],
            KeyCode::Char('t') if control => {
                app.cycle_theme();
                return Vec::new();
            }
            KeyCode::Char('p') if control => {
                app.toggle_match_mode();
                return Vec::new();
            }
            KeyCode::Char('q') if !matches!(self.focused(app), Some(Focused::Field(_))) => {
                return vec![Effect::Quit];
            }
            _ => {}
        }
        match self.focused_component(app) {
            Some(component) => component.handle_key_events(app, key),
            None => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        for section in &mut self.sections {
            effects.extend(section.handle_mouse_events(app, mouse));
        }
        for field in &mut self.fields {
            effects.extend(field.handle_mouse_events(app, mouse));
        }
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let background = Style::default().bg(app.theme.roles().background);
        frame.render_widget(Paragraph::new("").style(background), area);

        let layout = self.get_preferred_layout(app, area);
        let [status, nav, fields, activity, hints] = [layout[0], layout[1], layout[2], layout[3], layout[4]];
        self.render_status(frame, status, app);

        let nav_block = th::block(&*app.theme, Some("Navigation"), false);
        let nav_inner = nav_block.inner(nav);
        frame.render_widget(nav_block, nav);
        let constraints: Vec<Constraint> = self
            .sections
            .iter()
            .map(|component| {
                let state = &app.sections[component.index];
                if state.fill {
                    Constraint::Min(SectionComponent::preferred_height(state))
                } else {
                    Constraint::Length(SectionComponent::preferred_height(state))
                }
            })
            .chain(std::iter::once(Constraint::Fill(1)))
            .collect();
        let section_areas = Layout::vertical(constraints).split(nav_inner);
        for (component, section_area) in self.sections.iter_mut().zip(section_areas.iter()) {
            component.render(frame, *section_area, app);
        }

        let fields_block = th::block(&*app.theme, Some("Fields"), false);
        let fields_inner = fields_block.inner(fields);
        frame.render_widget(fields_block, fields);
        let field_constraints: Vec<Constraint> = self
            .fields
            .iter()
            .map(|_| Constraint::Length(TextFieldComponent::preferred_height()))
            .chain(std::iter::once(Constraint::Fill(1)))
            .collect();
        let field_areas = Layout::vertical(field_constraints).horizontal_margin(1).split(fields_inner);
        for (component, field_area) in self.fields.iter_mut().zip(field_areas.iter()) {
            component.render(frame, *field_area, app);
        }

        self.render_activity(frame, activity, app);

        let hint_spans = self.get_hint_spans(app);
        frame.render_widget(Paragraph::new(Line::from(hint_spans)).style(app.theme.text_muted_style()), hints);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let theme = &*app.theme;
        let mut spans = vec![Span::styled("Hints:", theme.text_muted_style().add_modifier(Modifier::BOLD))];
        match self.focused(app) {
            Some(Focused::Section(index)) => {
                if let Some(section) = self.sections.get(index) {
                    spans.extend(section.get_hint_spans(app));
                }
            }
            Some(Focused::Field(index)) => {
                if let Some(field) = self.fields.get(index) {
                    spans.extend(field.get_hint_spans(app));
                }
            }
            None => {}
        }
        spans.extend(th::build_hint_spans(
            theme,
            &[(" Tab", " Next"), (" Ctrl+T", " Theme"), (" Ctrl+P", " Matching"), (" Esc", " Quit")],
        ));
        spans
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        let [status, body, hints] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let [nav, fields, activity] = Layout::horizontal([
            Constraint::Length(NAV_WIDTH),
            Constraint::Min(30),
            Constraint::Percentage(30),
        ])
        .areas(body);
        vec![status, nav, fields, activity, hints]
    }
}
