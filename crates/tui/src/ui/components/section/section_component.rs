use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use navkit_engine::rollup::path_has_prefix;
use navkit_types::Effect;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::{SectionRow, SectionState};
use crate::app::App;
use crate::ui::components::{Component, find_target_index_by_mouse_position};
use crate::ui::theme::{Theme, theme_helpers as th};

/// One rendered line of a section; `row` is set for selectable lines.
struct SectionLine<'a> {
    row: Option<SectionRow>,
    line: Line<'a>,
}

/// Renders the section at `index` in `App::sections`.
///
/// Draws the optional separator and heading, the visible items, the rolled up
/// items while expanded and the view/hide toggle. Sub-items are listed under
/// the active item.
#[derive(Debug)]
pub struct SectionComponent {
    pub index: usize,
}

impl SectionComponent {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Rows needed to draw `state` without clipping.
    pub fn preferred_height(state: &SectionState) -> u16 {
        let chrome = u16::from(state.separator) + u16::from(state.title.is_some() && state.action.is_none());
        let active = state.active_index();
        let lines: usize = state
            .rows()
            .into_iter()
            .map(|row| match row {
                SectionRow::Item(index) if active == Some(index) => 1 + state.items[index].sub_items.len(),
                _ => 1,
            })
            .sum();
        chrome.saturating_add(u16::try_from(lines).unwrap_or(u16::MAX))
    }
}

impl Component for SectionComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let App { sections, frames, .. } = app;
        let Some(state) = sections.get_mut(self.index) else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                state.move_cursor(true);
                Vec::new()
            }
            KeyCode::Up | KeyCode::Char('k') => {
                state.move_cursor(false);
                Vec::new()
            }
            KeyCode::Enter | KeyCode::Char(' ') => state.activate_cursor(frames),
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let App {
            sections, frames, focus, ..
        } = app;
        let Some(state) = sections.get_mut(self.index) else {
            return Vec::new();
        };
        let areas: Vec<Rect> = state.row_areas.iter().map(|(_, area)| *area).collect();
        let Some(hit) = find_target_index_by_mouse_position(&state.last_area, &areas, mouse.column, mouse.row) else {
            return Vec::new();
        };
        let row = state.row_areas[hit].0;
        focus.focus(&*state);
        state.activate_row(row, frames)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let App { sections, theme, .. } = app;
        let Some(state) = sections.get_mut(self.index) else {
            return;
        };
        let theme = &**theme;
        let focused = state.is_focused();
        state.last_area = area;
        state.row_areas.clear();

        let base = if state.fill { th::fill_style(theme) } else { th::panel_style(theme) };
        let mut block = Block::default().style(base);
        if state.separator {
            block = block.borders(Borders::TOP).border_style(Style::default().fg(theme.roles().divider));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut body = inner;
        if let Some(title) = state.title.as_deref()
            && state.action.is_none()
        {
            let [heading, rest] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
            frame.render_widget(Paragraph::new(heading_line(title, None, theme, false, inner.width)), heading);
            body = rest;
        }

        let lines = build_lines(state, theme, focused, body.width);
        let mut row_areas = Vec::new();
        for (offset, section_line) in lines.into_iter().enumerate() {
            let Ok(offset) = u16::try_from(offset) else { break };
            if offset >= body.height {
                break;
            }
            let line_area = Rect::new(body.x, body.y + offset, body.width, 1);
            if let Some(row) = section_line.row {
                row_areas.push((row, line_area));
            }
            frame.render_widget(Paragraph::new(section_line.line), line_area);
        }
        state.row_areas.extend(row_areas);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hints = vec![(" ↑/↓", " Move"), (" Enter", " Open")];
        if app.sections.get(self.index).is_some_and(SectionState::shows_toggle) {
            hints.push((" Enter on toggle", " View all/Hide"));
        }
        th::build_hint_spans(&*app.theme, &hints)
    }
}

fn heading_line<'a>(title: &'a str, action_icon: Option<&'a str>, theme: &dyn Theme, selected: bool, width: u16) -> Line<'a> {
    let title_span = Span::styled(title, theme.text_secondary_style().add_modifier(Modifier::BOLD));
    let Some(icon) = action_icon else {
        return Line::from(vec![Span::raw(" "), title_span]);
    };
    let used = 1 + title.width() + icon.width() + 2;
    let gap = usize::from(width).saturating_sub(used).max(1);
    Line::from(vec![
        Span::raw(" "),
        title_span,
        Span::raw(" ".repeat(gap)),
        Span::styled(icon, th::button_secondary_style(theme, true, selected)),
        Span::raw(" "),
    ])
}

fn build_lines<'a>(state: &'a SectionState, theme: &dyn Theme, focused: bool, width: u16) -> Vec<SectionLine<'a>> {
    let cursor = if focused { state.cursor_row() } else { None };
    let active = state.active_index();
    let active_path = state.active_path().unwrap_or_default();
    let mut lines = Vec::new();

    for row in state.rows() {
        let selected = cursor == Some(row);
        match row {
            SectionRow::Action => {
                let title = state.title.as_deref().unwrap_or_default();
                let icon = state.action.as_ref().map(|action| action.icon.as_str());
                lines.push(SectionLine {
                    row: Some(row),
                    line: heading_line(title, icon, theme, selected, width),
                });
            }
            SectionRow::Item(index) => {
                let Some(item) = state.items.get(index) else { continue };
                let is_active = active == Some(index);
                let style = th::nav_item_style(theme, is_active, selected, item.disabled);
                let marker = if is_active { "▌" } else { " " };
                let mut spans = vec![
                    Span::styled(marker, theme.accent_primary_style()),
                    Span::styled(format!("{} ", item.icon.as_deref().unwrap_or(" ")), style),
                    Span::styled(item.label.as_str(), style),
                ];
                if item.new {
                    spans.push(Span::styled(" •", theme.status_info()));
                }
                if let Some(badge) = item.badge.as_deref() {
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled(format!(" {badge} "), th::badge_style(theme)));
                }
                lines.push(SectionLine {
                    row: Some(row),
                    line: Line::from(spans),
                });
                if is_active {
                    for sub_item in &item.sub_items {
                        let sub_active = path_has_prefix(active_path, &sub_item.url, state.match_mode);
                        let sub_style = th::nav_item_style(theme, sub_active, false, sub_item.disabled);
                        lines.push(SectionLine {
                            row: None,
                            line: Line::from(vec![Span::raw("    "), Span::styled(sub_item.label.as_str(), sub_style)]),
                        });
                    }
                }
            }
            SectionRow::Toggle => {
                let label = state.toggle_label().unwrap_or_default();
                let chevron = if state.is_expanded() { "▴ " } else { "▾ " };
                let style = if selected {
                    theme.selection_style()
                } else {
                    theme.text_secondary_style()
                };
                lines.push(SectionLine {
                    row: Some(row),
                    line: Line::from(vec![Span::raw("  "), Span::styled(format!("{chevron}{label}"), style)]),
                });
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use navkit_types::{NavItem, PathMatchMode, Rollup, SectionId, SubNavItem};
    use navkit_util::{SectionConfig, SequentialIdFactory};

    use crate::ui::theme::NordTheme;

    fn state(after: usize, active_path: &str) -> SectionState {
        let items = vec![
            NavItem::new("Home").with_url("/home"),
            NavItem::new("Orders")
                .with_url("/orders")
                .with_sub_items(vec![SubNavItem::new("Drafts", "/drafts")]),
            NavItem::new("Products").with_url("/products"),
        ];
        let config = SectionConfig {
            items,
            rollup: Some(Rollup::new(after, active_path)),
            ..SectionConfig::default()
        };
        SectionState::new(SectionId(1), config, &SequentialIdFactory::new(), PathMatchMode::Prefix)
    }

    #[test]
    fn collapsed_height_counts_visible_items_and_toggle() {
        assert_eq!(SectionComponent::preferred_height(&state(1, "")), 2);
    }

    #[test]
    fn sub_items_render_under_the_active_item() {
        let state = state(1, "/orders");
        let lines = build_lines(&state, &NordTheme::new(), false, 30);
        let rows: Vec<Option<SectionRow>> = lines.iter().map(|line| line.row).collect();
        assert_eq!(
            rows,
            vec![Some(SectionRow::Item(0)), Some(SectionRow::Item(1)), None, Some(SectionRow::Toggle)]
        );
    }

    #[test]
    fn expanding_adds_rolled_up_rows() {
        let mut state = state(1, "");
        state.toggle();
        assert_eq!(SectionComponent::preferred_height(&state), 4);
    }
}
