//! Component system for the navkit gallery.
//!
//! Components are stateless renderers and input handlers. Their state lives
//! in [`App`](crate::app::App) so reducers stay testable without a terminal,
//! and every handler reports side effects back as [`Effect`]s instead of
//! mutating global state directly.

use crossterm::event::{KeyEvent, MouseEvent};
use navkit_types::{Effect, Msg};
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::App;

/// A UI component with its own event handling and rendering.
///
/// # Component Lifecycle
///
/// 1. **Messages**: `handle_message()` receives application-wide messages.
/// 2. **Input**: `handle_key_events()` and `handle_mouse_events()` receive
///    terminal input routed by the main view.
/// 3. **Rendering**: `render()` draws into the provided area and records the
///    areas it needs for hit testing.
pub(crate) trait Component {
    /// Handle an application-level message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events. Components hit-test against the areas they
    /// recorded during the last render.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should only draw and record layout. Any other state
    /// change belongs in the event handlers.
    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App);

    /// Key hints shown in the hint bar while the component has focus.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }

    /// Splits `area` into the sub-areas the component renders into.
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        vec![area]
    }
}

/// Returns the index of the area containing `(x, y)`, provided the point
/// also lies within `container`.
pub fn find_target_index_by_mouse_position(container: &Rect, areas: &[Rect], x: u16, y: u16) -> Option<usize> {
    if !rect_contains(container, x, y) {
        return None;
    }
    areas.iter().position(|area| rect_contains(area, x, y))
}

pub fn rect_contains(area: &Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x.saturating_add(area.width) && y >= area.y && y < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_area_under_the_pointer() {
        let container = Rect::new(0, 0, 10, 10);
        let areas = [Rect::new(0, 0, 10, 1), Rect::new(0, 1, 10, 1)];
        assert_eq!(find_target_index_by_mouse_position(&container, &areas, 3, 1), Some(1));
        assert_eq!(find_target_index_by_mouse_position(&container, &areas, 3, 5), None);
        assert_eq!(find_target_index_by_mouse_position(&container, &areas, 12, 0), None);
    }

    #[test]
    fn empty_rects_contain_nothing() {
        assert!(!rect_contains(&Rect::default(), 0, 0));
    }
}
