use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Darken an RGB color by a multiplicative factor (0.0..=1.0).
/// If the color is not RGB, returns it unchanged.
pub fn darken_rgb(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let f = factor.clamp(0.0, 1.0);
            let scale = |c: u8| (c as f32 * f).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}

/// Background for sections that ask to fill the remaining height.
pub fn fill_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(darken_rgb(surface, 0.85)).fg(text)
}

/// Row style for a navigation item.
///
/// The active item is emphasized with the accent color, the keyboard cursor
/// uses the selection colors, and disabled rows are muted regardless.
pub fn nav_item_style<T: Theme + ?Sized>(theme: &T, active: bool, selected: bool, disabled: bool) -> Style {
    if disabled {
        let style = theme.text_muted_style();
        return if selected { style.bg(theme.roles().selection_bg) } else { style };
    }
    let mut style = if active {
        theme.accent_emphasis_style()
    } else {
        theme.text_primary_style()
    };
    if selected {
        style = style.bg(theme.roles().selection_bg);
    }
    style
}

/// Style for input fields; caller sets the block border based on focus.
pub fn input_style<T: Theme + ?Sized>(theme: &T, valid: bool, enabled: bool) -> Style {
    let ThemeRoles {
        surface,
        text,
        text_muted,
        error,
        ..
    } = *theme.roles();
    let mut style = Style::default().bg(surface).fg(text);
    if !enabled {
        style = style.fg(text_muted);
    } else if !valid {
        style = style.fg(error);
    }
    style
}

/// Secondary button style (outline-like, rely on border color in Block).
pub fn button_secondary_style<T: Theme + ?Sized>(theme: &T, enabled: bool, selected: bool) -> Style {
    if !enabled {
        return theme.text_muted_style();
    }
    let ThemeRoles {
        accent_secondary,
        selection_bg,
        ..
    } = *theme.roles();
    let style = Style::default().fg(accent_secondary);
    if selected { style.bg(selection_bg) } else { style }
}

/// Badge/tag style (filled accent, readable text).
pub fn badge_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles {
        accent_secondary,
        background,
        ..
    } = *theme.roles();
    Style::default().bg(accent_secondary).fg(background)
}

/// Renders a borderless single-line button, used for the stepper arrows.
pub fn render_button<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, label: &str, enabled: bool, theme: &T) {
    frame.render_widget(
        Paragraph::new(label).centered().style(button_secondary_style(theme, enabled, false)),
        area,
    );
}

/// Builds `key description` hint pairs for the hint bar.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(*key, theme.accent_emphasis_style()));
        spans.push(Span::styled(*description, theme.text_muted_style()));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::NordTheme;

    #[test]
    fn darken_scales_rgb_and_keeps_named_colors() {
        assert_eq!(darken_rgb(Color::Rgb(100, 50, 0), 0.5), Color::Rgb(50, 25, 0));
        assert_eq!(darken_rgb(Color::Red, 0.5), Color::Red);
    }

    #[test]
    fn hint_spans_alternate_key_and_description() {
        let theme = NordTheme::new();
        let spans = build_hint_spans(&theme, &[(" Enter", " Open"), (" Tab", " Next")]);
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[2].content, " Tab");
    }

    #[test]
    fn disabled_items_are_muted_even_when_active() {
        let theme = NordTheme::new();
        let style = nav_item_style(&theme, true, false, true);
        assert_eq!(style.fg, Some(theme.roles().text_muted));
    }
}
