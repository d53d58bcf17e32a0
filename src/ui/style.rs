use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};
use std::borrow::Cow;

pub fn span_key(s: &'static str) -> Span<'static> {
    Span::styled(s, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
}
pub fn span_sep() -> Span<'static> {
    Span::styled("  |  ", Style::default().fg(Color::DarkGray))
}
pub fn span_text(s: &'static str) -> Span<'static> {
    Span::raw(s)
}
pub fn span_heading<S: Into<Cow<'static, str>>>(s: S) -> Span<'static> {
    Span::styled(s, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
}
pub fn span_dim<S: Into<Cow<'static, str>>>(s: S) -> Span<'static> {
    Span::styled(s, Style::default().fg(Color::DarkGray))
}

const ACCENT_BRACKET: Color = Color::Blue;
const SELECTED_TEXT: Color = Color::Red;
const IDLE_TEXT: Color = Color::Blue;

/// "< " + LABEL + " >"
pub fn button_spans<S: Into<Cow<'static, str>>>(label: S, selected: bool) -> Vec<Span<'static>> {
    let label = label.into();
    vec![
        Span::styled("< ", Style::default().fg(ACCENT_BRACKET).add_modifier(Modifier::BOLD)),
        Span::styled(
            label,
            Style::default()
                .fg(if selected { SELECTED_TEXT } else { IDLE_TEXT })
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" >", Style::default().fg(ACCENT_BRACKET).add_modifier(Modifier::BOLD)),
    ]
}
