use crossterm::event::{KeyCode, KeyEvent};
use crate::app::Transition;

/// Return `Transition::Pop` on Esc so every screen gets "Back" for free.
pub fn esc_to_back(k: KeyEvent) -> Option<Transition> {
    if matches!(k.code, KeyCode::Esc) {
        Some(Transition::Pop)
    } else {
        None
    }
}

/// Wrapping ↑/↓/Tab movement over `count` focusable rows.
pub fn move_focus(k: KeyEvent, index: usize, count: usize) -> Option<usize> {
    match k.code {
        KeyCode::Up => Some(if index == 0 { count - 1 } else { index - 1 }),
        KeyCode::Down | KeyCode::Tab => Some((index + 1) % count),
        _ => None,
    }
}
