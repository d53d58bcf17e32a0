use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    prelude::Frame,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{AppCtx, ScreenWidget, Transition};
use crate::ui::layout::centered_rect_abs;
use crate::ui::style;

const MESSAGE: &str = "Do you really want to quit the Risk Console?";
const STAY_LABEL: &str = "Don't Quit";
const QUIT_LABEL: &str = "Quit";

pub struct ConfirmQuitScreen {
    quit_selected: bool,
}

impl ConfirmQuitScreen {
    pub fn new() -> Self {
        Self { quit_selected: false }
    }
}

impl Default for ConfirmQuitScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScreenWidget for ConfirmQuitScreen {
    fn title(&self) -> &str {
        ""
    }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, _ctx: &AppCtx) {
        // "< " + label + " >", twice, three spaces apart
        let buttons_len = (4 + STAY_LABEL.len()) + 3 + (4 + QUIT_LABEL.len());
        let inner_width = (MESSAGE.len().max(buttons_len) as u16).max(36);

        let area = centered_rect_abs(inner_width + 4, 4 + 3, size);
        let inner = area.inner(&Margin { horizontal: 2, vertical: 1 });

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1); 4])
            .split(inner);

        let mut buttons = style::button_spans(STAY_LABEL, !self.quit_selected);
        buttons.push(Span::raw("   "));
        buttons.extend(style::button_spans(QUIT_LABEL, self.quit_selected));

        f.render_widget(Clear, area);
        f.render_widget(Block::default().borders(Borders::ALL).title(self.title()), area);
        f.render_widget(Paragraph::new(MESSAGE).alignment(Alignment::Center), rows[1]);
        f.render_widget(Paragraph::new(Line::from(buttons)).alignment(Alignment::Center), rows[3]);
    }

    async fn on_key(&mut self, k: KeyEvent, _ctx: &mut AppCtx) -> Result<Transition> {
        match k.code {
            KeyCode::Esc => return Ok(Transition::Pop),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                self.quit_selected = !self.quit_selected;
            }
            KeyCode::Enter => {
                return Ok(if self.quit_selected { Transition::Quit } else { Transition::Pop });
            }
            _ => {}
        }
        Ok(Transition::Stay)
    }
}
