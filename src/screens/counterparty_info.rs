use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Frame,
    text::Line,
    widgets::{Paragraph, Wrap},
};

use crate::actions::show_info;
use crate::app::{AppCtx, ScreenWidget, Transition};
use crate::screens::ActionSlot;
use crate::ui::common_nav::esc_to_back;
use crate::ui::components::{draw_frame_title, submit_line};
use crate::ui::help::help_action;

const TITLE: &str = "Counterparty info";

#[derive(Default)]
pub struct CounterpartyInfoScreen {
    action: ActionSlot,
}

#[async_trait]
impl ScreenWidget for CounterpartyInfoScreen {
    fn title(&self) -> &str { TITLE }

    fn is_busy(&self) -> bool { self.action.is_pending() }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, ctx: &AppCtx) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Length(4), Constraint::Min(12), Constraint::Length(3)])
            .split(size);

        let header = Paragraph::new(vec![
            Line::from(format!("Record stored for {:?}", ctx.session.operator)),
            submit_line(true, "Show"),
        ])
        .block(draw_frame_title(self.title()));

        let result = Paragraph::new(self.action.lines("Looking up counterparty…"))
            .block(draw_frame_title("Record"))
            .wrap(Wrap { trim: false });

        f.render_widget(header, chunks[0]);
        f.render_widget(result, chunks[1]);
        f.render_widget(help_action(), chunks[2]);
    }

    async fn on_key(&mut self, k: KeyEvent, _ctx: &mut AppCtx) -> Result<Transition> {
        if let Some(t) = esc_to_back(k) {
            return Ok(t);
        }
        if k.code == KeyCode::Enter {
            self.action.queue();
        }
        Ok(Transition::Stay)
    }

    async fn on_idle(&mut self, ctx: &mut AppCtx) -> Result<Transition> {
        if self.action.take_pending() {
            let res = show_info(&ctx.session).await;
            self.action.finish(TITLE, res);
        }
        Ok(Transition::Stay)
    }
}
