use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Frame,
    text::Line,
    widgets::{Paragraph, Wrap},
};

use crate::actions::compute_risk;
use crate::app::{AppCtx, ScreenWidget, Transition};
use crate::screens::ActionSlot;
use crate::ui::common_nav::esc_to_back;
use crate::ui::components::{draw_frame_title, submit_line};
use crate::ui::help::help_action;

const TITLE: &str = "Compute risk";

#[derive(Default)]
pub struct ComputeRiskScreen {
    action: ActionSlot,
}

#[async_trait]
impl ScreenWidget for ComputeRiskScreen {
    fn title(&self) -> &str { TITLE }

    fn is_busy(&self) -> bool { self.action.is_pending() }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, ctx: &AppCtx) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Length(4), Constraint::Min(6), Constraint::Length(3)])
            .split(size);

        let header = Paragraph::new(vec![
            Line::from(format!("Risk score, coverage ratio and expected loss of {:?}", ctx.session.operator)),
            submit_line(true, "Compute"),
        ])
        .block(draw_frame_title(self.title()));

        let result = Paragraph::new(self.action.lines("Reading risk figures…"))
            .block(draw_frame_title("Result"))
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
            let res = compute_risk(&ctx.session).await;
            self.action.finish(TITLE, res);
        }
        Ok(Transition::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{COVERAGE_RATIO, EXPECTED_LOSS, RISK_SCORE};
    use crate::testing::{session_with, uint_output, FakeChain};
    use crate::types::NoticeLevel;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    #[tokio::test]
    async fn enter_reads_three_figures() {
        let chain = Arc::new(
            FakeChain::new()
                .with_view(RISK_SCORE, Ok(uint_output(42)))
                .with_view(COVERAGE_RATIO, Ok(uint_output(80)))
                .with_view(EXPECTED_LOSS, Ok(uint_output(50))),
        );
        let mut ctx = AppCtx { session: session_with(chain.clone()).await };
        let mut s = ComputeRiskScreen::default();
        s.on_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &mut ctx).await.unwrap();
        s.on_idle(&mut ctx).await.unwrap();

        assert_eq!(chain.view_calls().len(), 3);
        let n = s.action.last().unwrap();
        assert_eq!(n.level, NoticeLevel::Success);
        assert_eq!(n.lines[1], "Coverage ratio: 80%");
    }

    #[tokio::test]
    async fn nothing_runs_without_enter() {
        let chain = Arc::new(FakeChain::new());
        let mut ctx = AppCtx { session: session_with(chain.clone()).await };
        let mut s = ComputeRiskScreen::default();
        s.on_idle(&mut ctx).await.unwrap();
        assert!(chain.view_calls().is_empty());
        assert!(s.action.last().is_none());
    }
}
