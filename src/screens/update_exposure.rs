use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Frame,
    text::Line,
    widgets::{Paragraph, Wrap},
};

use crate::actions::update_counterparty_exposure;
use crate::app::{AppCtx, ScreenWidget, Transition};
use crate::defaults::Defaults;
use crate::screens::ActionSlot;
use crate::ui::common_nav::{esc_to_back, move_focus};
use crate::ui::components::{draw_frame_title, field_line_text, submit_line, TextField};
use crate::ui::help::help_form;

const TITLE: &str = "Update exposure";
const SUBMIT: usize = 1;

pub struct UpdateExposureScreen {
    exposure: TextField,
    field_index: usize,
    action: ActionSlot,
}

impl UpdateExposureScreen {
    pub fn new() -> Self {
        Self {
            exposure: TextField::with(Defaults::NEW_EXPOSURE),
            field_index: 0,
            action: ActionSlot::default(),
        }
    }
}
impl Default for UpdateExposureScreen { fn default() -> Self { Self::new() } }

#[async_trait]
impl ScreenWidget for UpdateExposureScreen {
    fn title(&self) -> &str { TITLE }

    fn is_busy(&self) -> bool { self.action.is_pending() }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, ctx: &AppCtx) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Length(3), Constraint::Length(6), Constraint::Min(4), Constraint::Length(3)])
            .split(size);

        let header = Paragraph::new(format!("Record the current exposure of {:?}", ctx.session.operator))
            .block(draw_frame_title(self.title()));

        let lines: Vec<Line> = vec![
            field_line_text("New exposure (≥ 0)", &self.exposure, self.field_index == 0),
            Line::from(""),
            submit_line(self.field_index == SUBMIT, "Submit"),
        ];
        let form = Paragraph::new(lines).block(draw_frame_title("Inputs"));

        let result = Paragraph::new(self.action.lines("Submitting transaction, waiting for the receipt…"))
            .block(draw_frame_title("Result"))
            .wrap(Wrap { trim: false });

        f.render_widget(header, chunks[0]);
        f.render_widget(form, chunks[1]);
        f.render_widget(result, chunks[2]);
        f.render_widget(help_form(), chunks[3]);
    }

    async fn on_key(&mut self, k: KeyEvent, _ctx: &mut AppCtx) -> Result<Transition> {
        if let Some(t) = esc_to_back(k) {
            return Ok(t);
        }
        if let Some(i) = move_focus(k, self.field_index, SUBMIT + 1) {
            self.field_index = i;
            return Ok(Transition::Stay);
        }
        let on_field = self.field_index == 0;
        match k.code {
            KeyCode::Enter if !on_field => self.action.queue(),

            KeyCode::Left if on_field => self.exposure.move_left(),
            KeyCode::Right if on_field => self.exposure.move_right(),
            KeyCode::Home if on_field => self.exposure.home(),
            KeyCode::End if on_field => self.exposure.end(),

            KeyCode::Backspace if on_field => self.exposure.backspace(),
            KeyCode::Delete if on_field => self.exposure.delete(),
            KeyCode::Char(c) if on_field && !k.modifiers.contains(KeyModifiers::CONTROL) => {
                self.exposure.insert_char(c)
            }
            _ => {}
        }
        Ok(Transition::Stay)
    }

    async fn on_idle(&mut self, ctx: &mut AppCtx) -> Result<Transition> {
        if self.action.take_pending() {
            let res = update_counterparty_exposure(&ctx.session, &self.exposure.text).await;
            self.action.finish(TITLE, res);
        }
        Ok(Transition::Stay)
    }
}
