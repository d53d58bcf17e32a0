use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Frame,
    text::Line,
    widgets::{Paragraph, Wrap},
};

use crate::actions::{add_counterparty, AddCounterpartyInput};
use crate::app::{AppCtx, ScreenWidget, Transition};
use crate::defaults::Defaults;
use crate::screens::ActionSlot;
use crate::ui::common_nav::{esc_to_back, move_focus};
use crate::ui::components::{draw_frame_title, field_line_text, submit_line, TextField};
use crate::ui::help::help_form;

const FIELDS: usize = 5;
const SUBMIT: usize = FIELDS;
const TITLE: &str = "Add counterparty";

pub struct AddCounterpartyScreen {
    credit_score: TextField,
    exposure_limit: TextField,
    default_probability: TextField,
    loss_given_default: TextField,
    collateral: TextField,
    field_index: usize,
    action: ActionSlot,
}

impl AddCounterpartyScreen {
    pub fn new() -> Self {
        Self {
            credit_score: TextField::with(Defaults::CREDIT_SCORE),
            exposure_limit: TextField::with(Defaults::EXPOSURE_LIMIT),
            default_probability: TextField::with(Defaults::DEFAULT_PROBABILITY_PCT),
            loss_given_default: TextField::with(Defaults::LOSS_GIVEN_DEFAULT_PCT),
            collateral: TextField::with(Defaults::COLLATERAL),
            field_index: 0,
            action: ActionSlot::default(),
        }
    }
    fn is_text(&self) -> bool { self.field_index < FIELDS }
    fn tf_mut(&mut self, idx: usize) -> &mut TextField {
        match idx {
            0 => &mut self.credit_score,
            1 => &mut self.exposure_limit,
            2 => &mut self.default_probability,
            3 => &mut self.loss_given_default,
            _ => &mut self.collateral,
        }
    }
    fn input(&self) -> AddCounterpartyInput<'_> {
        AddCounterpartyInput {
            credit_score: &self.credit_score.text,
            exposure_limit: &self.exposure_limit.text,
            default_probability_pct: &self.default_probability.text,
            loss_given_default_pct: &self.loss_given_default.text,
            collateral: &self.collateral.text,
        }
    }
}
impl Default for AddCounterpartyScreen { fn default() -> Self { Self::new() } }

#[async_trait]
impl ScreenWidget for AddCounterpartyScreen {
    fn title(&self) -> &str { TITLE }

    fn is_busy(&self) -> bool { self.action.is_pending() }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, ctx: &AppCtx) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Length(3), Constraint::Length(11), Constraint::Min(4), Constraint::Length(3)])
            .split(size);

        let header = Paragraph::new(format!("Register wallet {:?} with its credit data", ctx.session.operator))
            .block(draw_frame_title(self.title()));

        let lines: Vec<Line> = vec![
            field_line_text("Credit score (≥ 1)", &self.credit_score, self.field_index == 0),
            field_line_text("Exposure limit (≥ 1)", &self.exposure_limit, self.field_index == 1),
            field_line_text("Default probability % (0-100)", &self.default_probability, self.field_index == 2),
            field_line_text("Loss given default % (0-100)", &self.loss_given_default, self.field_index == 3),
            field_line_text("New collateral (≥ 0)", &self.collateral, self.field_index == 4),
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
        if let Some(i) = move_focus(k, self.field_index, FIELDS + 1) {
            self.field_index = i;
            return Ok(Transition::Stay);
        }
        match k.code {
            // Enter ONLY submits when on [Submit]
            KeyCode::Enter if self.field_index == SUBMIT => self.action.queue(),

            KeyCode::Left if self.is_text() => self.tf_mut(self.field_index).move_left(),
            KeyCode::Right if self.is_text() => self.tf_mut(self.field_index).move_right(),
            KeyCode::Home if self.is_text() => self.tf_mut(self.field_index).home(),
            KeyCode::End if self.is_text() => self.tf_mut(self.field_index).end(),

            KeyCode::Backspace if self.is_text() => self.tf_mut(self.field_index).backspace(),
            KeyCode::Delete if self.is_text() => self.tf_mut(self.field_index).delete(),
            KeyCode::Char(c) if self.is_text() && !k.modifiers.contains(KeyModifiers::CONTROL) => {
                self.tf_mut(self.field_index).insert_char(c)
            }
            _ => {}
        }
        Ok(Transition::Stay)
    }

    async fn on_idle(&mut self, ctx: &mut AppCtx) -> Result<Transition> {
        if self.action.take_pending() {
            let res = add_counterparty(&ctx.session, &self.input()).await;
            self.action.finish(TITLE, res);
        }
        Ok(Transition::Stay)
    }
}
