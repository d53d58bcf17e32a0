use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::Frame,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{AppCtx, ScreenWidget, Transition};
use crate::ui::help::help_page;
use crate::ui::layout::{inner_width, three_box_layout, wrapped_height, Margins};
use crate::ui::style::{span_dim, span_heading};

const WELCOME: &str = "Counterparty Risk Console manages the financial risk attached to your \
counterparties through a smart contract, so risk figures are computed on chain and every \
update is recorded.";

const FEATURES: [&str; 4] = [
    "Counterparty tracking: register a counterparty with its credit data and update its exposure.",
    "Risk computation: risk score, coverage ratio and expected loss read straight from the contract.",
    "Signed transactions: every write is signed locally with your key and confirmed on chain.",
    "Instant reports: the stored record is shown as soon as you ask for it.",
];

const HOW_TO: [&str; 4] = [
    "Add counterparty: register your wallet with its credit score, limit and loss figures.",
    "Update exposure: record the current exposure of your counterparty.",
    "Compute risk: evaluate expected loss and the coverage ratio.",
    "Counterparty info: show the record stored for your wallet.",
];

const TESTNET_NOTE: &str = "Note: always use test networks for your experiments.";

#[derive(Default)]
pub struct HomeScreen;

fn body_lines(ctx: &AppCtx) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(span_heading("Features"))];
    lines.extend(FEATURES.iter().map(|f| Line::from(format!("  • {f}"))));
    lines.push(Line::from(""));
    lines.push(Line::from(span_heading("How to use it")));
    lines.extend(HOW_TO.iter().enumerate().map(|(i, h)| Line::from(format!("  {}. {h}", i + 1))));
    lines.push(Line::from(""));
    lines.push(Line::from(span_heading("Session")));
    lines.extend(ctx.session.banner().into_iter().map(|b| Line::from(format!("  {b}"))));
    lines.push(Line::from(""));
    lines.push(Line::from(span_dim(TESTNET_NOTE)));
    lines
}

#[async_trait]
impl ScreenWidget for HomeScreen {
    fn title(&self) -> &str { "Home" }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, ctx: &AppCtx) {
        let width = inner_width(size);
        let welcome_rows = wrapped_height(&[WELCOME], width);
        let body = body_lines(ctx);

        let top_needed = 2 + 2 + 1 + 1 + welcome_rows;
        let regions = three_box_layout(size, top_needed, 2 + 2 + body.len() as u16, 3, Margins::default());

        // TOP
        f.render_widget(Block::default().borders(Borders::ALL).title(self.title()), regions.top);
        let top_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)])
            .split(regions.top_inner);
        f.render_widget(Paragraph::new("Welcome").alignment(Alignment::Center), top_chunks[0]);
        f.render_widget(Paragraph::new(WELCOME).wrap(Wrap { trim: true }), top_chunks[2]);

        // MIDDLE
        f.render_widget(Block::default().borders(Borders::ALL), regions.middle);
        f.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), regions.middle_inner);

        // FOOTER
        f.render_widget(help_page(), regions.bottom);
    }

    async fn on_key(&mut self, k: KeyEvent, _ctx: &mut AppCtx) -> Result<Transition> {
        match k.code {
            KeyCode::Esc | KeyCode::Enter => Ok(Transition::Pop),
            _ => Ok(Transition::Stay),
        }
    }
}
