use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::Frame,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use textwrap::wrap;

use crate::app::{AppCtx, ScreenWidget, Transition};
use crate::screens::{
    AddCounterpartyScreen, ComputeRiskScreen, ConfirmQuitScreen, CounterpartyInfoScreen, HomeScreen,
    UpdateExposureScreen,
};
use crate::ui::common_nav::move_focus;
use crate::ui::help::help_menu;
use crate::ui::layout::{inner_width, three_box_layout, Margins};

const HEADER: &str = "Counterparty Risk Console";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum MenuItem {
    Home,
    AddCounterparty,
    UpdateExposure,
    ComputeRisk,
    CounterpartyInfo,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 6] = [
        MenuItem::Home,
        MenuItem::AddCounterparty,
        MenuItem::UpdateExposure,
        MenuItem::ComputeRisk,
        MenuItem::CounterpartyInfo,
        MenuItem::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuItem::Home => "Home",
            MenuItem::AddCounterparty => "Add counterparty",
            MenuItem::UpdateExposure => "Update exposure",
            MenuItem::ComputeRisk => "Compute risk",
            MenuItem::CounterpartyInfo => "Counterparty info",
            MenuItem::Quit => "Quit",
        }
    }

    fn open(&self) -> Transition {
        match self {
            MenuItem::Home => Transition::Push(Box::new(HomeScreen)),
            MenuItem::AddCounterparty => Transition::Push(Box::new(AddCounterpartyScreen::new())),
            MenuItem::UpdateExposure => Transition::Push(Box::new(UpdateExposureScreen::new())),
            MenuItem::ComputeRisk => Transition::Push(Box::new(ComputeRiskScreen::default())),
            MenuItem::CounterpartyInfo => Transition::Push(Box::new(CounterpartyInfoScreen::default())),
            MenuItem::Quit => Transition::Push(Box::new(ConfirmQuitScreen::new())),
        }
    }
}

#[derive(Default)]
pub struct MainMenuScreen {
    menu_index: usize,
}

#[async_trait]
impl ScreenWidget for MainMenuScreen {
    fn draw(&self, f: &mut Frame<'_>, size: Rect, ctx: &AppCtx) {
        let banner = ctx.session.banner();
        let width = inner_width(size);
        let banner_rows: u16 = banner.iter().map(|l| wrap(l, width).len() as u16).sum();

        let top_needed = 2 + 2 + 1 + 1 + banner_rows;
        let middle_needed = 2 + 2 + MenuItem::ALL.len() as u16;
        let regions = three_box_layout(size, top_needed, middle_needed, 3, Margins::default());

        // TOP
        f.render_widget(Block::default().borders(Borders::ALL), regions.top);
        let top_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)])
            .split(regions.top_inner);

        let banner_lines: Vec<Line> = banner.into_iter().map(Line::from).collect();
        f.render_widget(Paragraph::new(HEADER).alignment(Alignment::Center), top_chunks[0]);
        f.render_widget(Paragraph::new(banner_lines).wrap(Wrap { trim: true }), top_chunks[2]);

        // MIDDLE
        f.render_widget(Block::default().borders(Borders::ALL).title("Menu"), regions.middle);
        let items: Vec<ListItem> = MenuItem::ALL
            .iter()
            .enumerate()
            .map(|(i, it)| {
                let prefix = if i == self.menu_index { "▶ " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(prefix, Style::default().fg(Color::Cyan)),
                    Span::raw(it.label()),
                ]))
            })
            .collect();
        f.render_widget(List::new(items), regions.middle_inner);

        // FOOTER
        f.render_widget(help_menu(), regions.bottom);
    }

    async fn on_key(&mut self, k: KeyEvent, _ctx: &mut AppCtx) -> Result<Transition> {
        if let Some(i) = move_focus(k, self.menu_index, MenuItem::ALL.len()) {
            self.menu_index = i;
            return Ok(Transition::Stay);
        }
        if k.code == KeyCode::Enter {
            return Ok(MenuItem::ALL[self.menu_index].open());
        }
        Ok(Transition::Stay)
    }
}
