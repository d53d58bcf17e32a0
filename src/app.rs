use anyhow::Result;
use async_trait::async_trait;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    prelude::Frame,
    widgets::Clear,
    Terminal,
};
use std::io;
use std::time::Duration;
use tracing::{debug, info};

use crate::screens::{ConfirmQuitScreen, MainMenuScreen};
use crate::session::Session;

pub enum Transition {
    Stay,
    Push(Box<dyn ScreenWidget>),
    Pop,
    Quit,
}

/// Everything screens share. The session lives here for the whole run.
pub struct AppCtx {
    pub session: Session,
}

#[async_trait]
pub trait ScreenWidget: Send {
    fn title(&self) -> &str { "Risk Console" }
    fn draw(&self, f: &mut Frame<'_>, area: Rect, ctx: &AppCtx);

    async fn on_key(&mut self, key: KeyEvent, ctx: &mut AppCtx) -> Result<Transition>;

    /// Called once per loop turn, right after a draw. Screens that queued an
    /// action on Enter run it here, so the "working" frame is on screen while
    /// the call blocks.
    async fn on_idle(&mut self, _ctx: &mut AppCtx) -> Result<Transition> {
        Ok(Transition::Stay)
    }

    /// True while an action is queued for the next `on_idle`.
    fn is_busy(&self) -> bool { false }
}

/// Drop key presses typed while an action held the loop, so a second Enter on
/// [Submit] does not send a second transaction. Returns how many were dropped.
fn discard_buffered<P, R>(mut pending: P, mut read: R) -> io::Result<usize>
where
    P: FnMut() -> io::Result<bool>,
    R: FnMut() -> io::Result<Event>,
{
    let mut dropped = 0;
    while pending()? {
        read()?;
        dropped += 1;
    }
    Ok(dropped)
}

/// Apply a transition; returns true when the app should exit.
fn apply(stack: &mut Vec<Box<dyn ScreenWidget>>, t: Transition) -> bool {
    match t {
        Transition::Stay => false,
        Transition::Push(s) => {
            stack.push(s);
            false
        }
        Transition::Pop => {
            stack.pop();
            stack.is_empty()
        }
        Transition::Quit => true,
    }
}

pub async fn run_menu(session: Session) -> Result<()> {
    // terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?; // clean start

    let mut ctx = AppCtx { session };
    let res = event_loop(&mut terminal, &mut ctx).await;

    // restore, even when the loop bailed out with an error
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("session closed");
    res
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ctx: &mut AppCtx,
) -> Result<()> {
    let mut stack: Vec<Box<dyn ScreenWidget>> = vec![Box::new(MainMenuScreen::default())];

    loop {
        terminal.draw(|f| {
            let size = f.size();
            if let Some(top) = stack.last() {
                top.draw(f, size, ctx);
            } else {
                f.render_widget(Clear, size);
            }
        })?;

        if let Some(top) = stack.last_mut() {
            let was_busy = top.is_busy();
            let t = top.on_idle(ctx).await?;
            if was_busy {
                let dropped = discard_buffered(|| event::poll(Duration::ZERO), event::read)?;
                if dropped > 0 {
                    debug!(dropped, "discarded input typed during an action");
                }
            }
            if apply(&mut stack, t) {
                break;
            }
        }

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                // GLOBAL HOTKEY: Ctrl+Q shows confirm quit from anywhere
                if k.modifiers.contains(KeyModifiers::CONTROL) && matches!(k.code, KeyCode::Char('q' | 'Q')) {
                    stack.push(Box::new(ConfirmQuitScreen::new()));
                    continue;
                }
                if let Some(top) = stack.last_mut() {
                    let t = top.on_key(k, ctx).await?;
                    if apply(&mut stack, t) {
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}
