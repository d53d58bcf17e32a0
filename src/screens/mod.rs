pub mod add_counterparty;
pub mod compute_risk;
pub mod confirm_quit;
pub mod counterparty_info;
pub mod home;
pub mod main_menu;
pub mod update_exposure;

pub use add_counterparty::AddCounterpartyScreen;
pub use compute_risk::ComputeRiskScreen;
pub use confirm_quit::ConfirmQuitScreen;
pub use counterparty_info::CounterpartyInfoScreen;
pub use home::HomeScreen;
pub use main_menu::MainMenuScreen;
pub use update_exposure::UpdateExposureScreen;

use ratatui::text::Line;
use tracing::warn;

use crate::types::Notice;
use crate::ui::components::{notice_lines, working_line};

/// State of the single chain action a screen runs: queued on Enter, run from
/// `on_idle`, result kept until the next run.
#[derive(Default)]
pub struct ActionSlot {
    pending: bool,
    last: Option<Notice>,
}

impl ActionSlot {
    pub fn queue(&mut self) {
        self.pending = true;
        self.last = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clears the flag; true when an action was waiting.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Store the outcome; an `Err` becomes an error notice under `title`.
    pub fn finish(&mut self, title: &str, res: anyhow::Result<Notice>) {
        let notice = res.unwrap_or_else(|e| {
            warn!(error = %format!("{e:#}"), "{title} failed");
            Notice::error(title, vec![format!("Error: {e:#}")])
        });
        self.last = Some(notice);
    }

    pub fn last(&self) -> Option<&Notice> {
        self.last.as_ref()
    }

    pub fn lines(&self, working: &str) -> Vec<Line<'static>> {
        if self.is_pending() {
            return vec![working_line(working)];
        }
        self.last().map(notice_lines).unwrap_or_default()
    }
}
